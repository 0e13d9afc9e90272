use crate::routes::{album, cloud, comment, media, root, sharing};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Media handlers
        media::handlers::upload_media_handler,
        media::handlers::get_gallery_handler,
        media::handlers::get_shared_media_handler,
        media::handlers::get_media_handler,
        media::handlers::delete_media_handler,
        media::handlers::get_download_url_handler,
        media::handlers::set_media_album_handler,
        // Sharing handlers
        sharing::handlers::share_media_handler,
        sharing::handlers::unshare_media_handler,
        sharing::handlers::list_shares_handler,
        sharing::handlers::share_album_handler,
        // Album handlers
        album::handlers::create_album_handler,
        album::handlers::list_albums_handler,
        album::handlers::get_album_details_handler,
        album::handlers::update_album_handler,
        album::handlers::delete_album_handler,
        // Comment handlers
        comment::handlers::get_comments_handler,
        comment::handlers::add_comment_handler,
        comment::handlers::delete_comment_handler,
        // Cloud handlers
        cloud::handlers::connect_cloud_handler,
        cloud::handlers::exchange_code_handler,
        cloud::handlers::cloud_status_handler,
    ),
    components(
        schemas(
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Media", description = "Uploading, browsing and managing media items"),
        (name = "Sharing", description = "Per-item and album-wide sharing grants"),
        (name = "Album", description = "Organizing media into albums"),
        (name = "Comments", description = "Comments on shared media"),
        (name = "Cloud", description = "Connecting cloud storage accounts"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
