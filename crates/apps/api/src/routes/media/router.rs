use crate::api_state::ApiContext;
use crate::routes::media::handlers::{
    delete_media_handler, get_download_url_handler, get_gallery_handler, get_media_handler,
    get_shared_media_handler, set_media_album_handler, upload_media_handler,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

pub fn media_protected_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .route(
            "/media",
            post(upload_media_handler).get(get_gallery_handler),
        )
        // Leave headroom for the multipart framing around the file itself.
        .layer(DefaultBodyLimit::max(max_upload_bytes + 64 * 1024))
        .route("/media/shared", get(get_shared_media_handler))
        .route(
            "/media/{media_id}",
            get(get_media_handler).delete(delete_media_handler),
        )
        .route("/media/{media_id}/download", get(get_download_url_handler))
        .route("/media/{media_id}/album", put(set_media_album_handler))
}
