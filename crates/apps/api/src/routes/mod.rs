pub mod album;
mod api_doc;
pub mod auth;
pub mod cloud;
pub mod comment;
pub mod media;
pub mod root;
pub mod sharing;

use crate::api_state::ApiContext;
use crate::routes::album::router::album_protected_router;
use crate::routes::api_doc::ApiDoc;
use crate::routes::auth::middleware::ApiUser;
use crate::routes::cloud::router::cloud_protected_router;
use crate::routes::comment::router::comment_protected_router;
use crate::routes::media::router::media_protected_router;
use crate::routes::root::router::root_public_router;
use crate::routes::sharing::router::sharing_protected_router;
use axum::middleware::from_extractor_with_state;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let max_upload_bytes = api_state.settings.storage.max_upload_bytes;
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(root_public_router())
        .merge(protected_routes(api_state.clone(), max_upload_bytes))
        .with_state(api_state)
}

fn protected_routes(api_state: ApiContext, max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .merge(media_protected_router(max_upload_bytes))
        .merge(sharing_protected_router())
        .merge(album_protected_router())
        .merge(comment_protected_router())
        .merge(cloud_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
