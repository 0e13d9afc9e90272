use crate::api_state::ApiContext;
use crate::routes::sharing::handlers::{
    list_shares_handler, share_album_handler, share_media_handler, unshare_media_handler,
};
use axum::routing::{delete, post};
use axum::Router;

pub fn sharing_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/media/{media_id}/share",
            post(share_media_handler).get(list_shares_handler),
        )
        .route(
            "/media/{media_id}/share/{user_id}",
            delete(unshare_media_handler),
        )
        .route("/album/{album_id}/share", post(share_album_handler))
}
