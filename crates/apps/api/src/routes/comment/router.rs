use crate::api_state::ApiContext;
use crate::routes::comment::handlers::{
    add_comment_handler, delete_comment_handler, get_comments_handler,
};
use axum::routing::{delete, get};
use axum::Router;

pub fn comment_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/media/{media_id}/comments",
            get(get_comments_handler).post(add_comment_handler),
        )
        .route("/comment/{comment_id}", delete(delete_comment_handler))
}
