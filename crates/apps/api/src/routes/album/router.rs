use crate::api_state::ApiContext;
use crate::routes::album::handlers::{
    create_album_handler, delete_album_handler, get_album_details_handler, list_albums_handler,
    update_album_handler,
};
use axum::routing::{get, post};
use axum::Router;

pub fn album_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/album", post(create_album_handler).get(list_albums_handler))
        .route(
            "/album/{album_id}",
            get(get_album_details_handler)
                .put(update_album_handler)
                .delete(delete_album_handler),
        )
}
