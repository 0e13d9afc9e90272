use crate::api_state::ApiContext;
use crate::routes::cloud::handlers::{
    cloud_status_handler, connect_cloud_handler, exchange_code_handler,
};
use axum::routing::{get, post};
use axum::Router;

pub fn cloud_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/cloud/{provider}/connect", get(connect_cloud_handler))
        .route("/cloud/{provider}/exchange", post(exchange_code_handler))
        .route("/cloud/{provider}/status", get(cloud_status_handler))
}
