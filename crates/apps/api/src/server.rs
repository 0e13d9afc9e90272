use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::routing::get_service;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use common_services::cloud::{build_registry, TokenService};
use common_services::database::connect;
use http::{header, HeaderValue};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn serve(settings: AppSettings) -> Result<()> {
    // --- Server Startup ---
    info!("🚀 Initializing server...");
    let pool = connect(&settings.storage.database_url).await?;
    let registry = Arc::new(build_registry(&settings.cloud)?);
    let api_state = ApiContext {
        pool,
        settings: settings.clone(),
        tokens: TokenService::new(registry),
    };

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ]);

    // Thumbnails are immutable once written; let clients cache them hard.
    let serve_dir = ServeDir::new(&settings.storage.thumbnail_root);
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    // --- Create Router ---
    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .nest_service("/thumbnails", get_service(serve_dir).layer(cache_layer));

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    info!("📷 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
