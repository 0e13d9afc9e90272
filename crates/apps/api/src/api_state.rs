use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::cloud::TokenService;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: SqlitePool,
    pub settings: AppSettings,
    pub tokens: TokenService,
}

// These impls allow Axum to extract parts of the state directly, which keeps
// extractors and middleware that only need one piece decoupled from the rest.
impl FromRef<ApiContext> for SqlitePool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for TokenService {
    fn from_ref(state: &ApiContext) -> Self {
        state.tokens.clone()
    }
}
