pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::llm::LLMProvider;
use crate::store::ReportStore;

/// Shared application state: the two external client handles, constructed
/// once at startup and injected into every handler.
///
/// `store` is `None` when report persistence failed to initialize; the
/// service then runs analyze-only and `/report` answers "offline".
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn LLMProvider>,
    pub store: Option<Arc<dyn ReportStore>>,
}

pub fn build_router(state: AppState) -> Router {
    // Callers are browser extensions running on arbitrary page origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(routes::analyze::analyze))
        .route("/report", post(routes::report::report))
        .route("/health", get(routes::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
