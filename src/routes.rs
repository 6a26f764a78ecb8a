use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, AppState};
use crate::openapi::ApiDoc;

/// Largest accepted submission body. Form posts are a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Routes that accept submissions. The binary adds rate limiting on top.
pub fn lead_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/leads", post(handlers::submit_lead))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Assembles the full application around `lead_routes`.
///
/// Health and docs are merged outside the lead routes so they bypass any
/// layer applied to submissions.
pub fn app(state: Arc<AppState>, lead_routes: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(lead_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
