use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::session_id::{make_span_with_session_id, session_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            // Session ID must be in place before the trace span is made
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(session_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id)),
        )
}

/// Routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Search box
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/search", post(handlers::search))
        // Details view
        .route("/recommendations/open", post(handlers::open_recommendation))
        .route("/navigation", post(handlers::navigation))
        .route("/toggle", post(handlers::toggle))
        // Chat widget
        .route("/chat", get(handlers::chat_history).post(handlers::chat_send))
}
