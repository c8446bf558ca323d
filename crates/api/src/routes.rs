use crate::handlers;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Every method on every host and path goes through the redirect handler.
pub fn create_redirect_routes(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::handle_redirect)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
