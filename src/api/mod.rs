pub mod health;
pub mod mail;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;

use crate::auth::require_captcha;
use crate::state::AppState;

/// Inbound JSON bodies may carry large messages.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", relay_routes(state.clone()))
        .merge(health::health_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Relay routes, all behind the CAPTCHA gate
fn relay_routes(state: AppState) -> Router<AppState> {
    mail::mail_routes().route_layer(middleware::from_fn_with_state(state, require_captcha))
}
