//! CAPTCHA gate for the relay routes

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::extract_bearer_token;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Rejects the request unless its bearer token passes CAPTCHA verification.
///
/// Missing or non-Bearer credentials fail with 401 before any outbound call;
/// a token the verifier does not accept fails with 403.
pub async fn require_captcha(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let token = extract_bearer_token(req.headers()).inspect_err(|_| {
        tracing::debug!(path = %req.uri().path(), "Rejected request without bearer token");
    })?;

    if !state.verifier.verify(&token).await {
        tracing::info!(path = %req.uri().path(), "Rejected request with invalid CAPTCHA token");
        return Err(AppError::Forbidden("Invalid token".to_string()));
    }

    Ok(next.run(req).await)
}
