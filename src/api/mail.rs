use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::mail::envelope::ContactForm;
use crate::mail::Envelope;
use crate::models::{ContactRequest, RelayResponse, SendEmailRequest};
use crate::state::AppState;

/// Mail relay routes
pub fn mail_routes() -> Router<AppState> {
    Router::new()
        .route("/send-email", post(send_email))
        .route("/contact", post(send_contact))
}

/// POST /api/send-email - Relay an arbitrary message
async fn send_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>> {
    let Json(request) = payload?;

    let envelope = Envelope::relay(state.relay_sender(), request);
    deliver(&state, &envelope).await
}

/// POST /api/contact - Forward a contact form to the site inbox
async fn send_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>> {
    // A body that is not JSON carries no fields.
    let request = payload.map(|Json(request)| request).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Contact body is not JSON");
        ContactRequest::default()
    });

    let form = ContactForm::from_request(request)
        .ok_or_else(|| AppError::BadRequest("All fields are required.".to_string()))?;

    let receiver = state.config.receiver_email.as_deref().ok_or_else(|| {
        tracing::error!("Contact form received but no receiver address is configured");
        AppError::Unconfigured("RECIVER_EMAIL")
    })?;

    let envelope = Envelope::contact(&state.config.sender_email, receiver, &form);
    deliver(&state, &envelope).await
}

async fn deliver(state: &AppState, envelope: &Envelope) -> Result<Json<RelayResponse>> {
    let response = state.mailer.send(envelope).await.map_err(|e| {
        tracing::error!(error = %e, subject = %envelope.subject, "Email delivery failed");
        AppError::from(e)
    })?;

    Ok(Json(RelayResponse::delivered(response)))
}
