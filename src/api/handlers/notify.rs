//! Notification handler

use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::server::AppState;
use crate::error::RelayError;
use crate::relay::Payload;

/// Body returned for every accepted notification
pub const NOTIFIED_BODY: &str = "200: Notified";

#[derive(Debug, Deserialize)]
struct JsonBody {
    payload: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FormBody {
    payload: Option<String>,
}

/// Extractor for the `payload` field of a notification
///
/// Urlencoded forms and JSON bodies are accepted. Decoding failures keep the
/// framework's own rejection; a body without `payload` (or with a `null`
/// one) is rejected with [`RelayError::MissingPayload`].
#[derive(Debug)]
pub struct NotifyRequest(pub Payload);

#[axum::async_trait]
impl<S> FromRequest<S> for NotifyRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = if is_form(&req) {
            let Form(body) = Form::<FormBody>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            body.payload.map(Payload::from)
        } else {
            let Json(body) = Json::<JsonBody>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            body.payload.map(Payload::new)
        };

        payload
            .map(NotifyRequest)
            .ok_or_else(|| RelayError::MissingPayload.into_response())
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Broadcast the posted payload to every WebSocket client
pub async fn notify(
    State(state): State<AppState>,
    NotifyRequest(payload): NotifyRequest,
) -> impl IntoResponse {
    info!("Received data: {}", payload);

    let delivered = state.broadcaster.broadcast(&payload);
    debug!(delivered, "Broadcast complete");

    (StatusCode::OK, NOTIFIED_BODY)
}
