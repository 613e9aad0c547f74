//! HTTP endpoint handlers for the webhook relay
//!
//! The relay pipeline lives here: shape detection (challenge vs. event),
//! best-effort enrichment, message formatting, delivery, and the fixed 200
//! acknowledgment. No inbound body or downstream failure may produce a
//! non-200 response, otherwise monday.com retries the webhook.

use axum::{
    body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, Instrument};

use crate::enrichment::MondayClient;
use crate::http::payload::WebhookPayload;
use crate::http::responses::*;
use crate::notifications::{build_status_message, StatusUpdate, TelegramNotifier};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub monday: MondayClient,
    pub telegram: TelegramNotifier,
}

/// GET / - plain liveness probe
pub async fn handle_root() -> &'static str {
    "ok"
}

/// GET /monday/webhook - endpoint liveness probe
pub async fn handle_webhook_probe() -> impl IntoResponse {
    Json(AckResponse::ok())
}

/// POST /monday/webhook - the relay pipeline
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let payload = WebhookPayload::from_slice(&body);

    // Endpoint-ownership verification: echo the token and do nothing else
    if let Some(challenge) = payload.challenge {
        debug!("Answering endpoint verification challenge");
        return Json(ChallengeResponse { challenge }).into_response();
    }

    let event = payload.event.unwrap_or_default();
    let board = event.board_label();
    let item = event.item_label();
    let span = crate::logging::webhook_span(&board, &item);

    async {
        let column = event.column_label();
        let previous = event.previous_value_text();
        let current = event.new_value_text();

        info!(column = %column, value = %current, "Received status change event");

        let fields = state
            .monday
            .fetch_item_fields(event.item_query_id().as_deref())
            .await;

        let update = StatusUpdate {
            board: board.clone(),
            item: item.clone(),
            column,
            previous,
            current,
            description: fields.description,
            requester: fields.requester,
        };
        state.telegram.send(&build_status_message(&update)).await;
    }
    .instrument(span)
    .await;

    Json(AckResponse::ok()).into_response()
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    let error_response = ErrorResponse {
        error: "Endpoint not found".to_string(),
        code: "NOT_FOUND".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };

    (StatusCode::NOT_FOUND, Json(error_response))
}
