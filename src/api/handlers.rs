//! API Handlers
//!
//! HTTP request handlers for the webhook receiver endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::api::NotificationLog;
use crate::config::Config;
use crate::error::ReceiverError;
use crate::models::{HealthResponse, NotificationListResponse, ReceiverStatsResponse, WebhookAck};

/// Application state shared across all handlers.
///
/// Contains the notification log wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    pub log: Arc<RwLock<NotificationLog>>,
}

impl AppState {
    pub fn new(log: NotificationLog) -> Self {
        Self {
            log: Arc::new(RwLock::new(log)),
        }
    }

    /// Creates a new AppState sized by `MAX_NOTIFICATIONS`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(NotificationLog::new(config.max_notifications))
    }
}

/// Handler for POST /webhook
///
/// Accepts a JSON object and acknowledges it with its assigned id.
/// Unparseable bodies and wrong content types are reported as 400 with
/// the same `{"error": ...}` body as non-object payloads.
pub async fn webhook_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WebhookAck>, ReceiverError> {
    let Json(payload) =
        body.map_err(|rejection| ReceiverError::InvalidRequest(rejection.body_text()))?;

    if !payload.is_object() {
        return Err(ReceiverError::InvalidRequest(
            "Notification body must be a JSON object".to_string(),
        ));
    }

    let function = payload
        .get("function")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();

    let mut log = state.log.write().await;
    let stored = log.push(payload);
    info!("Received notification {} from {}", stored.id, function);

    Ok(Json(WebhookAck::received(stored.id, stored.received_at)))
}

/// Handler for GET /notifications
pub async fn list_handler(State(state): State<AppState>) -> Json<NotificationListResponse> {
    let log = state.log.read().await;
    Json(NotificationListResponse::new(log.all()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ReceiverStatsResponse> {
    let log = state.log.read().await;
    Json(log.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
