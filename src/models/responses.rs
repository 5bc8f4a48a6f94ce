//! Response DTOs for the webhook receiver
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Acknowledgement for POST /webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always "received"
    pub status: String,
    /// Sequence number assigned to the notification
    pub id: u64,
    /// Receive time in RFC 3339 format
    pub received_at: String,
}

impl WebhookAck {
    pub fn received(id: u64, received_at: impl Into<String>) -> Self {
        Self {
            status: "received".to_string(),
            id,
            received_at: received_at.into(),
        }
    }
}

/// A notification as retained by the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedNotification {
    pub id: u64,
    pub received_at: String,
    pub payload: Value,
}

/// Response body for GET /notifications
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub count: usize,
    pub notifications: Vec<ReceivedNotification>,
}

impl NotificationListResponse {
    pub fn new(notifications: Vec<ReceivedNotification>) -> Self {
        Self {
            count: notifications.len(),
            notifications,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct ReceiverStatsResponse {
    /// Notifications accepted since startup
    pub received: u64,
    /// Notifications dropped to respect the capacity
    pub dropped: u64,
    /// Notifications currently held
    pub retained: usize,
    /// Maximum notifications held
    pub capacity: usize,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ack_serialize() {
        let ack = WebhookAck::received(7, "2024-05-01T10:00:00+00:00");
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["status"], "received");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_list_counts_notifications() {
        let list = NotificationListResponse::new(vec![ReceivedNotification {
            id: 1,
            received_at: "now".to_string(),
            payload: json!({"function": "f"}),
        }]);
        assert_eq!(list.count, 1);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
