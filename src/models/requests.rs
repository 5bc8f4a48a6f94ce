//! Request DTOs
//!
//! Defines the body the webhook notifier POSTs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a webhook notification (POST /webhook)
///
/// # Fields
/// - `function`: name of the decorated function
/// - `result`: its return value, serialized as JSON
/// - `called_at`: when the notification was built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub function: String,
    pub result: Value,
    pub called_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_serialize() {
        let payload = NotificationPayload {
            function: "nightly_report".to_string(),
            result: json!({"rows": 12}),
            called_at: Utc::now(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["function"], "nightly_report");
        assert_eq!(value["result"]["rows"], 12);
        assert!(value["called_at"].is_string());
    }

    #[test]
    fn test_payload_deserialize() {
        let json = r#"{"function":"f","result":[1,2],"called_at":"2024-05-01T10:00:00Z"}"#;
        let payload: NotificationPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.function, "f");
        assert_eq!(payload.result, json!([1, 2]));
    }
}
