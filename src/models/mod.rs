//! Request and Response models
//!
//! Payloads exchanged between the webhook notifier and the webhook receiver.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::NotificationPayload;
pub use responses::{
    ErrorResponse, HealthResponse, NotificationListResponse, ReceivedNotification,
    ReceiverStatsResponse, WebhookAck,
};
