//! Notification Log
//!
//! Bounded in-memory record of the webhook notifications the receiver has
//! accepted. When full, the oldest notification is dropped first.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::debug;

use crate::models::{ReceivedNotification, ReceiverStatsResponse};

// == Notification Log ==
#[derive(Debug)]
pub struct NotificationLog {
    entries: VecDeque<ReceivedNotification>,
    capacity: usize,
    next_id: u64,
    dropped: u64,
}

impl NotificationLog {
    /// Creates a log holding at most `capacity` notifications (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
            dropped: 0,
        }
    }

    // == Push ==
    /// Records `payload` and returns the stored notification.
    pub fn push(&mut self, payload: Value) -> ReceivedNotification {
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                self.dropped += 1;
                debug!("Notification log full, dropped notification {}", evicted.id);
            }
        }

        let notification = ReceivedNotification {
            id: self.next_id,
            received_at: chrono::Utc::now().to_rfc3339(),
            payload,
        };
        self.next_id += 1;
        self.entries.push_back(notification.clone());
        notification
    }

    /// Retained notifications, oldest first.
    pub fn all(&self) -> Vec<ReceivedNotification> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> ReceiverStatsResponse {
        ReceiverStatsResponse {
            received: self.next_id - 1,
            dropped: self.dropped,
            retained: self.entries.len(),
            capacity: self.capacity,
        }
    }
}
