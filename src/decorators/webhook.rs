//! Webhook notification of a call's result
//!
//! After the wrapped function returns, its value is serialized into a
//! [`NotificationPayload`] and POSTed as JSON to the configured URL with a
//! blocking client.
//!
//! [`Webhook::call`] hands back the endpoint's JSON response *instead of*
//! the function's own value. This mirrors the long-standing behavior of the
//! notifier and is most likely unintended; callers that need both should use
//! [`Webhook::call_with_result`].

use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{BoxError, DecoratorError, Result};
use crate::models::NotificationPayload;

/// Request timeout for webhook deliveries.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

// == Notified ==
/// The wrapped function's value together with the webhook response.
#[derive(Debug, Clone)]
pub struct Notified<T> {
    pub result: T,
    pub response: Value,
}

// == Webhook ==
/// Posts every result of the wrapped function to a webhook URL.
#[derive(Debug, Clone)]
pub struct Webhook {
    name: String,
    url: String,
    client: Client,
}

impl Webhook {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self {
            name: name.into(),
            url: url.into(),
            client,
        })
    }

    /// Posts to `WEBHOOK_URL`.
    pub fn from_config(name: impl Into<String>, config: &Config) -> Result<Self> {
        Self::new(name, config.webhook_url.clone())
    }

    // == Call ==
    /// Runs `f`, posts its value, and returns the endpoint's parsed JSON
    /// response in place of that value.
    pub fn call<T, E, F>(&self, f: F) -> Result<Value>
    where
        T: Serialize,
        E: Into<BoxError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let result = f().map_err(DecoratorError::function)?;
        self.notify(&result)
    }

    /// Runs `f`, posts its value, and returns both the value and the response.
    pub fn call_with_result<T, E, F>(&self, f: F) -> Result<Notified<T>>
    where
        T: Serialize,
        E: Into<BoxError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let result = f().map_err(DecoratorError::function)?;
        let response = self.notify(&result)?;
        Ok(Notified { result, response })
    }

    // == Notify ==
    /// Posts `result` and parses the JSON response.
    ///
    /// A non-success status is reported as a `Webhook` error.
    pub fn notify<T: Serialize>(&self, result: &T) -> Result<Value> {
        let payload = NotificationPayload {
            function: self.name.clone(),
            result: serde_json::to_value(result)?,
            called_at: Utc::now(),
        };

        info!("{}: posting result to {}", self.name, self.url);
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()?
            .error_for_status()?;
        let body: Value = response.json()?;
        debug!("{}: webhook answered {}", self.name, body);
        Ok(body)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
