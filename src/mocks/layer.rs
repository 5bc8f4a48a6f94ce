//! Tracing layer that records events in memory.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Captured event information.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

/// Layer that captures every event it sees, in emission order.
///
/// ```
/// use mini_decorators::mocks::CaptureLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let capture = CaptureLayer::new();
/// let subscriber = tracing_subscriber::registry().with(capture.clone());
///
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info!("hello");
/// });
/// assert_eq!(capture.messages(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureLayer {
    captured: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.captured
            .lock()
            .expect("CaptureLayer mutex poisoned")
            .clone()
    }

    /// Messages of all captured events.
    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    /// Number of captured events.
    pub fn count(&self) -> usize {
        self.captured
            .lock()
            .expect("CaptureLayer mutex poisoned")
            .len()
    }

    pub fn clear(&self) {
        self.captured
            .lock()
            .expect("CaptureLayer mutex poisoned")
            .clear();
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.captured
            .lock()
            .expect("CaptureLayer mutex poisoned")
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.message,
            });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}
