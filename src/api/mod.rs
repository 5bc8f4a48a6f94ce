//! API Module
//!
//! HTTP service that receives webhook notifications.
//!
//! # Endpoints
//! - `POST /webhook` - Accept a notification
//! - `GET /notifications` - List retained notifications
//! - `GET /stats` - Receiver counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
mod log;
pub mod routes;

pub use handlers::*;
pub use log::NotificationLog;
pub use routes::create_router;
