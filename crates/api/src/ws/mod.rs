//! WebSocket infrastructure for real-time dashboard updates.
//!
//! Provides the subscriber registry, heartbeat, the broadcast payload and
//! the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;
pub mod message;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use message::SensorUpdate;
