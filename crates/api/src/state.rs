use std::sync::Arc;

use drivesafe_core::thresholds::Thresholds;
use drivesafe_db::ReadingStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Reading Store backend (PostgreSQL or in-memory).
    pub store: Arc<dyn ReadingStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Real-time subscriber registry (browser dashboards).
    pub ws_manager: Arc<WsManager>,
    /// Alert thresholds applied on ingest.
    pub thresholds: Arc<Thresholds>,
}
