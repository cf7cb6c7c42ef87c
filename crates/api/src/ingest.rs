//! Ingest pipeline: persist a validated sample, evaluate it, persist the
//! resulting alerts and fan the update out to subscribers.
//!
//! Single-shot: nothing is carried between calls, so concurrent ingests
//! never wait on each other.

use axum::extract::ws::Message;
use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_core::thresholds::{evaluate, Thresholds};
use drivesafe_db::models::alert::Alert;
use drivesafe_db::models::sensor_reading::SensorReading;
use drivesafe_db::{ReadingStore, StoreError};

use crate::ws::{SensorUpdate, WsManager};

/// What one successful ingest produced.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub reading: SensorReading,
    /// Alerts that were persisted, in rule order.
    pub alerts: Vec<Alert>,
    /// Alert drafts whose write failed.
    pub failed_alerts: usize,
    /// Subscribers the update was handed to.
    pub delivered: usize,
}

/// Run the ingest pipeline for one validated sample.
///
/// Fails only when the sample itself cannot be persisted, in which case
/// nothing is evaluated or broadcast. Alert writes are independent: a
/// failed write is logged and skipped while its siblings are still
/// attempted. The broadcast never affects the result.
pub async fn ingest(
    store: &dyn ReadingStore,
    ws_manager: &WsManager,
    thresholds: &Thresholds,
    sample: &TelemetrySample,
) -> Result<IngestOutcome, StoreError> {
    let reading = store.append_reading(sample).await?;

    let drafts = evaluate(&reading.sample(), thresholds);

    let mut alerts = Vec::with_capacity(drafts.len());
    let mut failed_alerts = 0;
    for draft in &drafts {
        match store.append_alert(draft).await {
            Ok(alert) => alerts.push(alert),
            Err(e) => {
                failed_alerts += 1;
                tracing::error!(
                    reading_id = reading.id,
                    alert_type = %draft.kind,
                    error = %e,
                    "Failed to persist alert"
                );
            }
        }
    }

    let delivered = broadcast(ws_manager, &reading, &alerts).await;

    tracing::info!(
        reading_id = reading.id,
        alerts = alerts.len(),
        failed_alerts,
        delivered,
        "Telemetry ingested"
    );

    Ok(IngestOutcome {
        reading,
        alerts,
        failed_alerts,
        delivered,
    })
}

/// Serialize the update once and hand the same frame to every subscriber.
async fn broadcast(ws_manager: &WsManager, reading: &SensorReading, alerts: &[Alert]) -> usize {
    match serde_json::to_string(&SensorUpdate::new(reading, alerts)) {
        Ok(json) => ws_manager.publish(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(reading_id = reading.id, error = %e, "Failed to serialize sensor update");
            0
        }
    }
}
