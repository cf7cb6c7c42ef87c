//! Real-time subscriber that keeps a dashboard-style view of the stream.
//!
//! On every (re)connect the view is seeded from the query endpoints, then
//! each `sensor_update` frame is folded into it. The server keeps nothing
//! for disconnected clients, so updates published while we were away are
//! only recovered by that reseed.

use std::collections::VecDeque;
use std::time::Duration;

use drivesafe_core::alert::Severity;
use drivesafe_core::messages::MSG_TYPE_SENSOR_UPDATE;
use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::view::{AlertView, Envelope, ReadingView, SensorUpdate};

/// Samples kept for the live chart.
pub const HISTORY_LEN: usize = 50;

/// Alerts kept for the alert feed.
pub const ALERT_FEED_LEN: usize = 50;

/// Reconnection delay after the channel drops.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Local mirror of what a dashboard shows.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    current: Option<ReadingView>,
    /// Oldest first.
    history: VecDeque<ReadingView>,
    /// Newest first.
    alerts: VecDeque<AlertView>,
}

impl DashboardState {
    /// Seed from the query endpoints, which return newest first.
    pub fn from_snapshot(readings: Vec<ReadingView>, alerts: Vec<AlertView>) -> Self {
        let current = readings.first().cloned();
        let history = readings.into_iter().take(HISTORY_LEN).rev().collect();
        let alerts = alerts.into_iter().take(ALERT_FEED_LEN).collect();
        Self {
            current,
            history,
            alerts,
        }
    }

    /// Fold one update in: it becomes the current sample, joins the end of
    /// the history and its alerts go on top of the feed in rule order.
    pub fn apply(&mut self, update: &SensorUpdate) {
        self.current = Some(update.data.clone());

        self.history.push_back(update.data.clone());
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }

        for alert in update.alerts.iter().rev() {
            self.alerts.push_front(alert.clone());
        }
        self.alerts.truncate(ALERT_FEED_LEN);
    }

    pub fn current(&self) -> Option<&ReadingView> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &VecDeque<ReadingView> {
        &self.history
    }

    pub fn alerts(&self) -> &VecDeque<AlertView> {
        &self.alerts
    }
}

/// Decode a text frame. Frames of any other type yield `Ok(None)`.
pub fn parse_frame(text: &str) -> Result<Option<SensorUpdate>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.kind != MSG_TYPE_SENSOR_UPDATE {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some)
}

/// Load the recent window from the query endpoints.
pub async fn fetch_snapshot(
    client: &reqwest::Client,
    api_base: &str,
) -> Result<DashboardState, reqwest::Error> {
    let readings_url = format!("{api_base}/api/sensor-readings?limit={HISTORY_LEN}");
    let alerts_url = format!("{api_base}/api/alerts?limit={ALERT_FEED_LEN}");

    let (readings, alerts) = tokio::try_join!(
        fetch_json::<Vec<ReadingView>>(client, &readings_url),
        fetch_json::<Vec<AlertView>>(client, &alerts_url),
    )?;

    Ok(DashboardState::from_snapshot(readings, alerts))
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, reqwest::Error> {
    client.get(url).send().await?.error_for_status()?.json().await
}

/// Follow the real-time channel indefinitely, reconnecting after drops.
pub async fn run(api_base: &str, ws_url: &str) {
    let client = reqwest::Client::new();
    let mut state = DashboardState::default();

    loop {
        match fetch_snapshot(&client, api_base).await {
            Ok(snapshot) => {
                state = snapshot;
                tracing::info!(
                    history = state.history().len(),
                    alerts = state.alerts().len(),
                    "Loaded initial state"
                );
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load initial state"),
        }

        tracing::info!(url = %ws_url, "Connecting to real-time channel");
        match connect_async(ws_url).await {
            Ok((ws_stream, _response)) => {
                tracing::info!("WebSocket connected");
                run_session(ws_stream, &mut state).await;
                tracing::warn!("WebSocket session ended, reconnecting");
            }
            Err(e) => {
                tracing::error!(error = %e, "WebSocket connection failed");
            }
        }

        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn run_session(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    state: &mut DashboardState,
) {
    let (_sink, mut stream) = ws_stream.split();

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => match parse_frame(&text) {
                Ok(Some(update)) => {
                    state.apply(&update);
                    log_update(&update);
                }
                Ok(None) => tracing::debug!(raw = %text, "Ignoring unknown message type"),
                Err(e) => tracing::warn!(error = %e, "Malformed message"),
            },
            Ok(Message::Close(frame)) => {
                tracing::info!(?frame, "Server closed WebSocket");
                return;
            }
            // Ping/Pong are answered by tungstenite; binary frames are not used.
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "WebSocket receive error");
                return;
            }
        }
    }
    tracing::info!("WebSocket stream exhausted");
}

fn log_update(update: &SensorUpdate) {
    let reading = &update.data;
    tracing::info!(
        reading_id = reading.id,
        speed = reading.speed,
        is_crash = reading.is_crash,
        alerts = update.alerts.len(),
        "Sensor update"
    );
    for alert in &update.alerts {
        match alert.severity {
            Severity::Critical => {
                tracing::warn!(alert = %alert.kind, value = alert.value, unit = %alert.unit, "{}", alert.message)
            }
            Severity::High => {
                tracing::info!(alert = %alert.kind, value = alert.value, unit = %alert.unit, "{}", alert.message)
            }
        }
    }
}
