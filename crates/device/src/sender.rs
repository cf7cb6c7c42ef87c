//! HTTP push loop for the simulator.
//!
//! Generates one sample per tick and posts it to the ingest endpoint.
//! Failures are logged and the loop carries on with the next tick; the
//! server is the only place alerts are decided.

use std::time::Duration;

use drivesafe_core::alert::Severity;
use drivesafe_core::telemetry::TelemetrySample;
use rand::Rng;

use crate::generator::Simulator;
use crate::view::IngestReply;

/// Log a one-line summary every this many ticks.
const SUMMARY_EVERY: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected sample with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// POST one sample and decode the server's reply.
pub async fn send_sample(
    client: &reqwest::Client,
    api_url: &str,
    sample: &TelemetrySample,
) -> Result<IngestReply, SendError> {
    let response = client.post(api_url).json(sample).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SendError::Rejected { status, body });
    }

    Ok(response.json::<IngestReply>().await?)
}

/// Run the simulation loop indefinitely.
pub async fn run<R: Rng>(api_url: &str, interval: Duration, mut simulator: Simulator<R>) {
    let client = reqwest::Client::new();
    let mut ticker = tokio::time::interval(interval);
    let mut count: u64 = 0;

    loop {
        ticker.tick().await;
        count += 1;

        let generated = simulator.next_sample();
        let sample = generated.sample;

        if let Some(event) = generated.event {
            tracing::info!(%event, "Injecting event");
        }
        if count % SUMMARY_EVERY == 0 {
            tracing::info!(
                speed = sample.speed,
                acceleration = sample.acceleration,
                braking = sample.braking,
                tilt = sample.tilt,
                rotation_rate = sample.rotation_rate,
                "Current reading"
            );
        }

        match send_sample(&client, api_url, &sample).await {
            Ok(reply) => {
                for alert in &reply.alerts {
                    match alert.severity {
                        Severity::Critical => {
                            tracing::warn!(alert = %alert.kind, message = %alert.message, "Critical alert raised")
                        }
                        Severity::High => {
                            tracing::info!(alert = %alert.kind, message = %alert.message, "Alert raised")
                        }
                    }
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to send telemetry"),
        }
    }
}
