//! `drivesafe-sim` -- vehicle telemetry simulator.
//!
//! Generates realistic samples with occasional injected events and posts
//! them to the ingest endpoint.
//!
//! # Environment variables
//!
//! | Variable          | Required | Default                               | Description                 |
//! |-------------------|----------|---------------------------------------|-----------------------------|
//! | `API_URL`         | no       | `http://localhost:5000/api/telemetry` | Ingest endpoint             |
//! | `SIM_INTERVAL_MS` | no       | `1000`                                | Milliseconds between samples |
//! | `SIM_SEED`        | no       | --                                    | Fixed RNG seed for a reproducible run |

use std::time::Duration;

use drivesafe_device::generator::Simulator;
use drivesafe_device::sender;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_API_URL: &str = "http://localhost:5000/api/telemetry";

const DEFAULT_INTERVAL_MS: u64 = 1000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivesafe_sim=info,drivesafe_device=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let interval_ms: u64 = match std::env::var("SIM_INTERVAL_MS") {
        Ok(v) => v.parse().unwrap_or_else(|_| {
            tracing::error!(value = %v, "SIM_INTERVAL_MS must be a valid integer");
            std::process::exit(1);
        }),
        Err(_) => DEFAULT_INTERVAL_MS,
    };

    let rng = match std::env::var("SIM_SEED") {
        Ok(v) => {
            let seed: u64 = v.parse().unwrap_or_else(|_| {
                tracing::error!(value = %v, "SIM_SEED must be a valid integer");
                std::process::exit(1);
            });
            StdRng::seed_from_u64(seed)
        }
        Err(_) => StdRng::from_os_rng(),
    };

    tracing::info!(api_url = %api_url, interval_ms, "Starting drivesafe-sim");

    sender::run(&api_url, Duration::from_millis(interval_ms), Simulator::new(rng)).await;
}
