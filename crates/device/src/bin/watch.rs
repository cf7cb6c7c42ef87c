//! `drivesafe-watch` -- follows the live telemetry stream from a terminal.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default                 | Description                  |
//! |----------------|----------|-------------------------|------------------------------|
//! | `API_BASE_URL` | no       | `http://localhost:5000` | Base URL for initial queries |
//! | `WS_URL`       | no       | `ws://localhost:5000/ws`| Real-time channel endpoint   |

use drivesafe_device::subscriber;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

const DEFAULT_WS_URL: &str = "ws://localhost:5000/ws";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivesafe_watch=info,drivesafe_device=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_base = std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let api_base = api_base.trim_end_matches('/');
    let ws_url = std::env::var("WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string());

    tracing::info!(api_base = %api_base, ws_url = %ws_url, "Starting drivesafe-watch");

    subscriber::run(api_base, &ws_url).await;
}
