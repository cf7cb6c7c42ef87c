//! Integration tests for `POST /api/telemetry`: validation, persistence,
//! alert evaluation and the real-time fan-out.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use axum::http::StatusCode;
use common::{body_json, get, memory_app, post_json, post_raw, safe_body, FlakyStore};
use drivesafe_api::ingest::ingest;
use drivesafe_api::ws::WsManager;
use drivesafe_core::alert::AlertKind;
use drivesafe_core::telemetry::TelemetrySample;
use drivesafe_core::thresholds::DEFAULT_THRESHOLDS;
use serde_json::json;
use tokio::sync::mpsc::error::TryRecvError;

fn with(overrides: serde_json::Value) -> serde_json::Value {
    let mut body = safe_body();
    for (k, v) in overrides.as_object().unwrap() {
        body[k] = v.clone();
    }
    body
}

fn text_json(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: safe sample is stored and raises no alerts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn safe_sample_is_stored_without_alerts() {
    let (app, _state) = memory_app();

    let response = post_json(app, "/api/telemetry", safe_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["reading"]["id"], 1);
    assert_eq!(json["reading"]["speed"], 60.0);
    assert_eq!(json["reading"]["rotationRate"], 10.0);
    assert_eq!(json["reading"]["isCrash"], false);
    assert!(json["reading"]["timestamp"].is_string());
    assert_eq!(json["alerts"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: over-speed raises exactly one alert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn over_speed_raises_single_alert() {
    let (app, _state) = memory_app();

    let response = post_json(app, "/api/telemetry", with(json!({ "speed": 125 }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let alerts = json["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "Over Speed");
    assert_eq!(alerts[0]["severity"], "High");
    assert_eq!(alerts[0]["value"], 125.0);
    assert_eq!(alerts[0]["unit"], "km/h");
    assert_eq!(alerts[0]["message"], "Speed exceeded 120 km/h");
    assert!(alerts[0]["id"].is_number());
}

// ---------------------------------------------------------------------------
// Test: crash flag raises a critical crash alert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn crash_raises_critical_alert() {
    let (app, _state) = memory_app();

    let json = body_json(post_json(app, "/api/telemetry", with(json!({ "isCrash": true }))).await).await;
    let alerts = json["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "Crash Detection");
    assert_eq!(alerts[0]["severity"], "Critical");
    assert_eq!(alerts[0]["unit"], "Event");
}

// ---------------------------------------------------------------------------
// Test: multiple violations keep rule order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn speed_and_tilt_alerts_keep_rule_order() {
    let (app, _state) = memory_app();

    let body = with(json!({ "speed": 130, "tilt": 50 }));
    let json = body_json(post_json(app.clone(), "/api/telemetry", body).await).await;

    let types: Vec<&str> = json["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["Over Speed", "Tilt Alert"]);

    // Both alerts are queryable afterwards, newest first.
    let stored = body_json(get(app, "/api/alerts").await).await;
    let stored_types: Vec<&str> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(stored_types, ["Tilt Alert", "Over Speed"]);
}

// ---------------------------------------------------------------------------
// Test: malformed body is rejected without touching the store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn string_speed_returns_400_and_stores_nothing() {
    let (app, state) = memory_app();
    let mut rx = state.ws_manager.add("dashboard".to_string()).await;

    let response = post_json(app.clone(), "/api/telemetry", with(json!({ "speed": "fast" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid sensor data format");
    assert_eq!(json["details"][0]["field"], "speed");
    assert_eq!(json["details"][0]["message"], "Expected number, received string");

    let readings = body_json(get(app, "/api/sensor-readings").await).await;
    assert_eq!(readings, json!([]));
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let (app, _state) = memory_app();

    let response = post_json(app, "/api/telemetry", json!({ "speed": 10 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["acceleration", "braking", "tilt", "rotationRate"]);
}

#[tokio::test]
async fn non_json_body_returns_400() {
    let (app, _state) = memory_app();

    let response = post_raw(app, "/api/telemetry", "speed=10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "body");
}

#[tokio::test]
async fn omitted_crash_flag_defaults_to_false() {
    let (app, _state) = memory_app();

    let body = json!({
        "speed": 50, "acceleration": 0, "braking": 0, "tilt": 0, "rotationRate": 0,
        "firmware": "1.2.0",
    });
    let response = post_json(app, "/api/telemetry", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["reading"]["isCrash"], false);
}

// ---------------------------------------------------------------------------
// Test: storage failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reading_write_failure_returns_500_without_broadcast() {
    let store = FlakyStore {
        fail_readings: true,
        ..Default::default()
    };
    let state = common::test_state(Arc::new(store));
    let app = common::build_test_app(state.clone());
    let mut rx = state.ws_manager.add("dashboard".to_string()).await;

    let response = post_json(app, "/api/telemetry", with(json!({ "speed": 150 }))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn failed_alert_write_does_not_block_siblings() {
    let store = FlakyStore {
        fail_alert_kinds: vec![AlertKind::OverSpeed],
        ..Default::default()
    };
    let state = common::test_state(Arc::new(store));
    let app = common::build_test_app(state.clone());

    let body = with(json!({ "speed": 140, "braking": 7, "rotationRate": -50 }));
    let response = post_json(app.clone(), "/api/telemetry", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let types: Vec<&str> = json["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["Sudden Braking", "Sharp Turn"]);
    assert_eq!(json["alerts"][1]["value"], 50.0);

    let stored = body_json(get(app, "/api/alerts").await).await;
    assert_eq!(stored.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ingest_counts_failed_alerts_and_deliveries() {
    let store = FlakyStore {
        fail_alert_kinds: vec![AlertKind::OverSpeed],
        ..Default::default()
    };
    let ws_manager = WsManager::new();
    let mut rx = ws_manager.add("conn-1".to_string()).await;

    let sample = TelemetrySample {
        speed: 140.0,
        acceleration: 0.5,
        braking: 7.0,
        tilt: 1.0,
        rotation_rate: 2.0,
        is_crash: false,
    };
    let outcome = ingest(&store, &ws_manager, &DEFAULT_THRESHOLDS, &sample)
        .await
        .unwrap();

    assert_eq!(outcome.failed_alerts, 1);
    assert_eq!(outcome.delivered, 1);
    assert_eq!(outcome.alerts.len(), 1);
    assert_eq!(outcome.alerts[0].kind, AlertKind::SuddenBraking);

    let update = text_json(rx.recv().await.unwrap());
    assert_eq!(update["alerts"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: real-time fan-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connected_subscribers_receive_sensor_update() {
    let (app, state) = memory_app();
    let mut rx1 = state.ws_manager.add("dash-1".to_string()).await;
    let mut rx2 = state.ws_manager.add("dash-2".to_string()).await;

    let response = post_json(app, "/api/telemetry", with(json!({ "speed": 125 }))).await;
    let json = body_json(response).await;

    let update1 = text_json(rx1.recv().await.unwrap());
    let update2 = text_json(rx2.recv().await.unwrap());

    assert_eq!(update1, update2);
    assert_eq!(update1["type"], "sensor_update");
    assert_eq!(update1["data"], json["reading"]);
    assert_eq!(update1["alerts"], json["alerts"]);
}

#[tokio::test]
async fn late_subscriber_never_sees_earlier_update() {
    let (app, state) = memory_app();

    post_json(app.clone(), "/api/telemetry", safe_body()).await;

    let mut late = state.ws_manager.add("late".to_string()).await;
    assert_matches!(late.try_recv(), Err(TryRecvError::Empty));

    post_json(app, "/api/telemetry", with(json!({ "speed": 70 }))).await;
    let update = text_json(late.recv().await.unwrap());
    assert_eq!(update["data"]["id"], 2);
}

#[tokio::test]
async fn closed_subscriber_does_not_affect_others() {
    let (app, state) = memory_app();
    let dead = state.ws_manager.add("gone".to_string()).await;
    let mut alive = state.ws_manager.add("alive".to_string()).await;
    drop(dead);

    let response = post_json(app, "/api/telemetry", safe_body()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let update = text_json(alive.recv().await.unwrap());
    assert_eq!(update["data"]["id"], 1);
    assert_eq!(state.ws_manager.connection_count().await, 1);
}
