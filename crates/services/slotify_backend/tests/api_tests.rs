use serde_json::{json, Value};
use slotify_backend::{build_app, AppState};
use slotify_config::{AppConfig, DatabaseConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

// Serves the full app on an ephemeral port and returns its base URL
async fn spawn_app(config: AppConfig) -> String {
    let state = AppState::new(Arc::new(config)).await.unwrap();
    let app = build_app(&state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

fn enabled_config() -> AppConfig {
    AppConfig {
        use_chainsync: true,
        database: Some(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_schedule_through_backend() {
    let base = spawn_app(enabled_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chainsync/authorities", base))
        .json(&json!({
            "name": "Dana Reyes",
            "email": "dana@county.gov",
            "role": "Duty Officer",
            "department": "operations",
            "jurisdiction": { "region": "north" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/api/chainsync/schedule-meeting", base))
        .json(&json!({ "alertId": "A1", "alertType": "fire", "severity": "critical" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["meeting"]["meeting"]["durationMinutes"], 90);
    assert_eq!(body["data"]["meeting"]["emergencyOverride"], true);
    assert!(body["data"]["meeting"].get("googleMeetLink").map_or(true, Value::is_null));

    let response = client
        .get(format!("{}/api/chainsync/meetings/A1", base))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_database_disables_chainsync() {
    let base = spawn_app(AppConfig {
        use_chainsync: true,
        ..Default::default()
    })
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chainsync/schedule-meeting", base))
        .json(&json!({ "alertId": "A1", "alertType": "fire", "severity": "critical" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);

    let response = client
        .get(format!("{}/api/chainsync/health", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["enabled"], false);
}

#[tokio::test]
async fn test_root_and_cors() {
    let base = spawn_app(enabled_config()).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/api", base)).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Welcome to Slotify API!");

    let response = client
        .get(format!("{}/api/chainsync/health", base))
        .header("origin", "https://dashboard.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
