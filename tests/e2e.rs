//! End-to-end tests: boot the real server on an ephemeral port and drive
//! it over HTTP.

use learning_trainer::server::{build_router, AppState};
use learning_trainer::storage::SqliteStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

async fn spawn_server() -> SocketAddr {
    let store = SqliteStore::open_in_memory().unwrap();
    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn home_page_shows_main_heading() {
    let addr = spawn_server().await;

    let body = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("<h1>Learning Trainer</h1>"));
    assert!(body.contains("<title>Learning Trainer</title>"));
    assert!(body.contains("AI-powered learning agent system"));
}

#[tokio::test]
async fn health_reports_database() {
    let addr = spawn_server().await;

    let health: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], "memory");
    assert!(health["vector_search"].is_boolean());
}

#[tokio::test]
async fn stats_reports_empty_counts() {
    let addr = spawn_server().await;

    let stats: serde_json::Value = reqwest::get(format!("http://{}/stats", addr))
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["users"], 0);
    assert_eq!(stats["questions"], 0);
}
