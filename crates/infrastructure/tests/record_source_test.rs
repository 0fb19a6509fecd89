use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use roster_core::RosterError;
use roster_domain::RecordKind;
use roster_infrastructure::{fetch_all, FileRecordSource, HttpRecordSource, RecordSource};
use serde_json::json;

async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn upstream_router() -> Router {
    Router::new()
        .route(
            "/api/clients",
            get(|| async {
                Json(json!({"data": [
                    {"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": "2", "RequestedTaskIDs": "T1"}
                ]}))
            }),
        )
        .route(
            "/api/workers",
            get(|| async { Json(json!({"message": "no workers yet"})) }),
        )
        .route(
            "/api/tasks",
            get(|| async {
                Json(json!({"data": [
                    {"Task ID": "T1", "Task Name": "Ingest", "Duration": 3}
                ]}))
            }),
        )
}

#[tokio::test]
async fn test_http_source_fetches_all_kinds() {
    let addr = spawn_upstream(upstream_router()).await;
    let source = HttpRecordSource::new(format!("http://{addr}/api"), Duration::from_secs(5)).unwrap();

    let set = fetch_all(&source).await.unwrap();

    assert_eq!(set.clients.len(), 1);
    assert!(set.workers.is_empty());
    assert_eq!(set.tasks.len(), 1);
    assert!(set.validate().is_valid);
}

#[tokio::test]
async fn test_http_source_reports_upstream_status() {
    let router = upstream_router().route(
        "/broken/tasks",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_upstream(router).await;
    let source = HttpRecordSource::new(format!("http://{addr}/broken"), Duration::from_secs(5)).unwrap();

    match source.fetch(RecordKind::Tasks).await {
        Err(RosterError::Upstream { kind, status }) => {
            assert_eq!(kind, "Tasks");
            assert_eq!(status, 500);
        }
        other => panic!("Expected upstream error, got {other:?}"),
    }

    // clients 路由不存在，整体拉取失败
    assert!(fetch_all(&source).await.is_err());
}

#[tokio::test]
async fn test_http_source_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpRecordSource::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let result = source.fetch(RecordKind::Clients).await;
    assert!(matches!(result, Err(RosterError::Network(_))));
}

#[tokio::test]
async fn test_file_source_reads_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("clients.json"),
        r#"{"data": [{"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 1}]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("workers.json"),
        r#"[{"worker_id": "W1", "available_slots": "[1]", "max_load_per_phase": 2}]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("tasks.json"), r#"{"data": []}"#).unwrap();

    let source = FileRecordSource::new(dir.path());
    let set = fetch_all(&source).await.unwrap();

    assert_eq!(set.clients.len(), 1);
    assert_eq!(set.workers.len(), 1);
    let result = set.validate();
    assert!(!result.is_valid);
    assert_eq!(result.errors.workers[0].message, "Slots < Max Load");
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileRecordSource::new(dir.path());

    let result = source.fetch(RecordKind::Clients).await;
    assert!(matches!(result, Err(RosterError::Io(_))));
}

#[tokio::test]
async fn test_file_source_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{not json").unwrap();
    let source = FileRecordSource::new(dir.path());

    let result = source.fetch(RecordKind::Tasks).await;
    assert!(matches!(result, Err(RosterError::Serialization(_))));
}
