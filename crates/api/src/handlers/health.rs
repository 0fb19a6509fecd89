use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.store.current().await;

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "roster",
        "version": env!("CARGO_PKG_VERSION"),
        "source": state.store.source_description(),
        "snapshot_loaded": snapshot.is_some(),
        "last_fetched_at": snapshot.map(|s| s.fetched_at.to_rfc3339()),
    }))
}
