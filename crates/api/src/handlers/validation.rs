use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use roster_domain::RecordSet;
use serde::Serialize;
use tracing::info;

use crate::{
    error::ApiResult,
    response::{success, success_with_message},
    routes::AppState,
};

/// 刷新结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub is_valid: bool,
    pub clients: usize,
    pub workers: usize,
    pub tasks: usize,
    pub error_count: usize,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// 校验请求体中的记录，不影响当前快照
pub async fn validate_records(
    payload: Result<Json<RecordSet>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(records) = payload?;
    let result = records.validate();
    info!(
        records = records.total_records(),
        summary = %result.summary(),
        "完成请求记录校验"
    );
    Ok(success(result))
}

/// 用编辑后的记录替换当前快照
pub async fn replace_records(
    State(state): State<AppState>,
    payload: Result<Json<RecordSet>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(records) = payload?;
    let snapshot = state.store.replace(records).await;
    Ok(success(snapshot.result.clone()))
}

/// 从数据来源重新拉取并校验
pub async fn refresh_records(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let snapshot = state.store.refresh().await?;

    let summary = RefreshSummary {
        is_valid: snapshot.result.is_valid,
        clients: snapshot.records.clients.len(),
        workers: snapshot.records.workers.len(),
        tasks: snapshot.records.tasks.len(),
        error_count: snapshot.result.error_count(),
        fetched_at: snapshot.fetched_at,
    };
    let message = format!("已刷新: {}", snapshot.result.summary());

    Ok(success_with_message(summary, message))
}
