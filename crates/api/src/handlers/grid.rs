use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use roster_core::RosterError;
use roster_domain::{fields, AttributeView, ColumnDef, Record, RecordKind};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    response::success,
    routes::AppState,
};

/// 单元格坐标，供前端标红
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedCell {
    pub row_index: usize,
    pub field: String,
}

/// 某一类记录的表格视图
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub kind: RecordKind,
    pub columns: &'static [ColumnDef],
    pub rows: Vec<Record>,
    pub issues: Vec<String>,
    pub flagged_cells: Vec<FlaggedCell>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_grid(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let kind: RecordKind = kind.parse()?;
    let snapshot = state.store.current().await.ok_or(RosterError::NoSnapshot)?;

    let flagged_cells = snapshot
        .result
        .flagged_cells(kind)
        .into_iter()
        .map(|(row_index, field)| FlaggedCell { row_index, field })
        .collect();

    Ok(success(GridView {
        kind,
        columns: kind.columns(),
        rows: snapshot.records.get(kind).to_vec(),
        issues: snapshot.result.issue_lines(kind),
        flagged_cells,
        fetched_at: snapshot.fetched_at,
    }))
}

/// 查看某个客户的 AttributesJSON
pub async fn get_client_attributes(
    State(state): State<AppState>,
    Path(row): Path<usize>,
) -> ApiResult<impl IntoResponse> {
    let snapshot = state.store.current().await.ok_or(RosterError::NoSnapshot)?;
    let client = snapshot
        .records
        .get(RecordKind::Clients)
        .get(row)
        .ok_or(ApiError::NotFound)?;

    Ok(success(AttributeView::from_value(
        client.get(fields::ATTRIBUTES_JSON),
    )))
}
