use axum::{
    routing::{get, post, put},
    Router,
};
use roster_infrastructure::RecordStore;
use std::sync::Arc;

use crate::handlers::{
    grid::{get_client_attributes, get_grid},
    health::health_check,
    validation::{refresh_records, replace_records, validate_records},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 校验
        .route("/api/validate", post(validate_records))
        .route("/api/refresh", post(refresh_records))
        .route("/api/records", put(replace_records))
        // 表格视图
        .route("/api/grid/{kind}", get(get_grid))
        .route(
            "/api/grid/clients/{row}/attributes",
            get(get_client_attributes),
        )
        .with_state(state)
}
