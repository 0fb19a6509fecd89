//! # Roster API
//!
//! 记录校验服务的 REST 接口，基于 Axum。
//!
//! ## API 端点
//!
//! - `GET /health` - 健康检查
//! - `POST /api/validate` - 校验请求体中的记录
//! - `POST /api/refresh` - 从数据来源重新拉取并校验
//! - `PUT /api/records` - 用编辑后的记录替换当前快照
//! - `GET /api/grid/{kind}` - 表格视图（列定义、行、问题列表、标红单元格）
//! - `GET /api/grid/clients/{row}/attributes` - 客户属性查看
//!
//! ## 响应格式
//!
//! 成功响应统一包装为 `{ success, data, message, timestamp }`，错误响应为
//! `{ error: { message, type, code, suggestions, timestamp } }`。

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use axum::{extract::DefaultBodyLimit, Router};
use roster_core::ApiConfig;
use roster_infrastructure::RecordStore;
use std::sync::Arc;
use tower::ServiceBuilder;

use middleware::{cors_layer, request_logging, trace_layer};
use routes::{create_routes, AppState};

/// 创建完整的API应用
pub fn create_app(store: Arc<RecordStore>, api_config: &ApiConfig) -> Router {
    let state = AppState { store };

    let app = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(DefaultBodyLimit::max(api_config.max_request_size_bytes()))
            .layer(axum::middleware::from_fn(request_logging)),
    );

    if api_config.cors_enabled {
        app.layer(cors_layer())
    } else {
        app
    }
}
