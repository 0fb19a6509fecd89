use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::RosterError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("服务错误: {0}")]
    Roster(#[from] RosterError),

    #[error("请求体无效: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("未找到资源")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_type, suggestions) = match &self {
            ApiError::Roster(RosterError::UnknownRecordKind(kind)) => (
                StatusCode::NOT_FOUND,
                format!("未知的记录类型: {kind}"),
                "UNKNOWN_RECORD_KIND".to_string(),
                vec!["可用的记录类型: clients, workers, tasks".to_string()],
            ),
            ApiError::Roster(RosterError::NoSnapshot) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "尚未加载任何数据".to_string(),
                "NO_SNAPSHOT".to_string(),
                vec!["使用 POST /api/refresh 从数据来源加载记录".to_string()],
            ),
            ApiError::Roster(err) if err.is_fetch_failure() => (
                StatusCode::BAD_GATEWAY,
                format!("拉取记录失败: {err}"),
                "UPSTREAM_ERROR".to_string(),
                vec![
                    "请检查数据来源是否可用".to_string(),
                    "上一次成功拉取的数据仍然保留".to_string(),
                ],
            ),
            ApiError::Roster(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "系统内部错误".to_string(),
                "INTERNAL_ERROR".to_string(),
                vec![format!("错误详情: {err}")],
            ),
            ApiError::InvalidBody(rejection) => (
                rejection.status(),
                "请求体不是有效的记录集合".to_string(),
                "INVALID_REQUEST_BODY".to_string(),
                vec![
                    "请求体应为 { clients, workers, tasks }，每项都是对象数组".to_string(),
                    format!("详细错误: {}", rejection.body_text()),
                ],
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "请求的资源不存在".to_string(),
                "NOT_FOUND".to_string(),
                vec!["请检查请求URL和行号是否正确".to_string()],
            ),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
