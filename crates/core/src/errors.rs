use thiserror::Error;

/// 服务错误类型定义
///
/// 校验规则本身从不返回错误，违规会被收集进 `ValidationResult`；
/// 这里只描述拉取、配置和服务层面的失败。
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("上游接口返回异常状态: {kind} - HTTP {status}")]
    Upstream { kind: String, status: u16 },

    #[error("网络错误: {0}")]
    Network(String),

    #[error("响应数据格式错误: {0}")]
    Payload(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("未知的记录类型: {0}")]
    UnknownRecordKind(String),

    #[error("尚未加载任何数据快照")]
    NoSnapshot,
}

impl RosterError {
    /// 上游或网络故障，调用方通常保留旧数据
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            RosterError::Upstream { .. } | RosterError::Network(_) | RosterError::Payload(_)
        )
    }
}

/// 统一的Result类型
pub type RosterResult<T> = std::result::Result<T, RosterError>;
