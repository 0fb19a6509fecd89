//! 配置管理
//!
//! 加载顺序：内置默认值 → TOML 配置文件 → `ROSTER_` 前缀的环境变量（最高优先级）。
//!
//! ```rust,no_run
//! use roster_core::config::AppConfig;
//!
//! let config = AppConfig::load(Some("config/roster.toml")).unwrap();
//! println!("API 监听地址: {}", config.api.bind_address);
//! ```

pub mod models;

pub use models::{ApiConfig, AppConfig, ObservabilityConfig, SourceConfig, SourceLocation};
