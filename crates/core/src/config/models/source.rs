use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 记录数据来源配置
///
/// `base_url` 指向提供 `/clients`、`/workers`、`/tasks` 的远程接口，
/// `input_dir` 指向包含 `clients.json` 等文件的本地目录。两者只能选其一。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub input_dir: Option<String>,
    pub request_timeout_seconds: u64,
}

/// 解析后的数据来源
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLocation {
    Remote(String),
    Directory(PathBuf),
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            input_dir: None,
            request_timeout_seconds: 30,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("请求超时时间必须大于0"));
        }

        if self.base_url.is_some() && self.input_dir.is_some() {
            return Err(anyhow::anyhow!("base_url 与 input_dir 不能同时配置"));
        }

        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("base_url 必须以 http:// 或 https:// 开头: {url}"));
            }
        }

        Ok(())
    }

    /// 返回已配置的数据来源，未配置时报错
    pub fn location(&self) -> anyhow::Result<SourceLocation> {
        self.validate()?;
        match (&self.base_url, &self.input_dir) {
            (Some(url), None) => Ok(SourceLocation::Remote(url.trim_end_matches('/').to_string())),
            (None, Some(dir)) => Ok(SourceLocation::Directory(PathBuf::from(dir))),
            _ => Err(anyhow::anyhow!(
                "未配置数据来源，请设置 source.base_url 或 source.input_dir"
            )),
        }
    }
}
