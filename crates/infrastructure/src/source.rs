use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use roster_core::{RosterError, RosterResult};
use roster_domain::{Record, RecordKind, RecordSet};
use serde_json::Value;
use tracing::{debug, error, info};

/// 记录数据来源
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// 拉取一类记录，保持来源中的顺序
    async fn fetch(&self, kind: RecordKind) -> RosterResult<Vec<Record>>;

    /// 用于日志的来源描述
    fn describe(&self) -> String;
}

/// 并发拉取三类记录，任意一类失败则整体失败，不返回部分数据
pub async fn fetch_all(source: &dyn RecordSource) -> RosterResult<RecordSet> {
    let (clients, workers, tasks) = tokio::try_join!(
        source.fetch(RecordKind::Clients),
        source.fetch(RecordKind::Workers),
        source.fetch(RecordKind::Tasks),
    )?;

    info!(
        source = %source.describe(),
        clients = clients.len(),
        workers = workers.len(),
        tasks = tasks.len(),
        "记录拉取完成"
    );

    Ok(RecordSet::new(clients, workers, tasks))
}

/// 从响应体中取出记录列表
///
/// 支持 `{ "data": [...] }` 和裸数组两种形式；`data` 缺失或为 null 时视为空列表。
pub fn records_from_payload(kind: RecordKind, body: Value) -> RosterResult<Vec<Record>> {
    let data = match body {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items),
        _ => {
            return Err(RosterError::Payload(format!(
                "{kind} 响应既不是对象也不是数组"
            )))
        }
    };

    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(Record::from(map)),
                _ => Err(RosterError::Payload(format!(
                    "{kind} 第 {} 条记录不是JSON对象",
                    idx + 1
                ))),
            })
            .collect(),
        _ => Err(RosterError::Payload(format!("{kind} 的 data 字段不是数组"))),
    }
}

/// 远程HTTP接口：`GET {base_url}/clients` 等
pub struct HttpRecordSource {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpRecordSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RosterResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RosterError::Network(format!("创建HTTP客户端失败: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn url_for(&self, kind: RecordKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, kind: RecordKind) -> RosterResult<Vec<Record>> {
        let url = self.url_for(kind);
        debug!("请求记录: {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            error!("请求 {} 失败: {}", url, e);
            RosterError::Network(format!("请求 {url} 失败: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} 返回异常状态: HTTP {}", url, status);
            return Err(RosterError::Upstream {
                kind: kind.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RosterError::Payload(format!("{kind} 响应不是有效的JSON: {e}")))?;

        records_from_payload(kind, body)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// 本地目录：`{dir}/clients.json` 等
pub struct FileRecordSource {
    dir: PathBuf,
}

impl FileRecordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch(&self, kind: RecordKind) -> RosterResult<Vec<Record>> {
        let path = self.path_for(kind);
        debug!("读取记录文件: {}", path.display());

        let content = tokio::fs::read_to_string(&path).await?;
        let body: Value = serde_json::from_str(&content)?;
        records_from_payload(kind, body)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
