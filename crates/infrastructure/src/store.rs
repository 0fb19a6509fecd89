use std::sync::Arc;

use chrono::{DateTime, Utc};
use roster_core::RosterResult;
use roster_domain::{RecordSet, ValidationResult};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::source::{fetch_all, RecordSource};

/// 一次成功拉取的记录及其校验结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub records: RecordSet,
    pub result: ValidationResult,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: RecordSet) -> Self {
        let result = records.validate();
        Self {
            records,
            result,
            fetched_at: Utc::now(),
        }
    }
}

/// 记录快照存储
///
/// 刷新失败时保留上一次的快照，读者只会看到完整的新快照或旧快照。
pub struct RecordStore {
    source: Arc<dyn RecordSource>,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl RecordStore {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(None),
        }
    }

    /// 重新拉取三类记录并校验
    pub async fn refresh(&self) -> RosterResult<Arc<Snapshot>> {
        let records = match fetch_all(self.source.as_ref()).await {
            Ok(records) => records,
            Err(e) => {
                warn!(source = %self.source.describe(), "拉取记录失败，保留上一次的数据: {e}");
                return Err(e);
            }
        };

        Ok(self.replace(records).await)
    }

    /// 用给定记录替换当前快照，例如表格编辑之后
    pub async fn replace(&self, records: RecordSet) -> Arc<Snapshot> {
        let snapshot = Arc::new(Snapshot::new(records));
        info!(
            is_valid = snapshot.result.is_valid,
            summary = %snapshot.result.summary(),
            "记录快照已更新"
        );

        *self.snapshot.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
