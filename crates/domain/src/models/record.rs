use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kind::RecordKind;
use crate::report::ValidationResult;

/// 记录中被界面或校验引用的字段名
pub mod fields {
    /// 远程存储分配的只读主键
    pub const RECORD_ID: &str = "_id";

    pub const CLIENT_ID: &str = "ClientID";
    pub const CLIENT_NAME: &str = "ClientName";
    pub const PRIORITY_LEVEL: &str = "PriorityLevel";
    pub const REQUESTED_TASK_IDS: &str = "RequestedTaskIDs";
    pub const GROUP_TAG: &str = "GroupTag";
    pub const ATTRIBUTES_JSON: &str = "AttributesJSON";

    pub const WORKER_ID: &str = "worker_id";
    pub const WORKER_NAME: &str = "worker_name";
    pub const SKILLS: &str = "skills";
    pub const AVAILABLE_SLOTS: &str = "available_slots";
    pub const MAX_LOAD_PER_PHASE: &str = "max_load_per_phase";
    pub const WORKER_GROUP: &str = "worker_group";
    pub const QUALIFICATION_LEVEL: &str = "qualification_level";

    pub const TASK_ID: &str = "Task ID";
    pub const TASK_NAME: &str = "Task Name";
    pub const CATEGORY: &str = "Category";
    pub const DURATION: &str = "Duration";
    pub const REQUIRED_SKILLS: &str = "Required Skills";
    pub const PREFERRED_PHASES: &str = "Preferred Phases";
    pub const MAX_CONCURRENT: &str = "Max Concurrent";
}

/// 一行记录：字段名到松散类型值的开放映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// 构建器风格的字段赋值，主要用于组装测试数据
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.to_string(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 一次拉取得到的三组记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub clients: Vec<Record>,
    pub workers: Vec<Record>,
    pub tasks: Vec<Record>,
}

impl RecordSet {
    pub fn new(clients: Vec<Record>, workers: Vec<Record>, tasks: Vec<Record>) -> Self {
        Self {
            clients,
            workers,
            tasks,
        }
    }

    pub fn get(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Clients => &self.clients,
            RecordKind::Workers => &self.workers,
            RecordKind::Tasks => &self.tasks,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        crate::validation::validate_all_data(&self.clients, &self.workers, &self.tasks)
    }

    pub fn total_records(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }
}
