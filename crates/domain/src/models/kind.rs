use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use roster_core::RosterError;

use super::record::fields;

/// 记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Clients,
    Workers,
    Tasks,
}

/// 表格列定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: &'static str,
    pub header_name: &'static str,
    pub editable: bool,
}

const fn column(field: &'static str, header_name: &'static str, editable: bool) -> ColumnDef {
    ColumnDef {
        field,
        header_name,
        editable,
    }
}

const CLIENT_COLUMNS: &[ColumnDef] = &[
    column(fields::RECORD_ID, "ID", false),
    column(fields::CLIENT_ID, "Client ID", true),
    column(fields::CLIENT_NAME, "Client Name", true),
    column(fields::PRIORITY_LEVEL, "Priority", true),
    column(fields::REQUESTED_TASK_IDS, "Task IDs", true),
    column(fields::GROUP_TAG, "Group", true),
    // 通过属性查看器展示，不在表格内直接编辑
    column(fields::ATTRIBUTES_JSON, "Attributes", false),
];

const WORKER_COLUMNS: &[ColumnDef] = &[
    column(fields::RECORD_ID, "ID", false),
    column(fields::WORKER_ID, "Worker ID", true),
    column(fields::WORKER_NAME, "Worker Name", true),
    column(fields::SKILLS, "Skills", true),
    column(fields::AVAILABLE_SLOTS, "Available Slots", true),
    column(fields::MAX_LOAD_PER_PHASE, "Max Load", true),
    column(fields::WORKER_GROUP, "Group", true),
    column(fields::QUALIFICATION_LEVEL, "Qualification", true),
];

const TASK_COLUMNS: &[ColumnDef] = &[
    column(fields::RECORD_ID, "ID", false),
    column(fields::TASK_ID, "Task ID", true),
    column(fields::TASK_NAME, "Task Name", true),
    column(fields::CATEGORY, "Category", true),
    column(fields::DURATION, "Duration", true),
    column(fields::REQUIRED_SKILLS, "Required Skills", true),
    column(fields::PREFERRED_PHASES, "Preferred Phases", true),
    column(fields::MAX_CONCURRENT, "Max Concurrent", true),
];

impl RecordKind {
    /// 展示顺序
    pub const ALL: [RecordKind; 3] = [RecordKind::Clients, RecordKind::Workers, RecordKind::Tasks];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Clients => "Clients",
            RecordKind::Workers => "Workers",
            RecordKind::Tasks => "Tasks",
        }
    }

    /// 远程接口路径
    pub fn endpoint(&self) -> &'static str {
        match self {
            RecordKind::Clients => "/clients",
            RecordKind::Workers => "/workers",
            RecordKind::Tasks => "/tasks",
        }
    }

    /// 本地数据目录中的文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Clients => "clients.json",
            RecordKind::Workers => "workers.json",
            RecordKind::Tasks => "tasks.json",
        }
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        match self {
            RecordKind::Clients => CLIENT_COLUMNS,
            RecordKind::Workers => WORKER_COLUMNS,
            RecordKind::Tasks => TASK_COLUMNS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clients" => Ok(RecordKind::Clients),
            "workers" => Ok(RecordKind::Workers),
            "tasks" => Ok(RecordKind::Tasks),
            _ => Err(RosterError::UnknownRecordKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Clients".parse::<RecordKind>().unwrap(), RecordKind::Clients);
        assert_eq!("workers".parse::<RecordKind>().unwrap(), RecordKind::Workers);
        assert_eq!("TASKS".parse::<RecordKind>().unwrap(), RecordKind::Tasks);
        assert!(matches!(
            "projects".parse::<RecordKind>(),
            Err(RosterError::UnknownRecordKind(_))
        ));
    }

    #[test]
    fn test_kind_endpoints() {
        let endpoints: Vec<_> = RecordKind::ALL.iter().map(|k| k.endpoint()).collect();
        assert_eq!(endpoints, vec!["/clients", "/workers", "/tasks"]);
    }

    #[test]
    fn test_columns_start_with_readonly_id() {
        for kind in RecordKind::ALL {
            let first = kind.columns()[0];
            assert_eq!(first.field, fields::RECORD_ID);
            assert!(!first.editable);
        }
    }

    #[test]
    fn test_attributes_column_not_editable() {
        let attributes = RecordKind::Clients
            .columns()
            .iter()
            .find(|c| c.field == fields::ATTRIBUTES_JSON)
            .unwrap();
        assert!(!attributes.editable);
        assert_eq!(RecordKind::Tasks.columns().len(), 8);
    }
}
