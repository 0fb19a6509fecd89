use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::RecordKind;

/// 校验错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    MissingRequiredField,
    DuplicateIdentifier,
    OutOfRangeValue,
    MalformedEmbeddedJson,
    MalformedEmbeddedList,
    DanglingReference,
    CapacityViolation,
}

/// 单条规则违规，定位到行号和字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// 记录在输入中的下标（从0开始）
    pub row_index: usize,
    pub field: String,
    pub message: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        row_index: usize,
        field: &str,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            field: field.to_string(),
            message: message.into(),
            kind,
        }
    }

    /// 问题列表中的展示行，行号从1开始
    pub fn display_line(&self) -> String {
        format!("Row {} — {}: {}", self.row_index + 1, self.field, self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// 按记录类型分组的错误
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindErrors {
    #[serde(rename = "Clients", default)]
    pub clients: Vec<ValidationError>,
    #[serde(rename = "Workers", default)]
    pub workers: Vec<ValidationError>,
    #[serde(rename = "Tasks", default)]
    pub tasks: Vec<ValidationError>,
}

impl KindErrors {
    pub fn get(&self, kind: RecordKind) -> &[ValidationError] {
        match kind {
            RecordKind::Clients => &self.clients,
            RecordKind::Workers => &self.workers,
            RecordKind::Tasks => &self.tasks,
        }
    }

    pub fn get_mut(&mut self, kind: RecordKind) -> &mut Vec<ValidationError> {
        match kind {
            RecordKind::Clients => &mut self.clients,
            RecordKind::Workers => &mut self.workers,
            RecordKind::Tasks => &mut self.tasks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.workers.is_empty() && self.tasks.is_empty()
    }

    pub fn total(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }
}

/// 一次校验的完整报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: KindErrors,
}

/// 各类型错误数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub clients: usize,
    pub workers: usize,
    pub tasks: usize,
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clients: {}, Workers: {}, Tasks: {}",
            self.clients, self.workers, self.tasks
        )
    }
}

impl ValidationResult {
    pub fn from_errors(errors: KindErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn errors_for(&self, kind: RecordKind) -> &[ValidationError] {
        self.errors.get(kind)
    }

    pub fn error_count(&self) -> usize {
        self.errors.total()
    }

    pub fn issue_lines(&self, kind: RecordKind) -> Vec<String> {
        self.errors_for(kind)
            .iter()
            .map(ValidationError::display_line)
            .collect()
    }

    /// 表格单元格是否需要标红
    pub fn cell_has_error(&self, kind: RecordKind, row_index: usize, field: &str) -> bool {
        self.errors_for(kind)
            .iter()
            .any(|e| e.row_index == row_index && e.field == field)
    }

    pub fn flagged_cells(&self, kind: RecordKind) -> BTreeSet<(usize, String)> {
        self.errors_for(kind)
            .iter()
            .map(|e| (e.row_index, e.field.clone()))
            .collect()
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            is_valid: self.is_valid,
            clients: self.errors.clients.len(),
            workers: self.errors.workers.len(),
            tasks: self.errors.tasks.len(),
        }
    }
}
