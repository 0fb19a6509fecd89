//! 三类记录的校验规则
//!
//! 每类记录一个校验函数，由 [`validate_kind`] 按 [`RecordKind`] 穷尽分派。
//! 重复检测使用的集合都在单次调用内创建，调用之间不共享任何状态。

pub mod client;
pub mod task;
pub mod worker;

use std::collections::HashSet;

use tracing::debug;

use crate::coerce::is_blank;
use crate::models::{Record, RecordKind};
use crate::report::{KindErrors, ValidationError, ValidationErrorKind, ValidationResult};

/// 跨表校验所需的上下文
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// 任务集合中出现过的全部任务ID（文本形式）
    pub known_task_ids: HashSet<String>,
}

impl ValidationContext {
    pub fn from_tasks(tasks: &[Record]) -> Self {
        Self {
            known_task_ids: task::known_task_ids(tasks),
        }
    }
}

/// 校验三组记录并生成报告
pub fn validate_all_data(
    clients: &[Record],
    workers: &[Record],
    tasks: &[Record],
) -> ValidationResult {
    let context = ValidationContext::from_tasks(tasks);
    debug!(
        known_task_ids = context.known_task_ids.len(),
        clients = clients.len(),
        workers = workers.len(),
        tasks = tasks.len(),
        "开始校验记录"
    );

    let mut errors = KindErrors::default();
    for kind in RecordKind::ALL {
        let records = match kind {
            RecordKind::Clients => clients,
            RecordKind::Workers => workers,
            RecordKind::Tasks => tasks,
        };
        *errors.get_mut(kind) = validate_kind(kind, records, &context);
    }

    let result = ValidationResult::from_errors(errors);
    debug!(is_valid = result.is_valid, summary = %result.summary(), "记录校验完成");
    result
}

/// 按记录类型选择对应的规则集
pub fn validate_kind(
    kind: RecordKind,
    records: &[Record],
    context: &ValidationContext,
) -> Vec<ValidationError> {
    match kind {
        RecordKind::Clients => client::validate_clients(records, context),
        RecordKind::Workers => worker::validate_workers(records),
        RecordKind::Tasks => task::validate_tasks(records),
    }
}

/// 必填字段检查，按给定顺序逐个报告
pub(crate) fn check_required(
    record: &Record,
    row_index: usize,
    required: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    for field in required {
        if is_blank(record.get(field)) {
            errors.push(ValidationError::new(
                row_index,
                field,
                ValidationErrorKind::MissingRequiredField,
                format!("{field} is required"),
            ));
        }
    }
}
