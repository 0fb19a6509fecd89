use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::coerce::{parse_int_value, to_text, IdKey};
use crate::models::{fields, Record};
use crate::report::{ValidationError, ValidationErrorKind};

use super::check_required;

const REQUIRED_FIELDS: [&str; 3] = [fields::TASK_ID, fields::TASK_NAME, fields::DURATION];

/// 收集任务集合中的任务ID，用于客户请求任务的引用检查
pub fn known_task_ids(tasks: &[Record]) -> HashSet<String> {
    tasks
        .iter()
        .filter_map(|task| match task.get(fields::TASK_ID) {
            Some(value @ (Value::String(_) | Value::Number(_))) => Some(to_text(value)),
            _ => None,
        })
        .collect()
}

/// 校验任务记录
///
/// 重复的任务ID在每一次出现的位置都会被标记，而不只是第二次出现。
pub fn validate_tasks(tasks: &[Record]) -> Vec<ValidationError> {
    let mut occurrences: HashMap<IdKey, usize> = HashMap::new();
    for task in tasks {
        *occurrences
            .entry(IdKey::of(task.get(fields::TASK_ID)))
            .or_default() += 1;
    }

    let mut errors = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        check_required(task, idx, &REQUIRED_FIELDS, &mut errors);

        let key = IdKey::of(task.get(fields::TASK_ID));
        if occurrences.get(&key).copied().unwrap_or_default() > 1 {
            errors.push(ValidationError::new(
                idx,
                fields::TASK_ID,
                ValidationErrorKind::DuplicateIdentifier,
                "Duplicate Task ID",
            ));
        }

        match parse_int_value(task.get(fields::DURATION)) {
            Some(duration) if duration >= 1 => {}
            _ => errors.push(ValidationError::new(
                idx,
                fields::DURATION,
                ValidationErrorKind::OutOfRangeValue,
                "Invalid duration (< 1)",
            )),
        }
    }

    errors
}
