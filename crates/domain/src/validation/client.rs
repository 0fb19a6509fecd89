use std::collections::HashSet;

use crate::coerce::{is_blank, parse_embedded, parse_int_value, to_text, IdKey};
use crate::models::{fields, Record};
use crate::report::{ValidationError, ValidationErrorKind};

use super::{check_required, ValidationContext};

const REQUIRED_FIELDS: [&str; 3] = [
    fields::CLIENT_ID,
    fields::CLIENT_NAME,
    fields::PRIORITY_LEVEL,
];

const MIN_PRIORITY: i64 = 1;
const MAX_PRIORITY: i64 = 5;

/// 校验客户记录
pub fn validate_clients(clients: &[Record], context: &ValidationContext) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (idx, client) in clients.iter().enumerate() {
        check_required(client, idx, &REQUIRED_FIELDS, &mut errors);

        // 空值同样参与重复比较
        if !seen_ids.insert(IdKey::of(client.get(fields::CLIENT_ID))) {
            errors.push(ValidationError::new(
                idx,
                fields::CLIENT_ID,
                ValidationErrorKind::DuplicateIdentifier,
                "Duplicate ClientID",
            ));
        }

        if let Some(error) = validate_priority(client, idx) {
            errors.push(error);
        }

        if let Some(error) = validate_attributes(client, idx) {
            errors.push(error);
        }

        errors.extend(validate_requested_tasks(client, idx, context));
    }

    errors
}

/// 验证优先级在 1-5 之间
fn validate_priority(client: &Record, idx: usize) -> Option<ValidationError> {
    match parse_int_value(client.get(fields::PRIORITY_LEVEL)) {
        Some(priority) if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) => None,
        _ => Some(ValidationError::new(
            idx,
            fields::PRIORITY_LEVEL,
            ValidationErrorKind::OutOfRangeValue,
            "Priority must be 1-5",
        )),
    }
}

/// 验证属性字段是JSON对象（数组和null不算）
fn validate_attributes(client: &Record, idx: usize) -> Option<ValidationError> {
    match parse_embedded(client.get(fields::ATTRIBUTES_JSON), "{}") {
        Some(value) if value.is_object() => None,
        _ => Some(ValidationError::new(
            idx,
            fields::ATTRIBUTES_JSON,
            ValidationErrorKind::MalformedEmbeddedJson,
            "Invalid JSON format",
        )),
    }
}

/// 验证请求的任务ID都存在于任务集合中
fn validate_requested_tasks(
    client: &Record,
    idx: usize,
    context: &ValidationContext,
) -> Vec<ValidationError> {
    let requested = client
        .get(fields::REQUESTED_TASK_IDS)
        .filter(|v| !is_blank(Some(*v)))
        .map(to_text)
        .unwrap_or_default();

    // 只跳过完全为空的片段；查找时去掉首尾空白，消息保留原始片段
    requested
        .split(',')
        .filter(|task_id| !task_id.is_empty())
        .filter(|task_id| !context.known_task_ids.contains(task_id.trim()))
        .map(|task_id| {
            ValidationError::new(
                idx,
                fields::REQUESTED_TASK_IDS,
                ValidationErrorKind::DanglingReference,
                format!("Unknown TaskID: {task_id}"),
            )
        })
        .collect()
}
