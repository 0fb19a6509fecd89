use std::collections::HashSet;

use serde_json::Value;

use crate::coerce::{parse_embedded, parse_int_value, IdKey};
use crate::models::{fields, Record};
use crate::report::{ValidationError, ValidationErrorKind};

/// 校验Worker记录
pub fn validate_workers(workers: &[Record]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (idx, worker) in workers.iter().enumerate() {
        if !seen_ids.insert(IdKey::of(worker.get(fields::WORKER_ID))) {
            errors.push(ValidationError::new(
                idx,
                fields::WORKER_ID,
                ValidationErrorKind::DuplicateIdentifier,
                "Duplicate Worker ID",
            ));
        }

        if let Some(error) = validate_slots(worker, idx) {
            errors.push(error);
        }
    }

    errors
}

/// 解析可用时段列表，每个元素都必须能解释为整数
fn parse_slot_list(worker: &Record) -> Option<Vec<Value>> {
    match parse_embedded(worker.get(fields::AVAILABLE_SLOTS), "[]")? {
        Value::Array(slots) if slots.iter().all(|s| parse_int_value(Some(s)).is_some()) => {
            Some(slots)
        }
        _ => None,
    }
}

/// 验证时段列表格式以及时段数不少于单阶段最大负载
///
/// 容量比较依赖解析成功的时段列表，因此两种错误对同一条记录互斥。
fn validate_slots(worker: &Record, idx: usize) -> Option<ValidationError> {
    let Some(slots) = parse_slot_list(worker) else {
        return Some(ValidationError::new(
            idx,
            fields::AVAILABLE_SLOTS,
            ValidationErrorKind::MalformedEmbeddedList,
            "Malformed slot list",
        ));
    };

    // 无法解析的最大负载不参与比较
    let max_load = parse_int_value(worker.get(fields::MAX_LOAD_PER_PHASE))?;
    let slot_count = i64::try_from(slots.len()).unwrap_or(i64::MAX);
    if slot_count < max_load {
        return Some(ValidationError::new(
            idx,
            fields::AVAILABLE_SLOTS,
            ValidationErrorKind::CapacityViolation,
            "Slots < Max Load",
        ));
    }

    None
}
