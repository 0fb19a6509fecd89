//! 松散类型值的解释规则
//!
//! 记录来自外部表格，同一字段可能是字符串、数字甚至缺失。
//! 校验规则依赖以下解释方式：空值判断、文本化、整数前缀解析、标识键。

use serde_json::{Number, Value};

/// 缺失、`null`、空字符串、`0`、`false` 视为空值
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

/// 值的文本形式；数组按元素逗号拼接，对象固定为 `[object Object]`
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// 从文本开头解析整数
///
/// 跳过前导空白，允许正负号和 `0x` 前缀，读取最长的数字前缀；
/// 没有任何数字时返回 `None`。超出范围时饱和。
pub fn parse_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else {
        (10, rest)
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// 字段值的整数解释；缺失字段不是数字
pub fn parse_int_value(value: Option<&Value>) -> Option<i64> {
    value.and_then(|v| parse_int(&to_text(v)))
}

/// 内嵌 JSON 字段的解析
///
/// 空值时解析 `default`；其他值先转成文本再按 JSON 解析，失败返回 `None`。
/// 原生对象的文本是 `[object Object]`，因此不会被当作已解析的数据。
pub fn parse_embedded(value: Option<&Value>, default: &str) -> Option<Value> {
    if is_blank(value) {
        return serde_json::from_str(default).ok();
    }
    serde_json::from_str(&to_text(value?)).ok()
}

/// 重复检测使用的标识键
///
/// 不同类别互不相等：字符串 `"1"` 与数字 `1` 是两个不同的标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdKey {
    Absent,
    Null,
    Bool(bool),
    Text(String),
    Number(String),
    Composite(String),
}

impl IdKey {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => IdKey::Absent,
            Some(Value::Null) => IdKey::Null,
            Some(Value::Bool(b)) => IdKey::Bool(*b),
            Some(Value::String(s)) => IdKey::Text(s.clone()),
            // 1 与 1.0 视为同一个数
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => {
                    IdKey::Number((f as i64).to_string())
                }
                _ => IdKey::Number(number_text(n)),
            },
            Some(other) => IdKey::Composite(other.to_string()),
        }
    }
}
