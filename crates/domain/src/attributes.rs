use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{parse_embedded, to_text};

/// 客户属性字段的查看视图
///
/// 能解析为JSON对象时给出格式化后的内容，否则原样展示文本。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum AttributeView {
    Structured {
        attributes: Map<String, Value>,
        pretty: String,
    },
    Raw {
        text: String,
    },
}

impl AttributeView {
    pub fn from_value(value: Option<&Value>) -> Self {
        if let Some(Value::Object(attributes)) = parse_embedded(value, "{}") {
            if let Ok(pretty) = serde_json::to_string_pretty(&attributes) {
                return AttributeView::Structured { attributes, pretty };
            }
        }

        AttributeView::Raw {
            text: value.map(to_text).unwrap_or_default(),
        }
    }

    pub fn render(&self) -> &str {
        match self {
            AttributeView::Structured { pretty, .. } => pretty,
            AttributeView::Raw { text } => text,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, AttributeView::Structured { .. })
    }
}
