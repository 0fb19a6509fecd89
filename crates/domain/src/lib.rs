//! 客户、Worker、任务三类记录的数据模型与校验
//!
//! 校验入口是 [`validate_all_data`]：对三组记录做一次同步遍历，
//! 返回按记录类型分组、带行号的错误报告。校验从不失败，
//! 所有解析问题都会转换为报告中的条目。

pub mod attributes;
pub mod coerce;
pub mod models;
pub mod report;
pub mod validation;

pub use attributes::AttributeView;
pub use models::{fields, ColumnDef, Record, RecordKind, RecordSet};
pub use report::{
    KindErrors, ValidationError, ValidationErrorKind, ValidationResult, ValidationSummary,
};
pub use validation::{validate_all_data, validate_kind, ValidationContext};
