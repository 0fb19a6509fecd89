pub mod kind;
pub mod record;

pub use kind::{ColumnDef, RecordKind};
pub use record::{fields, Record, RecordSet};
