//! 记录拉取与快照存储
//!
//! - [`source`]: 从远程接口或本地目录读取三类记录
//! - [`store`]: 保存最近一次成功拉取的记录及其校验结果

pub mod source;
pub mod store;

pub use source::{
    fetch_all, records_from_payload, FileRecordSource, HttpRecordSource, RecordSource,
};
pub use store::{RecordStore, Snapshot};
