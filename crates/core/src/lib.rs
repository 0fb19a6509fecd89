pub mod config;
pub mod errors;
pub mod logging;

pub use config::{ApiConfig, AppConfig, SourceConfig};
pub use errors::*;
pub use logging::{init_logging, LogFormat};
