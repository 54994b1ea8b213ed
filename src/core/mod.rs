//! Core utilities: configuration, errors, logging and retry

pub mod config;
pub mod error;
pub mod logging;
pub mod retry;

// Re-exports for convenience
pub use config::{AnalysisConfig, Config, ConfigError};
pub use error::{AppError, AppResult};
pub use logging::{init_console_logger, init_logger};
pub use retry::RetryPolicy;
