use thiserror::Error;

use crate::analysis::PipelineError;
use crate::core::config::ConfigError;

/// Centralized error type for the application edge
///
/// Stage-level code uses its own narrow error enums; they are folded into this
/// one where startup, the CLI or the Telegram layer need a single type.
///
/// # Example
///
/// ```no_run
/// use dietolog::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A pipeline stage failed
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
