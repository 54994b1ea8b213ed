//! Runtime configuration loaded once at startup.
//!
//! Everything the bot needs (API keys, endpoints, retry knobs) lives in
//! [`Config`], which is built from environment variables and then passed
//! explicitly to whoever needs it. Nothing here is global.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// ImgBB upload defaults
pub mod imgbb {
    /// Public upload endpoint
    pub const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

    /// How long ImgBB keeps the uploaded image (in seconds)
    pub const EXPIRATION_SECS: u64 = 600;
}

/// Vision model defaults
pub mod vision {
    use super::Duration;

    /// OpenAI-compatible proxy used in production
    pub const BASE_URL: &str = "https://api.proxyapi.ru/openai/v1";

    /// Vision-capable multimodal model
    pub const MODEL: &str = "gpt-4o-mini";

    /// Upper bound on the verdict length
    pub const MAX_TOKENS: u32 = 1000;

    /// Total attempts (first call included)
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Fixed pause between attempts (in seconds)
    pub const RETRY_DELAY_SECS: u64 = 2;

    /// Retry delay duration
    pub fn retry_delay() -> Duration {
        Duration::from_secs(RETRY_DELAY_SECS)
    }
}

/// Network configuration
pub mod network {
    /// Request timeout for outbound HTTP calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
}

/// Default log file path
pub const LOG_FILE_PATH: &str = "app.log";

/// Configuration errors. All of them are fatal at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Fully resolved bot configuration.
#[derive(Debug)]
pub struct Config {
    pub telegram_token: SecretString,
    pub bot_api_url: Option<Url>,
    pub imgbb_api_key: SecretString,
    pub imgbb_upload_url: Url,
    pub imgbb_expiration_secs: u64,
    pub openai_api_key: SecretString,
    pub openai_base_url: Url,
    pub openai_model: String,
    pub max_tokens: u32,
    pub analysis_max_attempts: u32,
    pub analysis_retry_delay: Duration,
    pub http_timeout: Duration,
    pub log_file_path: String,
}

/// Settings shared by the bot and the offline `analyze` command.
///
/// The Telegram token is optional here so the CLI can run without one.
#[derive(Debug)]
pub struct AnalysisConfig {
    pub imgbb_api_key: SecretString,
    pub imgbb_upload_url: Url,
    pub imgbb_expiration_secs: u64,
    pub openai_api_key: SecretString,
    pub openai_base_url: Url,
    pub openai_model: String,
    pub max_tokens: u32,
    pub analysis_max_attempts: u32,
    pub analysis_retry_delay: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telegram_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let bot_api_url = get("BOT_API_URL").map(|raw| parse_url("BOT_API_URL", &raw)).transpose()?;
        let analysis = AnalysisConfig::from_lookup(&get)?;

        Ok(Self {
            telegram_token: SecretString::from(telegram_token),
            bot_api_url,
            imgbb_api_key: analysis.imgbb_api_key,
            imgbb_upload_url: analysis.imgbb_upload_url,
            imgbb_expiration_secs: analysis.imgbb_expiration_secs,
            openai_api_key: analysis.openai_api_key,
            openai_base_url: analysis.openai_base_url,
            openai_model: analysis.openai_model,
            max_tokens: analysis.max_tokens,
            analysis_max_attempts: analysis.analysis_max_attempts,
            analysis_retry_delay: analysis.analysis_retry_delay,
            http_timeout: analysis.http_timeout,
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| LOG_FILE_PATH.to_string()),
        })
    }

    /// Splits off the part of the config the analysis pipeline needs.
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            imgbb_api_key: self.imgbb_api_key.clone(),
            imgbb_upload_url: self.imgbb_upload_url.clone(),
            imgbb_expiration_secs: self.imgbb_expiration_secs,
            openai_api_key: self.openai_api_key.clone(),
            openai_base_url: self.openai_base_url.clone(),
            openai_model: self.openai_model.clone(),
            max_tokens: self.max_tokens,
            analysis_max_attempts: self.analysis_max_attempts,
            analysis_retry_delay: self.analysis_retry_delay,
            http_timeout: self.http_timeout,
        }
    }
}

impl AnalysisConfig {
    /// Reads the analysis settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    fn from_lookup(get: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let imgbb_api_key = get("IMGBB_API_KEY").ok_or(ConfigError::Missing("IMGBB_API_KEY"))?;
        let openai_api_key = get("PROXYAPI_API_KEY")
            .or_else(|| get("OPENAI_API_KEY"))
            .ok_or(ConfigError::Missing("PROXYAPI_API_KEY"))?;

        let imgbb_upload_url = parse_url(
            "IMGBB_UPLOAD_URL",
            &get("IMGBB_UPLOAD_URL").unwrap_or_else(|| imgbb::UPLOAD_URL.to_string()),
        )?;
        let openai_base_url = parse_url(
            "OPENAI_BASE_URL",
            &get("OPENAI_BASE_URL").unwrap_or_else(|| vision::BASE_URL.to_string()),
        )?;

        let analysis_max_attempts = parse_number("ANALYSIS_MAX_ATTEMPTS", get("ANALYSIS_MAX_ATTEMPTS"), vision::MAX_ATTEMPTS)?;
        if analysis_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "ANALYSIS_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            imgbb_api_key: SecretString::from(imgbb_api_key),
            imgbb_upload_url,
            imgbb_expiration_secs: parse_number(
                "IMGBB_EXPIRATION_SECS",
                get("IMGBB_EXPIRATION_SECS"),
                imgbb::EXPIRATION_SECS,
            )?,
            openai_api_key: SecretString::from(openai_api_key),
            openai_base_url,
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| vision::MODEL.to_string()),
            max_tokens: parse_number("OPENAI_MAX_TOKENS", get("OPENAI_MAX_TOKENS"), vision::MAX_TOKENS)?,
            analysis_max_attempts,
            analysis_retry_delay: Duration::from_secs(parse_number(
                "ANALYSIS_RETRY_DELAY_SECS",
                get("ANALYSIS_RETRY_DELAY_SECS"),
                vision::RETRY_DELAY_SECS,
            )?),
            http_timeout: Duration::from_secs(parse_number(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                network::REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn parse_number<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("{value:?}: {e}"),
        }),
    }
}
