//! Dietolog - Telegram bot that reviews meal photos
//!
//! A photo goes through four stages: download from Telegram, JPEG
//! normalization, upload to ImgBB, and a vision-model review with a fixed
//! dietitian prompt. The model's answer is sent back as a reply.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, retry
//! - `conversion`: image format normalization
//! - `analysis`: ImgBB publisher, vision analyzer, photo pipeline
//! - `telegram`: bot setup, dispatcher schema and handlers

pub mod analysis;
pub mod cli;
pub mod conversion;
pub mod core;
pub mod telegram;

// Re-export commonly used types for convenience
pub use analysis::{PhotoEvent, PhotoPipeline, PipelineError};
pub use self::core::{config, AppError, Config};
