//! Image format conversion.
//!
//! The vision pipeline only ever publishes JPEG, so everything a user sends
//! (Telegram photos are usually JPEG, stickers and forwarded images are often
//! WebP) passes through [`image::normalize_to_jpeg`] first.

pub mod image;

use thiserror::Error;

/// Errors that can occur during conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Unsupported or unrecognized image format")]
    UnknownFormat,

    #[error("Failed to decode {format} image: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: ::image::ImageError,
    },

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[source] ::image::ImageError),

    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ConversionResult<T> = Result<T, ConversionError>;

pub use self::image::{normalize_to_jpeg, normalize_to_jpeg_blocking, SourceFormat};
