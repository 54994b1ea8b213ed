//! Photo pipeline: download → normalize → publish → analyze.
//!
//! Each stage has its own failure kind and its own reply text. [`PhotoPipeline::handle`]
//! never fails: whatever happens, the caller gets exactly one string to send
//! back to the chat.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

use super::prompt;
use super::publisher::ImagePublisher;
use super::vision::VisionAnalyzer;
use crate::conversion::{self, ConversionError, SourceFormat};

/// User-facing replies, one per failure kind
pub mod replies {
    pub const FORMAT_FAILED: &str = "Failed to process the image format.";
    pub const UPLOAD_FAILED: &str = "Failed to upload image to ImgBB.";
    pub const ANALYSIS_FAILED: &str = "Failed to analyze image using OpenAI Vision API.";
    pub const UNEXPECTED: &str = "Failed to process the image.";
}

/// A photo to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEvent {
    pub chat_id: i64,
    /// Opaque handle the [`PhotoSource`] understands (Telegram file id, local path)
    pub file_id: String,
    pub caption: Option<String>,
}

impl PhotoEvent {
    pub fn new(chat_id: i64, file_id: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            chat_id,
            file_id: file_id.into(),
            caption: caption.filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Where the raw photo bytes come from.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch(&self, file_id: &str) -> anyhow::Result<Vec<u8>>;
}

/// Reads photos from the local filesystem; `file_id` is a path.
#[derive(Debug, Default, Clone)]
pub struct LocalFileSource;

#[async_trait]
impl PhotoSource for LocalFileSource {
    async fn fetch(&self, file_id: &str) -> anyhow::Result<Vec<u8>> {
        let path = PathBuf::from(file_id);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Ok(bytes)
    }
}

/// Why a photo produced no verdict.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("image format error: {0}")]
    Format(#[from] ConversionError),

    #[error("image upload failed")]
    Upload,

    #[error("image analysis failed")]
    Analysis,

    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl PipelineError {
    /// Text sent back to the chat
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::Format(_) => replies::FORMAT_FAILED,
            PipelineError::Upload => replies::UPLOAD_FAILED,
            PipelineError::Analysis => replies::ANALYSIS_FAILED,
            PipelineError::Unexpected(_) => replies::UNEXPECTED,
        }
    }

    /// Stage name for logs
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Format(_) => "normalize",
            PipelineError::Upload => "publish",
            PipelineError::Analysis => "analyze",
            PipelineError::Unexpected(_) => "unexpected",
        }
    }
}

/// Coordinates the three stages for one photo at a time.
#[derive(Clone)]
pub struct PhotoPipeline {
    source: Arc<dyn PhotoSource>,
    publisher: Arc<dyn ImagePublisher>,
    analyzer: VisionAnalyzer,
}

impl PhotoPipeline {
    pub fn new(source: Arc<dyn PhotoSource>, publisher: Arc<dyn ImagePublisher>, analyzer: VisionAnalyzer) -> Self {
        Self {
            source,
            publisher,
            analyzer,
        }
    }

    /// Runs every stage and returns the verdict or the first failure.
    pub async fn run(&self, event: &PhotoEvent) -> Result<String, PipelineError> {
        let raw = self.source.fetch(&event.file_id).await?;
        log::info!("Downloaded photo: {} bytes", raw.len());

        if let Some(caption) = &event.caption {
            log::info!("Photo has caption: {}", caption);
        }

        let (jpeg, format) = conversion::normalize_to_jpeg_blocking(raw).await.map_err(|e| {
            log::error!("Error processing image format: {}", e);
            e
        })?;
        if format != SourceFormat::Jpeg {
            log::debug!("Normalized {} input to {} bytes of JPEG", format.name(), jpeg.len());
        }

        let image_url = self.publisher.publish(&jpeg).await.ok_or(PipelineError::Upload)?;

        let verdict = self
            .analyzer
            .analyze(&image_url, event.caption.as_deref())
            .await
            .ok_or(PipelineError::Analysis)?;

        if prompt::is_not_food(&verdict) {
            log::info!("No food found in the photo");
        }
        Ok(verdict)
    }

    /// Runs the pipeline and always returns the reply text.
    pub async fn handle(&self, event: &PhotoEvent) -> String {
        let span = tracing::info_span!("photo", chat_id = event.chat_id);

        async {
            match self.run(event).await {
                Ok(verdict) => {
                    log::info!("Analysis complete for chat {}", event.chat_id);
                    verdict
                }
                Err(e) => {
                    log::error!("Error handling photo at stage {}: {}", e.stage(), e);
                    e.user_message().to_string()
                }
            }
        }
        .instrument(span)
        .await
    }
}
