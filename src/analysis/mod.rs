//! Meal photo analysis: ImgBB publishing, the vision model and the pipeline
//! that ties them together.

pub mod pipeline;
pub mod prompt;
pub mod publisher;
pub mod vision;

use reqwest::Client;
use std::sync::Arc;

use crate::core::config::AnalysisConfig;
use crate::core::retry::RetryPolicy;

pub use pipeline::{LocalFileSource, PhotoEvent, PhotoPipeline, PhotoSource, PipelineError};
pub use publisher::{ImagePublisher, ImgbbPublisher};
pub use vision::{OpenAiVision, VisionAnalyzer, VisionError, VisionModel, VisionRequest};

/// Shared HTTP client for ImgBB and the vision API
pub fn build_http_client(config: &AnalysisConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("dietolog/", env!("CARGO_PKG_VERSION")))
        .timeout(config.http_timeout)
        .build()
}

/// Wires the production publisher and analyzer around `source`.
pub fn build_pipeline(config: &AnalysisConfig, source: Arc<dyn PhotoSource>) -> reqwest::Result<PhotoPipeline> {
    let client = build_http_client(config)?;

    let publisher = ImgbbPublisher::from_config(client.clone(), config);
    let model = OpenAiVision::from_config(client, config);
    let retry = RetryPolicy::new()
        .max_attempts(config.analysis_max_attempts)
        .delay(config.analysis_retry_delay);

    log::info!(
        "Vision model {} via {} ({} attempt(s), {:?} apart)",
        config.openai_model,
        model.endpoint(),
        retry.max_attempts,
        retry.delay
    );

    Ok(PhotoPipeline::new(
        source,
        Arc::new(publisher),
        VisionAnalyzer::new(Arc::new(model), retry),
    ))
}
