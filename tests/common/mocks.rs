//! Production clients pointed at wiremock servers

#![allow(dead_code)]

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::MockServer;

use dietolog::analysis::{ImgbbPublisher, OpenAiVision, PhotoPipeline, PhotoSource, VisionAnalyzer};
use dietolog::core::RetryPolicy;

pub const TEST_IMGBB_KEY: &str = "imgbb-test-key";
pub const TEST_OPENAI_KEY: &str = "openai-test-key";

/// Pause used instead of the production 2s in wiremock tests
pub const FAST_RETRY_DELAY: Duration = Duration::from_millis(10);

pub fn imgbb_publisher(server: &MockServer) -> ImgbbPublisher {
    let upload_url = Url::parse(&format!("{}/1/upload", server.uri())).expect("upload url");
    ImgbbPublisher::new(
        reqwest::Client::new(),
        upload_url,
        SecretString::from(TEST_IMGBB_KEY.to_string()),
        600,
    )
}

pub fn openai_vision(server: &MockServer) -> OpenAiVision {
    let base_url = Url::parse(&format!("{}/v1", server.uri())).expect("base url");
    OpenAiVision::new(
        reqwest::Client::new(),
        &base_url,
        SecretString::from(TEST_OPENAI_KEY.to_string()),
        "gpt-4o-mini",
        1000,
    )
}

/// Full pipeline with three attempts 10ms apart
pub fn fast_pipeline(imgbb: &MockServer, openai: &MockServer, source: Arc<dyn PhotoSource>) -> PhotoPipeline {
    let analyzer = VisionAnalyzer::new(
        Arc::new(openai_vision(openai)),
        RetryPolicy::new().max_attempts(3).delay(FAST_RETRY_DELAY),
    );
    PhotoPipeline::new(source, Arc::new(imgbb_publisher(imgbb)), analyzer)
}
