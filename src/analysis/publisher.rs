//! ImgBB client: turns JPEG bytes into a short-lived public URL.
//!
//! The vision API only accepts image URLs, so every photo is uploaded first.
//! Failures are reported as `None`; the caller decides what to tell the user.

use async_trait::async_trait;
use base64::Engine;
use reqwest::multipart::Form;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::core::config::AnalysisConfig;

/// Anything that can make image bytes URL-addressable.
#[async_trait]
pub trait ImagePublisher: Send + Sync {
    /// Uploads a JPEG and returns its public URL, or `None` on any failure.
    async fn publish(&self, jpeg: &[u8]) -> Option<String>;
}

#[derive(Deserialize)]
struct ImgbbResponse {
    data: Option<ImgbbData>,
    #[serde(default = "default_success")]
    success: bool,
}

#[derive(Deserialize)]
struct ImgbbData {
    url: String,
}

fn default_success() -> bool {
    true
}

/// Uploads to the ImgBB v1 API.
pub struct ImgbbPublisher {
    client: Client,
    upload_url: Url,
    api_key: SecretString,
    expiration_secs: u64,
}

impl ImgbbPublisher {
    pub fn new(client: Client, upload_url: Url, api_key: SecretString, expiration_secs: u64) -> Self {
        Self {
            client,
            upload_url,
            api_key,
            expiration_secs,
        }
    }

    pub fn from_config(client: Client, config: &AnalysisConfig) -> Self {
        Self::new(
            client,
            config.imgbb_upload_url.clone(),
            config.imgbb_api_key.clone(),
            config.imgbb_expiration_secs,
        )
    }

    fn form(&self, jpeg: &[u8]) -> Form {
        let encoded = base64::engine::general_purpose::STANDARD.encode(jpeg);
        Form::new()
            .text("key", self.api_key.expose_secret().to_string())
            .text("image", encoded)
            .text("expiration", self.expiration_secs.to_string())
    }

    async fn upload(&self, jpeg: &[u8]) -> Result<String, String> {
        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(self.form(jpeg))
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("failed to read response body: {}", e))?;

        log::info!("ImgBB response status code: {}", status.as_u16());
        log::info!("ImgBB response text: {}", body);

        if status != StatusCode::OK {
            return Err(format!("{} - {}", status.as_u16(), body));
        }

        parse_upload_response(&body)
    }
}

/// Extracts `data.url` from an ImgBB response body.
fn parse_upload_response(body: &str) -> Result<String, String> {
    let parsed: ImgbbResponse = serde_json::from_str(body).map_err(|e| format!("malformed response: {}", e))?;

    if !parsed.success {
        return Err("response reports success=false".to_string());
    }

    parsed
        .data
        .map(|d| d.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| "response has no data.url".to_string())
}

#[async_trait]
impl ImagePublisher for ImgbbPublisher {
    async fn publish(&self, jpeg: &[u8]) -> Option<String> {
        log::info!("Uploading {} bytes to ImgBB", jpeg.len());

        match self.upload(jpeg).await {
            Ok(url) => {
                log::info!("Image uploaded successfully to ImgBB: {}", url);
                Some(url)
            }
            Err(e) => {
                log::error!("Failed to upload image to ImgBB: {}", e);
                None
            }
        }
    }
}
