//! Image and JSON fixtures built in memory

#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};

/// A small JPEG "plate": warm gradient, no alpha
pub fn jpeg_bytes() -> Vec<u8> {
    let img = RgbImage::from_fn(32, 24, |x, y| Rgb([200 + (x % 50) as u8, 150 + (y % 80) as u8, 90]));
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90).encode_image(&img).expect("encode jpeg fixture");
    out
}

/// Lossless WebP with a transparent half, like a sticker
pub fn webp_with_alpha_bytes() -> Vec<u8> {
    let img = RgbaImage::from_fn(32, 24, |x, _| Rgba([60, 60, 70, if x < 16 { 0 } else { 255 }]));
    let mut out = Vec::new();
    WebPEncoder::new_lossless(&mut out)
        .write_image(img.as_raw(), 32, 24, ExtendedColorType::Rgba8)
        .expect("encode webp fixture");
    out
}

/// Successful ImgBB upload response
pub fn imgbb_success_json(url: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "id": "2ndCYJK",
            "title": "c1f64245afb2",
            "url_viewer": "https://ibb.co/2ndCYJK",
            "url": url,
            "display_url": url,
            "expiration": "600"
        },
        "success": true,
        "status": 200
    })
}

/// Chat completion response with a single choice
pub fn chat_completion_json(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1735992000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 900, "completion_tokens": 40, "total_tokens": 940 }
    })
}
