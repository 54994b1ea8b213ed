//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{chat_completion_json, imgbb_success_json, jpeg_bytes, webp_with_alpha_bytes};
#[allow(unused_imports)]
pub use mocks::{fast_pipeline, imgbb_publisher, openai_vision, TEST_IMGBB_KEY, TEST_OPENAI_KEY};
