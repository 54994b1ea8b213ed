//! Handler types and dependencies

use std::sync::Arc;

use crate::analysis::PhotoPipeline;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub pipeline: Arc<PhotoPipeline>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(pipeline: Arc<PhotoPipeline>) -> Self {
        Self { pipeline }
    }
}
