//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use spu_chat::AnswerPipeline;
use spu_core::config::ApiConfig;

/// Shared application state.
///
/// Cheap to clone; every field is shared. The pipeline is stateless, so
/// concurrent requests never contend on conversation data.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Arc<AnswerPipeline>, config: ApiConfig) -> Self {
        Self {
            pipeline,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
