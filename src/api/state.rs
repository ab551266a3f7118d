use std::sync::Arc;

use crate::{
    config::DEFAULT_MAX_IMAGE_BYTES,
    db::{MemoryRepository, Repository},
    services::{providers::VisionProvider, Scorer},
};

/// Shared application state
///
/// Every collaborator is constructed by the caller and injected here.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub vision: Arc<dyn VisionProvider>,
    pub scorer: Scorer,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        vision: Arc<dyn VisionProvider>,
        scorer: Scorer,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            repository,
            vision,
            scorer,
            max_image_bytes,
        }
    }

    /// State over the seeded in-memory store with default scoring
    pub fn in_memory(vision: Arc<dyn VisionProvider>) -> Self {
        Self::new(
            Arc::new(MemoryRepository::new()),
            vision,
            Scorer::default(),
            DEFAULT_MAX_IMAGE_BYTES,
        )
    }
}
