//! Vision provider abstraction
//!
//! Facial analysis is delegated to an external vision model. Providers take
//! a checked image payload and return an already validated `FacialAnalysis`,
//! so nothing downstream ever sees raw model output.

use crate::{error::AppResult, models::FacialAnalysis};

pub mod gemini;
pub mod image;
pub mod validation;

pub use gemini::GeminiProvider;
pub use image::{ImageFormat, ImagePayload};

/// Trait for vision analysis providers
#[async_trait::async_trait]
pub trait VisionProvider: Send + Sync {
    /// Analyze a facial photo
    ///
    /// Returns an error when the provider is unreachable or its response
    /// fails validation.
    async fn analyze(&self, image: &ImagePayload) -> AppResult<FacialAnalysis>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
