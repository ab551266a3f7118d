use crate::{
    db::Repository,
    error::AppResult,
    models::{Analysis, NewAnalysis},
    services::providers::{ImagePayload, VisionProvider},
};

/// Runs a submitted photo through the vision provider and stores the result
///
/// The image is checked before any provider call. Provider output has
/// already passed the validation boundary by the time it is persisted.
pub async fn analyze_image(
    repository: &dyn Repository,
    provider: &dyn VisionProvider,
    image: &str,
    max_image_bytes: usize,
) -> AppResult<Analysis> {
    let payload = ImagePayload::from_base64(image, max_image_bytes)?;

    tracing::info!(
        provider = provider.name(),
        mime_type = payload.mime_type(),
        "Requesting facial analysis"
    );

    let facial = provider.analyze(&payload).await?;

    let stored = repository
        .create_analysis(NewAnalysis::new(payload.data_url(), facial))
        .await?;

    tracing::info!(
        analysis_id = stored.id,
        repository = repository.name(),
        "Analysis stored"
    );

    Ok(stored)
}
