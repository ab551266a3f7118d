use crate::{
    db::Repository,
    error::{AppError, AppResult},
    models::Product,
    services::scoring::Scorer,
};

/// Builds ranked product recommendations for a stored analysis
///
/// Loads the analysis (NotFound when missing), loads the catalog and hands
/// both to the scorer. Nothing is written back to the repository.
pub async fn recommend_for_analysis(
    repository: &dyn Repository,
    scorer: &Scorer,
    analysis_id: i32,
) -> AppResult<Vec<Product>> {
    let analysis = repository
        .get_analysis(analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))?;

    let catalog = repository.list_products().await?;

    let ranked = scorer.rank(&analysis, &catalog);

    tracing::info!(
        analysis_id,
        catalog_size = catalog.len(),
        returned = ranked.len(),
        "Computed product recommendations"
    );

    Ok(ranked)
}
