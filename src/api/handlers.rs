use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Analysis, Product},
    services::{analysis, recommendations},
};

use super::extract::{AppJson, AppPath};
use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the product catalog
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.repository.list_products().await?;
    Ok(Json(products))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Product>> {
    state
        .repository
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Analyze a submitted photo and store the result
pub async fn analyze(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<AnalyzeRequest>,
) -> AppResult<Json<Analysis>> {
    let image = request
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Image is required".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        image_len = image.len(),
        "Processing analysis request"
    );

    let analysis = analysis::analyze_image(
        state.repository.as_ref(),
        state.vision.as_ref(),
        &image,
        state.max_image_bytes,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        analysis_id = analysis.id,
        "Analysis completed"
    );

    Ok(Json(analysis))
}

/// Get a stored analysis
pub async fn get_analysis(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Analysis>> {
    state
        .repository
        .get_analysis(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))
}

/// Ranked product recommendations for a stored analysis
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Vec<Product>>> {
    tracing::info!(
        request_id = %request_id,
        analysis_id = id,
        "Processing recommendations request"
    );

    let products =
        recommendations::recommend_for_analysis(state.repository.as_ref(), &state.scorer, id)
            .await?;

    Ok(Json(products))
}
