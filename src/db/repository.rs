use crate::{
    error::AppResult,
    models::{Analysis, NewAnalysis, Product},
};

/// Storage backend for the product catalog and analysis records
///
/// Injected into the application state so handlers and services never
/// reach for a global store.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    /// Lists the full catalog in id order
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Fetches one product by id
    async fn get_product(&self, id: i32) -> AppResult<Option<Product>>;

    /// Fetches one analysis by id
    async fn get_analysis(&self, id: i32) -> AppResult<Option<Analysis>>;

    /// Stores a new analysis and returns it with its assigned id
    async fn create_analysis(&self, analysis: NewAnalysis) -> AppResult<Analysis>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
