use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::Repository,
    error::AppResult,
    models::{sample_products, Analysis, NewAnalysis, Product},
};

/// In-process store used when no database is configured
pub struct MemoryRepository {
    products: Vec<Product>,
    analyses: RwLock<AnalysisTable>,
}

struct AnalysisTable {
    rows: HashMap<i32, Analysis>,
    next_id: i32,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    /// Creates a store seeded with the sample catalog
    pub fn new() -> Self {
        Self::with_products(sample_products())
    }

    /// Creates a store over an arbitrary catalog, kept in the given order
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            analyses: RwLock::new(AnalysisTable {
                rows: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_analysis(&self, id: i32) -> AppResult<Option<Analysis>> {
        let table = self.analyses.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create_analysis(&self, analysis: NewAnalysis) -> AppResult<Analysis> {
        let mut table = self.analyses.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let stored = Analysis::from_new(id, analysis, Utc::now());
        table.rows.insert(id, stored.clone());

        tracing::debug!(analysis_id = id, "Stored analysis in memory");

        Ok(stored)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacialAnalysis;

    fn new_analysis(skin_type: &str) -> NewAnalysis {
        NewAnalysis::new(
            "data:image/jpeg;base64,AAAA".to_string(),
            FacialAnalysis {
                skin_type: skin_type.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_lists_seeded_catalog_in_order() {
        let repo = MemoryRepository::new();
        let products = repo.list_products().await.unwrap();
        let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_get_product() {
        let repo = MemoryRepository::new();
        let product = repo.get_product(2).await.unwrap().unwrap();
        assert_eq!(product.name, "Natural Glow Serum");
        assert!(repo.get_product(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_analysis_ids_auto_increment() {
        let repo = MemoryRepository::new();

        let first = repo.create_analysis(new_analysis("dry")).await.unwrap();
        let second = repo.create_analysis(new_analysis("oily")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let fetched = repo.get_analysis(2).await.unwrap().unwrap();
        assert_eq!(fetched.skin_type, "oily");
        assert!(repo.get_analysis(3).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = std::sync::Arc::new(MemoryRepository::new());

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create_analysis(new_analysis("normal")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            let stored = tokio_test::assert_ok!(task.await.unwrap());
            ids.push(stored.id);
        }

        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<i32>>());
        tokio_test::assert_ok!(repo.get_analysis(32).await).unwrap();
    }
}
