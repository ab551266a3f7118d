use serde::{Deserialize, Serialize};

/// A catalog entry
///
/// `match_score` is `None` for catalog reads. The scorer fills it on the
/// copies it returns; it is never written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    /// Price in cents
    pub price: i32,
    pub benefits: Vec<String>,
    pub ingredients: Vec<String>,
    pub suitable_for: Vec<String>,
    #[sqlx(skip)]
    pub match_score: Option<u32>,
}

impl Product {
    /// Returns a copy annotated with a score for one scoring request
    pub fn with_match_score(&self, score: u32) -> Self {
        Self {
            match_score: Some(score),
            ..self.clone()
        }
    }
}
