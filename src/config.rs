use serde::Deserialize;

use crate::services::scoring::{Scorer, ScoringWeights};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL. The in-memory store is used when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for facial analysis
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Largest decoded image accepted by /api/analyze
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Points added per recommended ingredient found in a product
    #[serde(default = "default_ingredient_match_points")]
    pub ingredient_match_points: u32,

    /// Points added when a product category equals a recommended category
    #[serde(default = "default_category_match_points")]
    pub category_match_points: u32,

    /// Points added per product benefit mentioning an analysis concern
    #[serde(default = "default_concern_match_points")]
    pub concern_match_points: u32,

    /// Number of products returned by the recommendations endpoint
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Default largest decoded image accepted by /api/analyze
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_ingredient_match_points() -> u32 {
    2
}

fn default_category_match_points() -> u32 {
    3
}

fn default_concern_match_points() -> u32 {
    2
}

fn default_max_recommendations() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Database URL, treating an empty value as unset
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Builds the scorer from the configured weights
    pub fn scorer(&self) -> Scorer {
        Scorer::new(
            ScoringWeights {
                ingredient_match: self.ingredient_match_points,
                category_match: self.category_match_points,
                concern_match: self.concern_match_points,
            },
            self.max_recommendations,
        )
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
