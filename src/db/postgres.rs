use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};

use crate::{
    db::Repository,
    error::AppResult,
    models::{sample_products, Analysis, FacialFeatures, NewAnalysis, Product, Recommendation},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Row shape of the `analyses` table
#[derive(sqlx::FromRow)]
struct AnalysisRow {
    id: i32,
    image_url: String,
    features: Json<FacialFeatures>,
    skin_type: String,
    concerns: Vec<String>,
    recommendations: Json<Vec<Recommendation>>,
    created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for Analysis {
    fn from(row: AnalysisRow) -> Self {
        Analysis {
            id: row.id,
            image_url: row.image_url,
            features: row.features.0,
            skin_type: row.skin_type,
            concerns: row.concerns,
            recommendations: row.recommendations.0,
            created_at: row.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, category, image_url, price, benefits, ingredients, suitable_for";

const ANALYSIS_COLUMNS: &str =
    "id, image_url, features, skin_type, concerns, recommendations, created_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs migrations and seeds the catalog when the products table is empty
    pub async fn initialize(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;

        let mut tx = self.pool.begin().await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        if count == 0 {
            let catalog = sample_products();
            for product in &catalog {
                sqlx::query(
                    r#"
                    INSERT INTO products
                        (name, description, category, image_url, price, benefits, ingredients, suitable_for)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(&product.name)
                .bind(&product.description)
                .bind(&product.category)
                .bind(&product.image_url)
                .bind(product.price)
                .bind(&product.benefits)
                .bind(&product.ingredients)
                .bind(&product.suitable_for)
                .execute(&mut *tx)
                .await?;
            }

            tracing::info!(products = catalog.len(), "Seeded product catalog");
        }

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Repository for PgRepository {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products ORDER BY id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_product(&self, id: i32) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn get_analysis(&self, id: i32) -> AppResult<Option<Analysis>> {
        let row = sqlx::query_as::<_, AnalysisRow>(&format!(
            "SELECT {} FROM analyses WHERE id = $1",
            ANALYSIS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Analysis::from))
    }

    async fn create_analysis(&self, analysis: NewAnalysis) -> AppResult<Analysis> {
        let NewAnalysis {
            image_url,
            analysis,
        } = analysis;

        let row = sqlx::query_as::<_, AnalysisRow>(&format!(
            r#"
            INSERT INTO analyses (image_url, features, skin_type, concerns, recommendations)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ANALYSIS_COLUMNS
        ))
        .bind(image_url)
        .bind(Json(analysis.features))
        .bind(analysis.skin_type)
        .bind(analysis.concerns)
        .bind(Json(analysis.recommendations))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(analysis_id = row.id, "Stored analysis in database");

        Ok(row.into())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
