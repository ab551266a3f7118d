use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skinmatch_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, MemoryRepository, PgRepository, Repository},
    services::providers::{GeminiProvider, VisionProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skinmatch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn Repository> = match config.database_url() {
        Some(url) => {
            let pool = create_pool(url).await?;
            let repository = PgRepository::new(pool);
            repository.initialize().await?;
            Arc::new(repository)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, analyses will be kept in memory");
            Arc::new(MemoryRepository::new())
        }
    };

    let vision: Arc<dyn VisionProvider> = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
    ));

    tracing::info!(
        repository = repository.name(),
        vision = vision.name(),
        max_recommendations = config.max_recommendations,
        "Initialized services"
    );

    let state = AppState::new(repository, vision, config.scorer(), config.max_image_bytes);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
