use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use healthsmart::adapters::ai::OpenAIProvider;
use healthsmart::adapters::http::router;
use healthsmart::adapters::storage::InMemorySessionStore;
use healthsmart::application::handlers::SessionSweeper;
use healthsmart::application::AppContext;
use healthsmart::config::AppConfig;
use healthsmart::domain::eligibility::ServiceCatalog;
use healthsmart::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let catalog = match &config.session.catalog_path {
        Some(path) => {
            let catalog = ServiceCatalog::load_from_file(path)?;
            tracing::info!(path = %path.display(), "loaded service catalog from file");
            catalog
        }
        None => ServiceCatalog::builtin().clone(),
    };

    let ai: Option<Arc<dyn AIProvider>> = if config.ai.enabled() {
        let api_key = config.ai.api_key.clone().unwrap_or_default();
        let mut provider = OpenAIProvider::new(
            SecretString::new(api_key),
            config.ai.model.clone(),
            Duration::from_secs(config.ai.timeout_secs),
        );
        if let Some(base_url) = &config.ai.base_url {
            provider = provider.with_base_url(base_url.clone());
        }
        tracing::info!(model = %config.ai.model, "AI paraphrasing enabled");
        Some(Arc::new(provider))
    } else {
        tracing::info!("AI paraphrasing disabled, using template responses");
        None
    };

    let sessions = Arc::new(InMemorySessionStore::new());
    let ctx = AppContext::new(
        sessions.clone(),
        ai,
        Arc::new(catalog),
        Duration::from_secs(config.ai.timeout_secs),
    );

    let sweeper = SessionSweeper::new(
        sessions,
        ctx.stats.clone(),
        config.session.idle_timeout_secs,
        Duration::from_secs(config.session.sweep_interval_secs),
    );
    tokio::spawn(sweeper.run());

    let app = router(
        ctx,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.addr();
    tracing::info!(%addr, "starting healthsmart server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
