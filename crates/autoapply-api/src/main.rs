mod errors;
mod routes;
mod state;

use anyhow::Result;
use autoapply_core::AppConfig;
use autoapply_resume::{ChromiumPdfRenderer, OpenAiOptimizer, PdfExtractor};
use autoapply_scraper::JobScraper;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_with_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,autoapply=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AutoApply API v{}", env!("CARGO_PKG_VERSION"));

    let scraper = Arc::new(JobScraper::new(config.scraper.clone()));
    if config.scraper.credentials.is_configured() {
        info!("Scraper credentials configured; sessions will authenticate");
    } else {
        info!("No scraper credentials; sessions run unauthenticated");
    }

    let optimizer = Arc::new(OpenAiOptimizer::new(config.llm.clone())?);
    info!("LLM optimizer initialized (model: {})", config.llm.model);

    let state = AppState {
        scraper,
        pdf: Arc::new(PdfExtractor),
        optimizer,
        renderer: Arc::new(ChromiumPdfRenderer),
        default_limit: config.scraper.default_limit,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
