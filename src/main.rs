use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use pantrypal::{
    build_app,
    config::Config,
    llm::LlmClient,
    logging::init_logging,
    models::AppState,
    store::Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Keep guard alive so the file logger flushes correctly
    let _log_guards = init_logging(&config);

    tracing::info!("=== Configuration ===");
    tracing::info!("Bind address: {}", config.bind);
    tracing::info!("Log file: {}", config.log_file.display());
    tracing::info!("Seed data: {}", if config.no_seed { "disabled" } else { "enabled" });
    tracing::info!(
        "LLM API key: {}",
        if config.llm_api_key.as_ref().is_some_and(|k| !k.is_empty()) {
            "<set>"
        } else {
            "<not set>"
        }
    );
    tracing::info!("LLM model: {}", config.llm_model);
    tracing::info!("LLM API URL: {}", config.llm_api_url);
    tracing::info!("====================");

    let store = if config.no_seed {
        Store::new()
    } else {
        Store::seeded()
    };

    let generator = LlmClient::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone().unwrap_or_default(),
        config.llm_model.clone(),
    );

    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        generator: Arc::new(generator),
        config: config.clone(),
    };

    let app = build_app(state);

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("listening on {}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
