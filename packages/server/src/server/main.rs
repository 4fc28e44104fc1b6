// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use image_edit_client::ImageEditClient;
use server_core::kernel::{BaseImageEditor, ImageEditAdapter, ServerDeps};
use server_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,trend_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Beauty Trends API");

    // Load configuration (missing trend agent credentials stop startup here)
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let image_editor: Option<Arc<dyn BaseImageEditor>> = match &config.azure_openai_api_key {
        Some(key) => {
            let client = ImageEditClient::new(config.image_edit_url.clone(), key.clone())
                .with_model(config.image_edit_model.clone());
            Some(Arc::new(ImageEditAdapter::new(client)) as Arc<dyn BaseImageEditor>)
        }
        None => {
            tracing::warn!("AZURE_OPENAI_API_KEY not set; image transforms will report an error");
            None
        }
    };

    let trend_agents = trend_agent::ai::gemini_agents(&config.trend_agent)
        .context("Failed to build trend agents")?;
    tracing::info!(agents = ?trend_agents.names(), "Trend agents ready");

    let app = build_app(
        ServerDeps::new(image_editor, trend_agents),
        &config.allowed_origins,
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
