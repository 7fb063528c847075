mod config;
mod errors;
mod pipeline;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::fetch::HttpDocumentSource;
use crate::pipeline::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // Document source: single-attempt HTTP GET with timeout and size cap
    let source = HttpDocumentSource::new(config.fetch_timeout(), config.max_document_bytes)?;
    info!(
        "HTTP document source initialized (timeout: {}s, max: {} bytes)",
        config.fetch_timeout_secs, config.max_document_bytes
    );

    let options = config.parse_options();
    info!(
        "Parser options: phone country code {}, reject unsupported formats: {}",
        options.phone_country_code, options.reject_unsupported_formats
    );
    let parser = ResumeParser::new(Arc::new(source), &options);

    let state = AppState {
        parser: Arc::new(parser),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
