mod analysis;
mod ats;
mod config;
mod contact;
mod errors;
mod extraction;
mod routes;
mod skills;
mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisContext;
use crate::ats::{AtsScorer, ScoringConfig};
use crate::config::Config;
use crate::routes::build_router;
use crate::skills::SkillTaxonomy;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = match &config.skill_taxonomy_path {
        Some(path) => SkillTaxonomy::from_path(path)
            .with_context(|| format!("Failed to load skill taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin().context("Built-in skill taxonomy is invalid")?,
    };
    info!("Skill taxonomy loaded ({} skills)", taxonomy.len());

    let scoring = match &config.scoring_config_path {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    };
    info!(
        "ATS scoring config loaded ({})",
        config
            .scoring_config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );

    let state = AppState {
        config: config.clone(),
        analysis: AnalysisContext::new(
            taxonomy,
            AtsScorer::new(&scoring),
            config.max_concurrent_analyses,
        ),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        "Listening on {addr} (timeout {:?}, upload limit {} bytes, {} concurrent analyses)",
        config.analysis_timeout, config.max_upload_bytes, config.max_concurrent_analyses
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
