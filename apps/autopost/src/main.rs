mod catalog;
mod config;
mod db;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod models;
mod pipeline;
mod publish;
mod render;
mod routes;
mod scheduler;
mod state;
mod store;
mod uniqueness;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RunMode};
use crate::db::{create_pool, ensure_schema};
use crate::generation::protocol::QuoteGenerator;
use crate::generation::random::Dice;
use crate::llm_client::LlmClient;
use crate::pipeline::{Orchestrator, PipelineSettings};
use crate::publish::{FacebookClient, Publisher};
use crate::render::PngCardRenderer;
use crate::routes::build_router;
use crate::scheduler::{ScheduleSettings, Scheduler};
use crate::state::AppState;
use crate::store::seed::seed_reference_data;
use crate::store::{PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting autopost v{} (mode: {:?})",
        env!("CARGO_PKG_VERSION"),
        config.run_mode
    );

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));

    let report = seed_reference_data(store.as_ref())
        .await
        .context("Failed to seed reference data")?;
    info!(
        "Reference data ready ({} categories, {} personas inserted)",
        report.categories_inserted, report.personas_inserted
    );

    if config.run_mode == RunMode::Seed {
        pool.close().await;
        return Ok(());
    }

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());

    let publisher: Arc<dyn Publisher> = Arc::new(FacebookClient::new(
        config.facebook_page_id.clone(),
        config.facebook_page_access_token.clone(),
    )?);

    let renderer = Arc::new(PngCardRenderer::new(
        config.image_output_dir.clone(),
        config.font_dir.as_deref(),
    ));
    info!("Card output directory: {}", renderer.output_dir().display());

    let dice = Arc::new(Dice::from_entropy());
    let orchestrator = Arc::new(Orchestrator::new(
        store.clone(),
        QuoteGenerator::new(Arc::new(llm)),
        renderer,
        publisher.clone(),
        dice.clone(),
        PipelineSettings {
            brand_name: config.brand_name.clone(),
            persona_hints: config.persona_hints,
            ..PipelineSettings::default()
        },
    ));

    let result = match config.run_mode {
        RunMode::Once => run_once(&orchestrator).await,
        _ => serve(&config, store, publisher, orchestrator, dice).await,
    };

    pool.close().await;
    result
}

async fn run_once(orchestrator: &Orchestrator) -> Result<()> {
    let published = orchestrator.create_and_publish().await?;
    info!(
        "Published \"{}\" as {} after {} attempt(s)",
        published.post.quote,
        published.post.publish_id.as_deref().unwrap_or("-"),
        published.attempts
    );
    Ok(())
}

async fn serve(
    config: &Config,
    store: Arc<dyn Store>,
    publisher: Arc<dyn Publisher>,
    orchestrator: Arc<Orchestrator>,
    dice: Arc<Dice>,
) -> Result<()> {
    match publisher.test_connection().await {
        Ok(page) => info!("Publishing to page {} ({})", page.name, page.id),
        Err(e) => warn!("Publisher connection test failed: {e}"),
    }

    let scheduler = Arc::new(Scheduler::new(
        orchestrator,
        ScheduleSettings {
            posts_per_day: config.posts_per_day,
            min_delay_minutes: config.min_delay_minutes,
            max_delay_minutes: config.max_delay_minutes,
        },
        dice,
    ));
    scheduler.start();

    let state = AppState {
        store,
        publisher,
        scheduler: scheduler.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {e}");
            }
            info!("Shutdown signal received");
        })
        .await?;

    scheduler.stop().await;
    Ok(())
}
