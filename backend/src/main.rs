//! Farm Telemetry Simulator - entry point
//!
//! Publishes one synthetic reading per interval until interrupted.

use farm_sim::services::{Simulator, SinkPublisher};
use farm_sim::Config;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{ReadingGenerator, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    tracing::info!("Starting farm telemetry simulator");
    tracing::info!("Environment: {}", config.environment);

    let publisher = SinkPublisher::from_config(&config)?;
    tracing::info!("Sending data to {}", publisher.describe());

    let generator = match config.simulator.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            ReadingGenerator::seeded(seed, SystemClock)
        }
        None => ReadingGenerator::new(StdRng::from_os_rng(), SystemClock),
    };

    let summary = Simulator::new(publisher, generator, config.simulator.interval())
        .with_max_cycles(config.simulator.max_cycles)
        .run(shutdown_signal())
        .await;

    tracing::info!(
        cycles = summary.cycles,
        published = summary.published,
        failed = summary.failed,
        critical = summary.critical,
        warning = summary.warning,
        "Simulator stopped"
    );
    tracing::info!("Fleet summary: {}", serde_json::to_string(&summary.fleet)?);

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
