//! Pulseboard demo runner
//!
//! Boots both stores, starts the simulated feeds, and logs every update
//! event until interrupted. Useful for eyeballing the simulation and as
//! a wiring reference for embedding the stores elsewhere.
//!
//! Run with: cargo run -- --seed 42

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulseboard::config::{generate_default_config, Config};
use pulseboard::feed::{StdRandom, StoreEvent, UpdateBus};
use pulseboard::model::EconomicContext;
use pulseboard::store::{EconomicStore, FeasibilityStore};

#[derive(Parser, Debug)]
#[command(name = "pulseboard", about = "Pulseboard simulation engine demo runner")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random source (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,

    /// Stop after this many seconds (runs until ctrl-c if omitted)
    #[arg(long)]
    duration: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }

    init_logging(&config);
    tracing::info!("Pulseboard simulation engine v{}", env!("CARGO_PKG_VERSION"));

    // Adjacent seeds keep the two stores' walks independent but the
    // whole run reproducible from one number.
    let (economic_rng, feasibility_rng) = match config.simulation.seed {
        Some(seed) => {
            tracing::info!(seed, "seeded run");
            (StdRandom::seeded(seed), StdRandom::seeded(seed.wrapping_add(1)))
        }
        None => (StdRandom::from_entropy(), StdRandom::from_entropy()),
    };

    let bus = UpdateBus::default();
    let economic = Arc::new(EconomicStore::new(
        config.economic.clone(),
        Box::new(economic_rng),
        bus.clone(),
    ));
    let feasibility = Arc::new(FeasibilityStore::new(
        config.feasibility.clone(),
        Box::new(feasibility_rng),
        bus.clone(),
    ));

    // Initial fetch before the feeds take over
    economic.refresh(None).await?;
    feasibility.refresh().await?;

    print_snapshot(&economic, &feasibility).await;

    let mut events = bus.subscribe();
    let economic_feed = economic.start_feed();
    let feasibility_feed = feasibility.start_feed();

    let deadline = cli
        .duration
        .map(|secs| tokio::time::Instant::now() + std::time::Duration::from_secs(secs));

    loop {
        let stop = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received");
                break;
            }
            _ = stop => {
                tracing::info!("run duration elapsed");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => log_event(&event),
                Err(e) => {
                    tracing::warn!(error = %e, "event stream lagged");
                }
            }
        }
    }

    // Teardown: stop every timer before exit
    economic_feed.shutdown();
    feasibility_feed.shutdown();
    tracing::info!("Pulseboard shutdown complete");

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pulseboard={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn print_snapshot(economic: &EconomicStore, feasibility: &FeasibilityStore) {
    for context in EconomicContext::all() {
        let metrics = economic.metrics(*context).await;
        tracing::info!(%context, metrics = metrics.len(), "economic context loaded");
        for metric in metrics {
            tracing::debug!(
                id = %metric.id,
                value = metric.value,
                change = metric.change,
                "metric"
            );
        }
    }

    for project in feasibility.projects().await {
        let analyses = feasibility.get_project_analyses(&project.id).await;
        tracing::info!(
            project = %project.id,
            industry = %project.industry,
            analyses = analyses.len(),
            "project loaded"
        );
    }
}

fn log_event(event: &StoreEvent) {
    match event {
        StoreEvent::EconomicRefreshed { contexts } => {
            tracing::info!(count = contexts.len(), "economic data refreshed");
        }
        StoreEvent::EconomicTick { context } => {
            tracing::info!(%context, "economic feed tick");
        }
        StoreEvent::FeasibilityRefreshed { projects, analyses } => {
            tracing::info!(
                projects = *projects,
                analyses = *analyses,
                "feasibility data refreshed"
            );
        }
        StoreEvent::FeasibilityTick { kind } => {
            tracing::info!(?kind, "feasibility feed tick");
        }
        StoreEvent::AnalysisCompleted { project_id, mode } => {
            tracing::info!(%project_id, %mode, "analysis completed");
        }
        StoreEvent::ProjectUpdated { project_id } => {
            tracing::info!(%project_id, "project updated");
        }
        StoreEvent::ConnectionChanged { state } => {
            tracing::info!(?state, "simulated connection changed");
        }
    }
}
