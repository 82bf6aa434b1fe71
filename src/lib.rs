//! # Pulseboard
//!
//! Simulation engine for a dashboard of synthetic economic indicators
//! and startup-feasibility analyses. There is no real backend here:
//! data starts as in-memory fixtures, "fetching" is an artificial delay,
//! and the "real-time feed" is a set of jittered timers applying bounded
//! random walks to the data they guard.
//!
//! ## Features
//!
//! - **Two independent stores**: economic indicators per geographic
//!   context, and feasibility analyses per (project, mode)
//! - **Simulated live feed**: cancellable timer tasks, an in-memory
//!   connection handle, and a broadcast event bus
//! - **Deterministic when asked**: every random draw goes through a
//!   pluggable source, seedable for reproducible runs
//! - **Clamped walks**: all perturbed fields hold their documented
//!   ranges after arbitrarily many ticks
//!
//! ## Modules
//!
//! - [`model`]: economic and feasibility entity types
//! - [`store`]: the two state containers and their operations
//! - [`feed`]: connection handle, feed scheduler, event bus, randomness
//! - [`analysis`]: the project-times-mode analysis generator
//! - [`fixtures`]: static seed datasets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseboard::config::Config;
//! use pulseboard::feed::{StdRandom, UpdateBus};
//! use pulseboard::model::{EconomicContext, FeasibilityMode};
//! use pulseboard::store::{EconomicStore, FeasibilityStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let bus = UpdateBus::default();
//!
//!     let economic = Arc::new(EconomicStore::new(
//!         config.economic.clone(),
//!         Box::new(StdRandom::seeded(42)),
//!         bus.clone(),
//!     ));
//!     let feasibility = Arc::new(FeasibilityStore::new(
//!         config.feasibility.clone(),
//!         Box::new(StdRandom::seeded(43)),
//!         bus.clone(),
//!     ));
//!
//!     // Initial fetch, then let the feeds take over
//!     economic.refresh(None).await?;
//!     feasibility.refresh().await?;
//!     let economic_feed = economic.start_feed();
//!     let feasibility_feed = feasibility.start_feed();
//!
//!     let metrics = economic.metrics(EconomicContext::National).await;
//!     println!("{} national metrics", metrics.len());
//!
//!     let analysis = feasibility
//!         .run_analysis("proj-grid-battery", FeasibilityMode::Wild)
//!         .await?;
//!     println!("overall risk {:.1}", analysis.overall_risk_score);
//!
//!     // Teardown stops every timer
//!     economic_feed.shutdown();
//!     feasibility_feed.shutdown();
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod feed;
pub mod fixtures;
pub mod model;
pub mod store;

// Re-export top-level types for convenience
pub use model::{
    ContextData, EconomicContext, EconomicEvent, EconomicMetric, FeasibilityAnalysis,
    FeasibilityMode, Forecast, MetricUnit, NewsItem, ProjectInput, ProjectPatch, RiskBreakdown,
    Trend,
};

pub use store::{EconomicStore, FeasibilityStore, StoreError, StoreResult, StoreStatus};

pub use feed::{
    ConnectionState, FeedConnection, FeedHandle, RandomSource, ScriptedRandom, StdRandom,
    StoreEvent, UpdateBus,
};

pub use config::{Config, ConfigError, EconomicTiming, FeasibilityTiming, LoggingConfig};
