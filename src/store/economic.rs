//! Economic data store
//!
//! Holds metrics/news/forecasts/events per geographic context and keeps
//! them alive with a simulated feed:
//! - manual/initial `refresh` perturbs the targeted context(s) behind an
//!   artificial fetch delay
//! - a jittered background timer perturbs one random context per tick
//! - a fixed-period fallback poll refreshes everything while the
//!   simulated connection is down
//!
//! A new `refresh` can race an in-flight one; each commits the snapshot
//! it perturbed and the last writer wins. There is no request-id
//! fencing.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::config::EconomicTiming;
use crate::feed::{
    ConnectionState, FeedConnection, FeedHandle, RandomSource, StoreEvent, UpdateBus,
};
use crate::fixtures;
use crate::model::{ContextData, EconomicContext, EconomicMetric, EconomicEvent, Forecast, NewsItem};

use super::error::{StoreError, StoreResult};
use super::status::StoreStatus;

/// Jitter applied by a manual or initial fetch
const FETCH_VALUE_JITTER: (f64, f64) = (0.95, 1.05);
const FETCH_CHANGE_JITTER: (f64, f64) = (0.8, 1.2);

/// Jitter applied by a background feed tick
const TICK_VALUE_JITTER: (f64, f64) = (0.98, 1.02);
const TICK_CHANGE_JITTER: (f64, f64) = (0.9, 1.1);

struct EconomicState {
    data: HashMap<EconomicContext, ContextData>,
    status: StoreStatus,
}

/// State container for the economic dashboard data
pub struct EconomicStore {
    state: Arc<RwLock<EconomicState>>,
    rng: Arc<Mutex<Box<dyn RandomSource>>>,
    connection: Arc<FeedConnection>,
    bus: UpdateBus,
    timing: EconomicTiming,
}

impl EconomicStore {
    /// Create a store seeded from the fixture dataset
    pub fn new(timing: EconomicTiming, rng: Box<dyn RandomSource>, bus: UpdateBus) -> Self {
        Self {
            state: Arc::new(RwLock::new(EconomicState {
                data: fixtures::economic_seed(),
                status: StoreStatus::new(ConnectionState::Open),
            })),
            rng: Arc::new(Mutex::new(rng)),
            connection: Arc::new(FeedConnection::open()),
            bus,
            timing,
        }
    }

    /// Current metrics for a context
    pub async fn metrics(&self, context: EconomicContext) -> Vec<EconomicMetric> {
        let state = self.state.read().await;
        state
            .data
            .get(&context)
            .map(|d| d.metrics.clone())
            .unwrap_or_default()
    }

    /// Current news for a context
    pub async fn news(&self, context: EconomicContext) -> Vec<NewsItem> {
        let state = self.state.read().await;
        state
            .data
            .get(&context)
            .map(|d| d.news.clone())
            .unwrap_or_default()
    }

    /// Current forecasts for a context
    pub async fn forecasts(&self, context: EconomicContext) -> Vec<Forecast> {
        let state = self.state.read().await;
        state
            .data
            .get(&context)
            .map(|d| d.forecasts.clone())
            .unwrap_or_default()
    }

    /// Current calendar events for a context
    pub async fn events(&self, context: EconomicContext) -> Vec<EconomicEvent> {
        let state = self.state.read().await;
        state
            .data
            .get(&context)
            .map(|d| d.events.clone())
            .unwrap_or_default()
    }

    /// Everything held for a context
    pub async fn context_data(&self, context: EconomicContext) -> Option<ContextData> {
        self.state.read().await.data.get(&context).cloned()
    }

    /// Current status block; connection state is read live
    pub async fn status(&self) -> StoreStatus {
        let mut status = self.state.read().await.status.clone();
        status.connection = self.connection.state();
        status
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Manual or initial fetch
    ///
    /// Perturbs every metric in the targeted context(s) behind a
    /// simulated network delay. `None` targets all contexts. Other
    /// contexts' data is left untouched.
    pub async fn refresh(&self, context: Option<EconomicContext>) -> StoreResult<()> {
        let targets: Vec<EconomicContext> = match context {
            Some(ctx) => vec![ctx],
            None => EconomicContext::all().to_vec(),
        };

        // Snapshot up front: a racing refresh commits its own snapshot,
        // last writer wins.
        let snapshot: StoreResult<Vec<(EconomicContext, ContextData)>> = {
            let state = self.state.read().await;
            targets
                .iter()
                .map(|ctx| {
                    state
                        .data
                        .get(ctx)
                        .cloned()
                        .map(|data| (*ctx, data))
                        .ok_or_else(|| StoreError::ContextNotFound(ctx.to_string()))
                })
                .collect()
        };
        let mut snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.state.write().await.status.finish_err(err.to_string());
                return Err(err);
            }
        };

        self.state.write().await.status.begin_loading();

        let delay = self
            .draw_ms(self.timing.fetch_delay_min_ms, self.timing.fetch_delay_max_ms)
            .await;
        tokio::time::sleep(delay).await;

        if self.timing.failure_rate > 0.0 {
            let roll = self.rng.lock().await.next_unit();
            if roll < self.timing.failure_rate {
                let err = StoreError::FetchFailed("simulated network failure".to_string());
                self.state.write().await.status.finish_err(err.to_string());
                tracing::warn!(error = %err, "economic fetch failed");
                return Err(err);
            }
        }

        {
            let mut rng = self.rng.lock().await;
            for (_, data) in snapshot.iter_mut() {
                perturb_metrics(data, rng.as_mut(), FETCH_VALUE_JITTER, FETCH_CHANGE_JITTER);
            }
        }

        {
            let mut state = self.state.write().await;
            for (ctx, data) in snapshot {
                state.data.insert(ctx, data);
            }
            state.status.finish_ok();
        }

        tracing::debug!(contexts = ?targets, "economic refresh committed");
        self.bus
            .publish(StoreEvent::EconomicRefreshed { contexts: targets });
        Ok(())
    }

    /// One background feed tick: perturb a single random context
    ///
    /// Runs outside the loading state machine; the loading flag is never
    /// touched here.
    pub async fn background_tick(&self) {
        let all = EconomicContext::all();
        let context = {
            let mut rng = self.rng.lock().await;
            all[rng.index(all.len())]
        };

        {
            let mut state = self.state.write().await;
            if let Some(data) = state.data.get_mut(&context) {
                let mut rng = self.rng.lock().await;
                perturb_metrics(data, rng.as_mut(), TICK_VALUE_JITTER, TICK_CHANGE_JITTER);
            }
        }

        tracing::trace!(%context, "economic feed tick");
        self.bus.publish(StoreEvent::EconomicTick { context });
    }

    /// Simulate the feed connection dropping
    pub async fn drop_connection(&self) {
        self.connection.mark_closed();
        let err = StoreError::ConnectionClosed("simulated feed drop".to_string());
        self.state.write().await.status.error = Some(err.to_string());

        tracing::warn!("economic feed connection dropped");
        self.bus.publish(StoreEvent::ConnectionChanged {
            state: ConnectionState::Closed,
        });
    }

    /// Single reconnect attempt after a fixed delay
    ///
    /// No retry loop: if the caller wants another attempt it calls
    /// again.
    pub async fn reconnect(&self) {
        if self.connection.is_open() {
            return;
        }

        tokio::time::sleep(Duration::from_millis(self.timing.reconnect_delay_ms)).await;
        self.connection.mark_open();
        self.state.write().await.status.error = None;

        tracing::info!("economic feed reconnected");
        self.bus.publish(StoreEvent::ConnectionChanged {
            state: ConnectionState::Open,
        });
    }

    /// Start the simulated feed timers
    ///
    /// Two loops: a jittered live tick that fires only while the
    /// connection is open, and a fixed-period fallback poll that
    /// refreshes everything only while it is down. The returned handle
    /// owns both; dropping or shutting it down stops the feed.
    pub fn start_feed(self: &Arc<Self>) -> FeedHandle {
        let mut handle = FeedHandle::new(Arc::clone(&self.connection));

        let store = Arc::clone(self);
        handle.track(tokio::spawn(async move {
            loop {
                let period = store
                    .draw_ms(store.timing.tick_min_ms, store.timing.tick_max_ms)
                    .await;
                tokio::time::sleep(period).await;
                if store.connection.is_open() {
                    store.background_tick().await;
                }
            }
        }));

        let store = Arc::clone(self);
        let poll_period = Duration::from_millis(self.timing.poll_interval_ms);
        handle.track(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_period);
            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if !store.connection.is_open() {
                    if let Err(e) = store.refresh(None).await {
                        tracing::warn!(error = %e, "fallback poll failed");
                    }
                }
            }
        }));

        tracing::info!("economic feed started");
        handle
    }

    async fn draw_ms(&self, min_ms: u64, max_ms: u64) -> Duration {
        let mut rng = self.rng.lock().await;
        let ms = rng.uniform(min_ms as f64, max_ms as f64);
        Duration::from_millis(ms as u64)
    }
}

/// Jitter every metric in a context and keep derived fields consistent
fn perturb_metrics(
    data: &mut ContextData,
    rng: &mut dyn RandomSource,
    value_jitter: (f64, f64),
    change_jitter: (f64, f64),
) {
    for metric in &mut data.metrics {
        let previous = metric.value;
        metric.value *= rng.uniform(value_jitter.0, value_jitter.1);
        metric.change *= rng.uniform(change_jitter.0, change_jitter.1);
        metric.rederive(previous);
    }
    data.last_updated = Utc::now();
}
