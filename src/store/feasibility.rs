//! Feasibility data store
//!
//! Holds startup project inputs, the analyses derived from them per
//! scenario mode, and the current selection. A jittered background
//! timer applies one of three mutually exclusive update classes per
//! tick: project inputs, risk scores, or valuation figures.
//!
//! Analyses are keyed by (project, mode); recomputing one replaces the
//! prior entry for that exact key, it never appends. Every mutation is
//! all-or-nothing per call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::analysis;
use crate::config::FeasibilityTiming;
use crate::feed::{
    ConnectionState, FeasibilityTickKind, FeedConnection, FeedHandle, RandomSource, StoreEvent,
    UpdateBus,
};
use crate::fixtures;
use crate::model::feasibility::{
    COMPETITOR_RANGE, CONFIDENCE_RANGE, GROWTH_RATE_RANGE, IRR_RANGE,
};
use crate::model::{FeasibilityAnalysis, FeasibilityMode, ProjectInput, ProjectPatch};

use super::error::{StoreError, StoreResult};
use super::status::StoreStatus;

/// Jitter a manual or initial fetch applies to project inputs
const FETCH_GROWTH_JITTER: (f64, f64) = (0.97, 1.03);
const FETCH_MARKET_JITTER: (f64, f64) = (0.99, 1.01);

/// Jitter a background tick applies to project inputs
const TICK_GROWTH_JITTER: (f64, f64) = (0.98, 1.02);

/// Additive walk a background tick applies to scored fields
const TICK_RISK_WALK: (f64, f64) = (-3.0, 3.0);
const TICK_CONFIDENCE_WALK: (f64, f64) = (-2.0, 2.0);

/// Walk a background tick applies to valuation figures
const TICK_NPV_JITTER: (f64, f64) = (0.97, 1.03);
const TICK_IRR_WALK: (f64, f64) = (-0.02, 0.02);

/// Class-selection thresholds for the single uniform tick draw
const TICK_CLASS_PROJECTS: f64 = 0.4;
const TICK_CLASS_RISK: f64 = 0.7;

type AnalysisKey = (String, FeasibilityMode);

struct FeasibilityState {
    projects: Vec<ProjectInput>,
    analyses: HashMap<AnalysisKey, FeasibilityAnalysis>,
    selected_project: Option<String>,
    selected_mode: FeasibilityMode,
    status: StoreStatus,
}

/// State container for the startup-feasibility data
pub struct FeasibilityStore {
    state: Arc<RwLock<FeasibilityState>>,
    rng: Arc<Mutex<Box<dyn RandomSource>>>,
    connection: Arc<FeedConnection>,
    bus: UpdateBus,
    timing: FeasibilityTiming,
}

impl FeasibilityStore {
    /// Create a store seeded from the fixture projects, with the full
    /// analysis set already generated
    pub fn new(timing: FeasibilityTiming, mut rng: Box<dyn RandomSource>, bus: UpdateBus) -> Self {
        let projects = fixtures::seed_projects();
        let analyses = index_by_key(analysis::generate_all(&projects, rng.as_mut()));
        let selected_project = projects.first().map(|p| p.id.clone());

        Self {
            state: Arc::new(RwLock::new(FeasibilityState {
                projects,
                analyses,
                selected_project,
                selected_mode: FeasibilityMode::Safe,
                status: StoreStatus::new(ConnectionState::Open),
            })),
            rng: Arc::new(Mutex::new(rng)),
            connection: Arc::new(FeedConnection::open()),
            bus,
            timing,
        }
    }

    /// All projects
    pub async fn projects(&self) -> Vec<ProjectInput> {
        self.state.read().await.projects.clone()
    }

    /// One project by id
    pub async fn project(&self, id: &str) -> Option<ProjectInput> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// The analysis for one (project, mode) pair, if present
    pub async fn get_analysis(
        &self,
        id: &str,
        mode: FeasibilityMode,
    ) -> Option<FeasibilityAnalysis> {
        self.state
            .read()
            .await
            .analyses
            .get(&(id.to_string(), mode))
            .cloned()
    }

    /// All analyses for one project, in mode order
    pub async fn get_project_analyses(&self, id: &str) -> Vec<FeasibilityAnalysis> {
        let state = self.state.read().await;
        FeasibilityMode::all()
            .iter()
            .filter_map(|mode| state.analyses.get(&(id.to_string(), *mode)).cloned())
            .collect()
    }

    /// Every analysis currently held
    pub async fn analyses(&self) -> Vec<FeasibilityAnalysis> {
        self.state.read().await.analyses.values().cloned().collect()
    }

    /// Current selection: (project id, mode)
    pub async fn selection(&self) -> (Option<String>, FeasibilityMode) {
        let state = self.state.read().await;
        (state.selected_project.clone(), state.selected_mode)
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

    /// Select the project the dashboard focuses on
    pub async fn select_project(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if !state.projects.iter().any(|p| p.id == id) {
            let err = StoreError::ProjectNotFound(id.to_string());
            state.status.error = Some(err.to_string());
            return Err(err);
        }
        state.selected_project = Some(id.to_string());
        Ok(())
    }

    /// Select the scenario mode the dashboard focuses on
    pub async fn select_mode(&self, mode: FeasibilityMode) {
        self.state.write().await.selected_mode = mode;
    }

    /// Manual or initial fetch
    ///
    /// Perturbs every project's growth rate and market size behind a
    /// simulated network delay, then regenerates the full analysis set
    /// for all three modes from the perturbed projects.
    pub async fn refresh(&self) -> StoreResult<()> {
        // Snapshot up front: a racing refresh commits its own snapshot,
        // last writer wins.
        let mut projects = self.state.read().await.projects.clone();

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
                tracing::warn!(error = %err, "feasibility fetch failed");
                return Err(err);
            }
        }

        let analyses = {
            let mut rng = self.rng.lock().await;
            for project in projects.iter_mut() {
                project.industry_growth_rate = (project.industry_growth_rate
                    * rng.uniform(FETCH_GROWTH_JITTER.0, FETCH_GROWTH_JITTER.1))
                .clamp(GROWTH_RATE_RANGE.0, GROWTH_RATE_RANGE.1);
                project.market_size *= rng.uniform(FETCH_MARKET_JITTER.0, FETCH_MARKET_JITTER.1);
                project.last_updated = chrono::Utc::now();
            }
            index_by_key(analysis::generate_all(&projects, rng.as_mut()))
        };

        let (project_count, analysis_count) = (projects.len(), analyses.len());
        {
            let mut state = self.state.write().await;
            state.projects = projects;
            state.analyses = analyses;
            state.status.finish_ok();
        }

        tracing::debug!(
            projects = project_count,
            analyses = analysis_count,
            "feasibility refresh committed"
        );
        self.bus.publish(StoreEvent::FeasibilityRefreshed {
            projects: project_count,
            analyses: analysis_count,
        });
        Ok(())
    }

    /// Recompute one (project, mode) analysis behind a longer simulated
    /// compute delay
    ///
    /// Replaces any prior entry for that exact key. Unknown project ids
    /// surface an error and leave the analysis set untouched.
    pub async fn run_analysis(
        &self,
        project_id: &str,
        mode: FeasibilityMode,
    ) -> StoreResult<FeasibilityAnalysis> {
        self.state.write().await.status.begin_calculating();

        let delay = self
            .draw_ms(
                self.timing.analysis_delay_min_ms,
                self.timing.analysis_delay_max_ms,
            )
            .await;
        tokio::time::sleep(delay).await;

        let project = match self.project(project_id).await {
            Some(p) => p,
            None => {
                let err = StoreError::ProjectNotFound(project_id.to_string());
                self.state.write().await.status.finish_err(err.to_string());
                tracing::warn!(project_id, "analysis target not found");
                return Err(err);
            }
        };

        let generated = {
            let mut rng = self.rng.lock().await;
            analysis::generate(&project, mode, rng.as_mut())
        };

        {
            let mut state = self.state.write().await;
            state
                .analyses
                .insert((project.id.clone(), mode), generated.clone());
            state.status.finish_ok();
        }

        tracing::debug!(project_id, %mode, "analysis recomputed");
        self.bus.publish(StoreEvent::AnalysisCompleted {
            project_id: project.id.clone(),
            mode,
        });
        Ok(generated)
    }

    /// Apply a partial update to one project
    ///
    /// All-or-nothing: an unknown id changes nothing.
    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> StoreResult<()> {
        {
            let mut state = self.state.write().await;
            match state.projects.iter_mut().find(|p| p.id == id) {
                Some(project) => project.apply(patch),
                None => {
                    let err = StoreError::ProjectNotFound(id.to_string());
                    state.status.error = Some(err.to_string());
                    return Err(err);
                }
            }
        }

        tracing::debug!(project_id = id, "project updated");
        self.bus.publish(StoreEvent::ProjectUpdated {
            project_id: id.to_string(),
        });
        Ok(())
    }

    /// One background feed tick
    ///
    /// A single uniform draw selects one of three mutually exclusive
    /// update classes; the other two are left byte-identical. Runs
    /// outside the loading state machine.
    pub async fn background_tick(&self) {
        let class_roll = self.rng.lock().await.next_unit();
        let kind = tick_class(class_roll);

        match kind {
            FeasibilityTickKind::Projects => self.tick_projects().await,
            FeasibilityTickKind::RiskScores => self.tick_risk_scores().await,
            FeasibilityTickKind::Valuation => self.tick_valuation().await,
        }

        tracing::trace!(?kind, "feasibility feed tick");
        self.bus.publish(StoreEvent::FeasibilityTick { kind });
    }

    /// Simulate the feed connection dropping
    pub async fn drop_connection(&self) {
        self.connection.mark_closed();
        let err = StoreError::ConnectionClosed("simulated feed drop".to_string());
        self.state.write().await.status.error = Some(err.to_string());

        tracing::warn!("feasibility feed connection dropped");
        self.bus.publish(StoreEvent::ConnectionChanged {
            state: ConnectionState::Closed,
        });
    }

    /// Single reconnect attempt after a fixed delay
    pub async fn reconnect(&self) {
        if self.connection.is_open() {
            return;
        }

        tokio::time::sleep(Duration::from_millis(self.timing.reconnect_delay_ms)).await;
        self.connection.mark_open();
        self.state.write().await.status.error = None;

        tracing::info!("feasibility feed reconnected");
        self.bus.publish(StoreEvent::ConnectionChanged {
            state: ConnectionState::Open,
        });
    }

    /// Start the simulated feed timer
    ///
    /// One jittered loop; ticks fire only while the connection is open.
    /// The returned handle owns the task; dropping or shutting it down
    /// stops the feed.
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

        tracing::info!("feasibility feed started");
        handle
    }

    async fn tick_projects(&self) {
        let mut state = self.state.write().await;
        let mut rng = self.rng.lock().await;
        for project in state.projects.iter_mut() {
            project.industry_growth_rate = (project.industry_growth_rate
                * rng.uniform(TICK_GROWTH_JITTER.0, TICK_GROWTH_JITTER.1))
            .clamp(GROWTH_RATE_RANGE.0, GROWTH_RATE_RANGE.1);

            // Competitor counts random-walk by -1, 0 or +1
            let delta = rng.index(3) as i64 - 1;
            let walked = project.competitor_count as i64 + delta;
            project.competitor_count =
                walked.clamp(COMPETITOR_RANGE.0 as i64, COMPETITOR_RANGE.1 as i64) as u32;

            project.last_updated = chrono::Utc::now();
        }
    }

    async fn tick_risk_scores(&self) {
        let mut state = self.state.write().await;
        let mut rng = self.rng.lock().await;
        for analysis in state.analyses.values_mut() {
            let walk = |rng: &mut dyn RandomSource| rng.uniform(TICK_RISK_WALK.0, TICK_RISK_WALK.1);
            analysis.risk.market += walk(rng.as_mut());
            analysis.risk.technical += walk(rng.as_mut());
            analysis.risk.financial += walk(rng.as_mut());
            analysis.risk.operational += walk(rng.as_mut());
            analysis.risk.competitive += walk(rng.as_mut());
            analysis.risk.clamp_scores();
            analysis.overall_risk_score = analysis.risk.overall();

            analysis.result.confidence_level = (analysis.result.confidence_level
                + rng.uniform(TICK_CONFIDENCE_WALK.0, TICK_CONFIDENCE_WALK.1))
            .clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1);
        }
    }

    async fn tick_valuation(&self) {
        let mut state = self.state.write().await;
        let mut rng = self.rng.lock().await;
        for analysis in state.analyses.values_mut() {
            analysis.time_value.npv *= rng.uniform(TICK_NPV_JITTER.0, TICK_NPV_JITTER.1);
            analysis.time_value.irr = (analysis.time_value.irr
                + rng.uniform(TICK_IRR_WALK.0, TICK_IRR_WALK.1))
            .clamp(IRR_RANGE.0, IRR_RANGE.1);
        }
    }

    async fn draw_ms(&self, min_ms: u64, max_ms: u64) -> Duration {
        let mut rng = self.rng.lock().await;
        let ms = rng.uniform(min_ms as f64, max_ms as f64);
        Duration::from_millis(ms as u64)
    }
}

fn index_by_key(analyses: Vec<FeasibilityAnalysis>) -> HashMap<AnalysisKey, FeasibilityAnalysis> {
    analyses
        .into_iter()
        .map(|a| ((a.project_id.clone(), a.mode), a))
        .collect()
}

/// Map the single uniform tick draw to an update class
fn tick_class(roll: f64) -> FeasibilityTickKind {
    if roll < TICK_CLASS_PROJECTS {
        FeasibilityTickKind::Projects
    } else if roll < TICK_CLASS_RISK {
        FeasibilityTickKind::RiskScores
    } else {
        FeasibilityTickKind::Valuation
    }
}
