//! Core data model for the Pulseboard simulation engine
//!
//! Two families of entities, mirroring the two stores:
//! - Economic: metrics, news, forecasts and calendar events, partitioned
//!   by geographic context
//! - Feasibility: startup project inputs and the analyses derived from
//!   them per scenario mode

pub mod economic;
pub mod feasibility;

pub use economic::{
    ContextData, EconomicContext, EconomicEvent, EconomicMetric, EventImpact, Forecast,
    MetricUnit, NewsItem, Trend,
};
pub use feasibility::{
    AnalysisResult, FeasibilityAnalysis, FeasibilityMode, ModeMultipliers, ProjectInput,
    ProjectPatch, RiskBreakdown, TimeValue, Verdict,
};
