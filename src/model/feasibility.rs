//! Startup feasibility types
//!
//! Project inputs, the scenario mode multiplier table, and the analysis
//! entities derived from them. Analyses are keyed by (project, mode);
//! the store treats that key as unique and replaces on recompute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounds the simulation clamps project and analysis fields to
pub const GROWTH_RATE_RANGE: (f64, f64) = (5.0, 50.0);
pub const COMPETITOR_RANGE: (u32, u32) = (1, 25);
pub const RISK_SCORE_RANGE: (f64, f64) = (5.0, 95.0);
pub const CONFIDENCE_RANGE: (f64, f64) = (50.0, 95.0);
pub const IRR_RANGE: (f64, f64) = (-0.5, 1.0);

/// Immutable-ish description of a startup project under evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectInput {
    /// Stable identifier (e.g. "proj-grid-battery")
    pub id: String,
    pub name: String,
    pub industry: String,
    /// Annual industry growth rate, percent, clamped to [5, 50]
    pub industry_growth_rate: f64,
    /// Total addressable market, USD
    pub market_size: f64,
    /// Number of direct competitors, clamped to [1, 25]
    pub competitor_count: u32,
    /// Upfront capital required, USD
    pub initial_investment: f64,
    pub team_size: u32,
    pub last_updated: DateTime<Utc>,
}

impl ProjectInput {
    /// Apply a partial update, bumping `last_updated`
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(rate) = patch.industry_growth_rate {
            self.industry_growth_rate = rate.clamp(GROWTH_RATE_RANGE.0, GROWTH_RATE_RANGE.1);
        }
        if let Some(size) = patch.market_size {
            self.market_size = size;
        }
        if let Some(count) = patch.competitor_count {
            self.competitor_count = count.clamp(COMPETITOR_RANGE.0, COMPETITOR_RANGE.1);
        }
        if let Some(investment) = patch.initial_investment {
            self.initial_investment = investment;
        }
        if let Some(team) = patch.team_size {
            self.team_size = team;
        }
        self.last_updated = Utc::now();
    }
}

/// Partial update to a project; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub industry_growth_rate: Option<f64>,
    pub market_size: Option<f64>,
    pub competitor_count: Option<u32>,
    pub initial_investment: Option<f64>,
    pub team_size: Option<u32>,
}

/// Scenario selector applied multiplicatively to every analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeasibilityMode {
    Conservative,
    Safe,
    Wild,
}

impl FeasibilityMode {
    /// Get all modes for iteration
    pub fn all() -> &'static [FeasibilityMode] {
        &[
            FeasibilityMode::Conservative,
            FeasibilityMode::Safe,
            FeasibilityMode::Wild,
        ]
    }

    /// The multiplier table for this mode
    ///
    /// These constants are load-bearing: every generator that derives an
    /// analysis from a project must reproduce them exactly.
    pub fn multipliers(&self) -> ModeMultipliers {
        match self {
            FeasibilityMode::Conservative => ModeMultipliers {
                revenue: 0.75,
                cost: 1.25,
                risk: 1.4,
                timeline: 1.2,
            },
            FeasibilityMode::Safe => ModeMultipliers {
                revenue: 1.0,
                cost: 1.0,
                risk: 1.0,
                timeline: 1.0,
            },
            FeasibilityMode::Wild => ModeMultipliers {
                revenue: 1.40,
                cost: 0.85,
                risk: 0.7,
                timeline: 0.85,
            },
        }
    }
}

impl std::fmt::Display for FeasibilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeasibilityMode::Conservative => write!(f, "conservative"),
            FeasibilityMode::Safe => write!(f, "safe"),
            FeasibilityMode::Wild => write!(f, "wild"),
        }
    }
}

/// Multipliers a mode applies to an analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeMultipliers {
    pub revenue: f64,
    pub cost: f64,
    pub risk: f64,
    pub timeline: f64,
}

/// Risk sub-scores, each 0-100 (held in [5, 95] by the simulation)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskBreakdown {
    pub market: f64,
    pub technical: f64,
    pub financial: f64,
    pub operational: f64,
    pub competitive: f64,
}

impl RiskBreakdown {
    /// Mean of the five sub-scores
    pub fn overall(&self) -> f64 {
        (self.market + self.technical + self.financial + self.operational + self.competitive) / 5.0
    }

    /// Clamp every sub-score into the simulated range
    pub fn clamp_scores(&mut self) {
        let (lo, hi) = RISK_SCORE_RANGE;
        self.market = self.market.clamp(lo, hi);
        self.technical = self.technical.clamp(lo, hi);
        self.financial = self.financial.clamp(lo, hi);
        self.operational = self.operational.clamp(lo, hi);
        self.competitive = self.competitive.clamp(lo, hi);
    }
}

/// Bottom-line reading of an analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Favorable,
    Viable,
    Marginal,
    Unfavorable,
}

/// Result block of an analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Confidence in the analysis, percent, in [50, 95]
    pub confidence_level: f64,
    /// First-year revenue projection, USD
    pub projected_revenue: f64,
    /// First-year cost projection, USD
    pub projected_cost: f64,
    /// Months to break even under the mode's timeline multiplier
    pub break_even_months: f64,
    pub verdict: Verdict,
}

/// Time-value block of an analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeValue {
    /// Net present value, USD
    pub npv: f64,
    /// Internal rate of return, fraction, in [-0.5, 1.0]
    pub irr: f64,
}

/// A full feasibility analysis for one (project, mode) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeasibilityAnalysis {
    pub project_id: String,
    pub mode: FeasibilityMode,
    pub risk: RiskBreakdown,
    /// Mean of the risk sub-scores at generation time
    pub overall_risk_score: f64,
    pub result: AnalysisResult,
    pub time_value: TimeValue,
    /// Narrative risk factors surfaced by the generator
    pub risk_factors: Vec<String>,
    /// Suggested mitigations, one per major factor
    pub mitigation_strategies: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_multiplier_table() {
        let c = FeasibilityMode::Conservative.multipliers();
        assert_eq!(c.revenue, 0.75);
        assert_eq!(c.cost, 1.25);
        assert_eq!(c.risk, 1.4);
        assert_eq!(c.timeline, 1.2);

        let s = FeasibilityMode::Safe.multipliers();
        assert_eq!(s.revenue, 1.0);
        assert_eq!(s.cost, 1.0);
        assert_eq!(s.risk, 1.0);
        assert_eq!(s.timeline, 1.0);

        let w = FeasibilityMode::Wild.multipliers();
        assert_eq!(w.revenue, 1.40);
        assert_eq!(w.cost, 0.85);
        assert_eq!(w.risk, 0.7);
        assert_eq!(w.timeline, 0.85);
    }

    #[test]
    fn test_patch_clamps_bounds() {
        let mut project = ProjectInput {
            id: "p1".to_string(),
            name: "Test".to_string(),
            industry: "SaaS".to_string(),
            industry_growth_rate: 20.0,
            market_size: 1_000_000.0,
            competitor_count: 5,
            initial_investment: 100_000.0,
            team_size: 4,
            last_updated: Utc::now(),
        };

        project.apply(ProjectPatch {
            industry_growth_rate: Some(99.0),
            competitor_count: Some(0),
            ..Default::default()
        });

        assert_eq!(project.industry_growth_rate, 50.0);
        assert_eq!(project.competitor_count, 1);
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let mut project = ProjectInput {
            id: "p1".to_string(),
            name: "Test".to_string(),
            industry: "SaaS".to_string(),
            industry_growth_rate: 20.0,
            market_size: 1_000_000.0,
            competitor_count: 5,
            initial_investment: 100_000.0,
            team_size: 4,
            last_updated: Utc::now(),
        };

        project.apply(ProjectPatch {
            market_size: Some(2_000_000.0),
            ..Default::default()
        });

        assert_eq!(project.market_size, 2_000_000.0);
        assert_eq!(project.name, "Test");
        assert_eq!(project.competitor_count, 5);
    }

    #[test]
    fn test_risk_breakdown_overall() {
        let risk = RiskBreakdown {
            market: 50.0,
            technical: 60.0,
            financial: 40.0,
            operational: 30.0,
            competitive: 70.0,
        };
        assert!((risk.overall() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_breakdown_clamp() {
        let mut risk = RiskBreakdown {
            market: 120.0,
            technical: -10.0,
            financial: 50.0,
            operational: 96.0,
            competitive: 4.0,
        };
        risk.clamp_scores();
        assert_eq!(risk.market, 95.0);
        assert_eq!(risk.technical, 5.0);
        assert_eq!(risk.financial, 50.0);
        assert_eq!(risk.operational, 95.0);
        assert_eq!(risk.competitive, 5.0);
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&FeasibilityMode::Wild).unwrap();
        assert_eq!(json, "\"wild\"");
    }
}
