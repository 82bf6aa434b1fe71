//! Feasibility analysis generator
//!
//! Derives a [`FeasibilityAnalysis`] from a [`ProjectInput`] and a
//! [`FeasibilityMode`]. The mode's multiplier table scales revenue,
//! cost, risk and timeline; a small amount of injected randomness keeps
//! regenerated analyses from being carbon copies. All scored fields are
//! clamped to their documented ranges on the way out.

use chrono::Utc;

use crate::feed::RandomSource;
use crate::model::feasibility::{CONFIDENCE_RANGE, IRR_RANGE};
use crate::model::{
    AnalysisResult, FeasibilityAnalysis, FeasibilityMode, ProjectInput, RiskBreakdown, TimeValue,
    Verdict,
};

/// Share of the addressable market a first-year product captures
const BASE_CAPTURE_RATE: f64 = 0.002;

/// Discount rate used for the NPV projection
const DISCOUNT_RATE: f64 = 0.10;

/// Years of projected cash flow in the NPV sum
const PROJECTION_YEARS: u32 = 5;

/// Generate the analysis for one (project, mode) pair
pub fn generate(
    project: &ProjectInput,
    mode: FeasibilityMode,
    rng: &mut dyn RandomSource,
) -> FeasibilityAnalysis {
    let m = mode.multipliers();

    let mut risk = base_risk(project, rng);
    risk.market *= m.risk;
    risk.technical *= m.risk;
    risk.financial *= m.risk;
    risk.operational *= m.risk;
    risk.competitive *= m.risk;
    risk.clamp_scores();
    let overall = risk.overall();

    // First-year projections
    let growth_factor = 1.0 + project.industry_growth_rate / 100.0;
    let projected_revenue = project.market_size * BASE_CAPTURE_RATE * growth_factor * m.revenue;
    let projected_cost = (project.initial_investment * 0.6
        + project.team_size as f64 * 120_000.0)
        * m.cost;

    let annual_margin = projected_revenue - projected_cost;
    let monthly_margin = annual_margin / 12.0;
    let break_even_months = if monthly_margin > 0.0 {
        (project.initial_investment / monthly_margin) * m.timeline
    } else {
        f64::INFINITY
    };

    // Confidence falls with risk; jitter keeps reruns distinguishable
    let confidence_level = (95.0 - overall * 0.45 + rng.uniform(-2.0, 2.0))
        .clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1);

    let time_value = project_time_value(project, annual_margin, growth_factor);

    let verdict = verdict_for(overall, time_value.npv);

    let (risk_factors, mitigation_strategies) = narratives(project, &risk);

    FeasibilityAnalysis {
        project_id: project.id.clone(),
        mode,
        risk,
        overall_risk_score: overall,
        result: AnalysisResult {
            confidence_level,
            projected_revenue,
            projected_cost,
            break_even_months,
            verdict,
        },
        time_value,
        risk_factors,
        mitigation_strategies,
        generated_at: Utc::now(),
    }
}

/// Generate the full analysis set: every project under every mode
pub fn generate_all(
    projects: &[ProjectInput],
    rng: &mut dyn RandomSource,
) -> Vec<FeasibilityAnalysis> {
    let mut analyses = Vec::with_capacity(projects.len() * FeasibilityMode::all().len());
    for project in projects {
        for mode in FeasibilityMode::all() {
            analyses.push(generate(project, *mode, rng));
        }
    }
    analyses
}

/// Risk sub-scores before the mode multiplier
fn base_risk(project: &ProjectInput, rng: &mut dyn RandomSource) -> RiskBreakdown {
    // Crowded markets and thin teams read as riskier; fast-growing
    // industries and large markets read as safer.
    let competitive = 20.0 + project.competitor_count as f64 * 2.5;
    let market = 70.0 - (project.market_size / 1_000_000_000.0).min(40.0)
        - project.industry_growth_rate * 0.4;
    let financial = 25.0 + (project.initial_investment / 1_000_000.0).min(35.0);
    let operational = 60.0 - (project.team_size as f64 * 1.5).min(40.0);
    let technical = 40.0;

    let jitter = |rng: &mut dyn RandomSource| rng.uniform(-5.0, 5.0);
    RiskBreakdown {
        market: market + jitter(&mut *rng),
        technical: technical + jitter(&mut *rng),
        financial: financial + jitter(&mut *rng),
        operational: operational + jitter(&mut *rng),
        competitive: competitive + jitter(&mut *rng),
    }
}

fn project_time_value(
    project: &ProjectInput,
    first_year_margin: f64,
    growth_factor: f64,
) -> TimeValue {
    // Margin compounds with industry growth, discounted back at a fixed
    // rate against the upfront investment.
    let mut npv = -project.initial_investment;
    let mut margin = first_year_margin;
    for year in 1..=PROJECTION_YEARS {
        npv += margin / (1.0 + DISCOUNT_RATE).powi(year as i32);
        margin *= growth_factor;
    }

    // IRR approximation: first-year return scaled by growth, bounded to
    // the documented range rather than root-solved.
    let irr = (first_year_margin / project.initial_investment * growth_factor * 0.5)
        .clamp(IRR_RANGE.0, IRR_RANGE.1);

    TimeValue { npv, irr }
}

fn verdict_for(overall_risk: f64, npv: f64) -> Verdict {
    match (overall_risk, npv) {
        (r, n) if r < 35.0 && n > 0.0 => Verdict::Favorable,
        (r, n) if r < 55.0 && n > 0.0 => Verdict::Viable,
        (_, n) if n > 0.0 => Verdict::Marginal,
        _ => Verdict::Unfavorable,
    }
}

fn narratives(project: &ProjectInput, risk: &RiskBreakdown) -> (Vec<String>, Vec<String>) {
    let mut factors = Vec::new();
    let mut mitigations = Vec::new();

    if risk.competitive > 55.0 {
        factors.push(format!(
            "{} direct competitors in {}",
            project.competitor_count, project.industry
        ));
        mitigations.push("Differentiate on an underserved segment before broad launch".to_string());
    }
    if risk.financial > 50.0 {
        factors.push(format!(
            "High capital intensity (${:.1}M upfront)",
            project.initial_investment / 1_000_000.0
        ));
        mitigations.push("Stage the raise against milestone gates".to_string());
    }
    if risk.operational > 45.0 {
        factors.push(format!("Small team ({}) for the scope", project.team_size));
        mitigations.push("Contract out non-core build work in year one".to_string());
    }
    if risk.market > 50.0 {
        factors.push("Unproven demand at target price point".to_string());
        mitigations.push("Run paid pilots before committing to capacity".to_string());
    }
    if factors.is_empty() {
        factors.push("No dominant risk factor identified".to_string());
        mitigations.push("Revisit assumptions quarterly".to_string());
    }

    (factors, mitigations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ScriptedRandom;
    use crate::fixtures::seed_projects;
    use crate::model::feasibility::RISK_SCORE_RANGE;

    fn sample_project() -> ProjectInput {
        seed_projects().into_iter().next().unwrap()
    }

    #[test]
    fn test_generate_keys_match() {
        let project = sample_project();
        let mut rng = ScriptedRandom::constant(0.5);
        let analysis = generate(&project, FeasibilityMode::Safe, &mut rng);
        assert_eq!(analysis.project_id, project.id);
        assert_eq!(analysis.mode, FeasibilityMode::Safe);
    }

    #[test]
    fn test_scores_within_ranges() {
        for project in seed_projects() {
            for mode in FeasibilityMode::all() {
                let mut rng = ScriptedRandom::constant(0.999);
                let a = generate(&project, *mode, &mut rng);
                for score in [
                    a.risk.market,
                    a.risk.technical,
                    a.risk.financial,
                    a.risk.operational,
                    a.risk.competitive,
                ] {
                    assert!((RISK_SCORE_RANGE.0..=RISK_SCORE_RANGE.1).contains(&score));
                }
                assert!((CONFIDENCE_RANGE.0..=CONFIDENCE_RANGE.1)
                    .contains(&a.result.confidence_level));
                assert!((IRR_RANGE.0..=IRR_RANGE.1).contains(&a.time_value.irr));
            }
        }
    }

    #[test]
    fn test_mode_multipliers_flow_through() {
        let project = sample_project();

        // Identical rng scripts so the only difference is the mode.
        let mut rng_a = ScriptedRandom::constant(0.5);
        let mut rng_b = ScriptedRandom::constant(0.5);
        let safe = generate(&project, FeasibilityMode::Safe, &mut rng_a);
        let wild = generate(&project, FeasibilityMode::Wild, &mut rng_b);

        let revenue_ratio = wild.result.projected_revenue / safe.result.projected_revenue;
        assert!((revenue_ratio - 1.40).abs() < 1e-9);

        let cost_ratio = wild.result.projected_cost / safe.result.projected_cost;
        assert!((cost_ratio - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_conservative_revenue_ratio() {
        let project = sample_project();
        let mut rng_a = ScriptedRandom::constant(0.5);
        let mut rng_b = ScriptedRandom::constant(0.5);
        let safe = generate(&project, FeasibilityMode::Safe, &mut rng_a);
        let conservative = generate(&project, FeasibilityMode::Conservative, &mut rng_b);

        let revenue_ratio = conservative.result.projected_revenue / safe.result.projected_revenue;
        assert!((revenue_ratio - 0.75).abs() < 1e-9);

        let cost_ratio = conservative.result.projected_cost / safe.result.projected_cost;
        assert!((cost_ratio - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_wild_risk_not_above_safe() {
        let project = sample_project();
        let mut rng_a = ScriptedRandom::constant(0.5);
        let mut rng_b = ScriptedRandom::constant(0.5);
        let safe = generate(&project, FeasibilityMode::Safe, &mut rng_a);
        let wild = generate(&project, FeasibilityMode::Wild, &mut rng_b);
        assert!(wild.overall_risk_score <= safe.overall_risk_score);
    }

    #[test]
    fn test_generate_all_covers_every_pair() {
        let projects = seed_projects();
        let mut rng = ScriptedRandom::constant(0.5);
        let analyses = generate_all(&projects, &mut rng);
        assert_eq!(analyses.len(), projects.len() * 3);

        let mut keys = std::collections::HashSet::new();
        for a in &analyses {
            assert!(keys.insert((a.project_id.clone(), a.mode)));
        }
    }

    #[test]
    fn test_narratives_never_empty() {
        let project = sample_project();
        let mut rng = ScriptedRandom::constant(0.5);
        let a = generate(&project, FeasibilityMode::Safe, &mut rng);
        assert!(!a.risk_factors.is_empty());
        assert_eq!(a.risk_factors.len(), a.mitigation_strategies.len());
    }
}
