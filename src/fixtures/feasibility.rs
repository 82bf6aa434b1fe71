//! Seed projects for the feasibility store

use chrono::Utc;

use crate::model::ProjectInput;

/// Build the seed project set
pub fn seed_projects() -> Vec<ProjectInput> {
    let now = Utc::now();
    vec![
        ProjectInput {
            id: "proj-grid-battery".to_string(),
            name: "GridCell Storage".to_string(),
            industry: "Clean Energy".to_string(),
            industry_growth_rate: 24.0,
            market_size: 18_500_000_000.0,
            competitor_count: 9,
            initial_investment: 4_200_000.0,
            team_size: 14,
            last_updated: now,
        },
        ProjectInput {
            id: "proj-fleet-ai".to_string(),
            name: "RouteMind".to_string(),
            industry: "Logistics Software".to_string(),
            industry_growth_rate: 17.5,
            market_size: 6_300_000_000.0,
            competitor_count: 14,
            initial_investment: 1_100_000.0,
            team_size: 8,
            last_updated: now,
        },
        ProjectInput {
            id: "proj-telehealth".to_string(),
            name: "ClinicBridge".to_string(),
            industry: "Digital Health".to_string(),
            industry_growth_rate: 21.0,
            market_size: 11_000_000_000.0,
            competitor_count: 19,
            initial_investment: 2_600_000.0,
            team_size: 11,
            last_updated: now,
        },
        ProjectInput {
            id: "proj-vertical-farm".to_string(),
            name: "StackHarvest".to_string(),
            industry: "AgTech".to_string(),
            industry_growth_rate: 13.0,
            market_size: 3_900_000_000.0,
            competitor_count: 6,
            initial_investment: 7_800_000.0,
            team_size: 22,
            last_updated: now,
        },
    ]
}
