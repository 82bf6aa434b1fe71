//! Seed dataset for the economic store
//!
//! Hand-authored fixtures, one block per context. Values are plausible
//! but synthetic; the feed perturbs them from here.

use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::model::{
    ContextData, EconomicContext, EconomicEvent, EconomicMetric, EventImpact, Forecast,
    MetricUnit, NewsItem,
};

/// Build the full seed dataset, keyed by context
pub fn seed_data() -> HashMap<EconomicContext, ContextData> {
    let mut data = HashMap::new();
    data.insert(EconomicContext::Local, local());
    data.insert(EconomicContext::State, state());
    data.insert(EconomicContext::National, national());
    data.insert(EconomicContext::International, international());
    data
}

fn local() -> ContextData {
    let now = Utc::now();
    ContextData {
        metrics: vec![
            EconomicMetric::new(
                "local_unemployment",
                "Unemployment Rate",
                4.2,
                MetricUnit::Percent,
                -0.3,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "local_median_income",
                "Median Household Income",
                68_400.0,
                MetricUnit::Usd,
                1_200.0,
                "2026",
            ),
            EconomicMetric::new(
                "local_housing_starts",
                "Housing Starts",
                312.0,
                MetricUnit::Count,
                18.0,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "local_new_businesses",
                "New Business Registrations",
                87.0,
                MetricUnit::Count,
                -5.0,
                "Jul 2026",
            ),
        ],
        news: vec![
            NewsItem {
                id: "local-news-1".to_string(),
                headline: "Downtown revitalization project breaks ground".to_string(),
                summary: "A $40M mixed-use development is expected to add 300 jobs over two years."
                    .to_string(),
                source: "Metro Ledger".to_string(),
                published_at: now - Duration::hours(6),
            },
            NewsItem {
                id: "local-news-2".to_string(),
                headline: "Regional transit authority approves fare freeze".to_string(),
                summary: "Fares hold steady through 2027 despite rising operating costs."
                    .to_string(),
                source: "City Desk".to_string(),
                published_at: now - Duration::hours(20),
            },
        ],
        forecasts: vec![Forecast {
            metric_id: "local_unemployment".to_string(),
            horizon: "Q4 2026".to_string(),
            projected_value: 4.0,
            source: "Metro Economic Council".to_string(),
        }],
        events: vec![EconomicEvent {
            id: "local-event-1".to_string(),
            title: "County budget hearing".to_string(),
            scheduled_for: now + Duration::days(9),
            impact: EventImpact::Low,
        }],
        last_updated: now,
    }
}

fn state() -> ContextData {
    let now = Utc::now();
    ContextData {
        metrics: vec![
            EconomicMetric::new(
                "state_gdp_growth",
                "State GDP Growth",
                2.6,
                MetricUnit::Percent,
                0.2,
                "Q2 2026",
            ),
            EconomicMetric::new(
                "state_unemployment",
                "Unemployment Rate",
                4.5,
                MetricUnit::Percent,
                -0.1,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "state_tax_revenue",
                "Tax Revenue",
                31.8,
                MetricUnit::UsdBillions,
                0.9,
                "FY 2026",
            ),
            EconomicMetric::new(
                "state_avg_wage",
                "Average Hourly Wage",
                31.40,
                MetricUnit::Usd,
                0.55,
                "Jul 2026",
            ),
        ],
        news: vec![NewsItem {
            id: "state-news-1".to_string(),
            headline: "State legislature passes small-business credit expansion".to_string(),
            summary: "Tax credits for firms under 50 employees double starting next fiscal year."
                .to_string(),
            source: "Capitol Wire".to_string(),
            published_at: now - Duration::hours(11),
        }],
        forecasts: vec![Forecast {
            metric_id: "state_gdp_growth".to_string(),
            horizon: "Q3 2026".to_string(),
            projected_value: 2.8,
            source: "State Budget Office".to_string(),
        }],
        events: vec![EconomicEvent {
            id: "state-event-1".to_string(),
            title: "Quarterly revenue report release".to_string(),
            scheduled_for: now + Duration::days(14),
            impact: EventImpact::Medium,
        }],
        last_updated: now,
    }
}

fn national() -> ContextData {
    let now = Utc::now();
    ContextData {
        metrics: vec![
            EconomicMetric::new(
                "national_gdp_growth",
                "GDP Growth",
                2.1,
                MetricUnit::Percent,
                -0.3,
                "Q2 2026",
            ),
            EconomicMetric::new(
                "national_inflation",
                "CPI Inflation",
                2.9,
                MetricUnit::Percent,
                -0.2,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "national_unemployment",
                "Unemployment Rate",
                4.1,
                MetricUnit::Percent,
                0.1,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "national_consumer_confidence",
                "Consumer Confidence",
                101.3,
                MetricUnit::Points,
                2.4,
                "Jul 2026",
            ),
            EconomicMetric::new(
                "national_fed_rate",
                "Federal Funds Rate",
                3.75,
                MetricUnit::Percent,
                -0.25,
                "Jul 2026",
            ),
        ],
        news: vec![
            NewsItem {
                id: "national-news-1".to_string(),
                headline: "Central bank signals one more cut this year".to_string(),
                summary: "Futures markets now price a 70% chance of a September cut.".to_string(),
                source: "National Business Post".to_string(),
                published_at: now - Duration::hours(3),
            },
            NewsItem {
                id: "national-news-2".to_string(),
                headline: "Manufacturing PMI returns to expansion".to_string(),
                summary: "First reading above 50 in seven months, led by new orders.".to_string(),
                source: "Industry Daily".to_string(),
                published_at: now - Duration::hours(27),
            },
        ],
        forecasts: vec![
            Forecast {
                metric_id: "national_gdp_growth".to_string(),
                horizon: "FY 2026".to_string(),
                projected_value: 2.3,
                source: "Congressional Budget Office".to_string(),
            },
            Forecast {
                metric_id: "national_inflation".to_string(),
                horizon: "Dec 2026".to_string(),
                projected_value: 2.5,
                source: "Consensus Economics".to_string(),
            },
        ],
        events: vec![EconomicEvent {
            id: "national-event-1".to_string(),
            title: "FOMC rate decision".to_string(),
            scheduled_for: now + Duration::days(21),
            impact: EventImpact::High,
        }],
        last_updated: now,
    }
}

fn international() -> ContextData {
    let now = Utc::now();
    ContextData {
        metrics: vec![
            EconomicMetric::new(
                "global_gdp_growth",
                "Global GDP Growth",
                3.0,
                MetricUnit::Percent,
                0.1,
                "2026",
            ),
            EconomicMetric::new(
                "global_trade_volume",
                "Global Trade Volume",
                24_600.0,
                MetricUnit::UsdBillions,
                380.0,
                "Q2 2026",
            ),
            EconomicMetric::new(
                "global_oil_price",
                "Brent Crude",
                78.20,
                MetricUnit::Usd,
                -2.10,
                "Spot",
            ),
            EconomicMetric::new(
                "global_shipping_index",
                "Container Freight Index",
                1_842.0,
                MetricUnit::Points,
                96.0,
                "Jul 2026",
            ),
        ],
        news: vec![NewsItem {
            id: "intl-news-1".to_string(),
            headline: "Trade bloc finalizes tariff reduction schedule".to_string(),
            summary: "Phased cuts on industrial goods begin January, agriculture exempted."
                .to_string(),
            source: "World Economic Review".to_string(),
            published_at: now - Duration::hours(9),
        }],
        forecasts: vec![Forecast {
            metric_id: "global_gdp_growth".to_string(),
            horizon: "2027".to_string(),
            projected_value: 3.2,
            source: "IMF World Economic Outlook".to_string(),
        }],
        events: vec![EconomicEvent {
            id: "intl-event-1".to_string(),
            title: "G20 finance ministers summit".to_string(),
            scheduled_for: now + Duration::days(30),
            impact: EventImpact::Medium,
        }],
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_contexts_seeded() {
        let data = seed_data();
        assert_eq!(data.len(), 4);
        for context in EconomicContext::all() {
            let ctx = data.get(context).unwrap();
            assert!(!ctx.metrics.is_empty(), "{} has no metrics", context);
            assert!(!ctx.news.is_empty(), "{} has no news", context);
            assert!(!ctx.forecasts.is_empty(), "{} has no forecasts", context);
            assert!(!ctx.events.is_empty(), "{} has no events", context);
        }
    }

    #[test]
    fn test_metric_ids_unique_across_contexts() {
        let data = seed_data();
        let mut ids = std::collections::HashSet::new();
        for ctx in data.values() {
            for metric in &ctx.metrics {
                assert!(ids.insert(metric.id.clone()), "duplicate id {}", metric.id);
            }
        }
    }

    #[test]
    fn test_forecasts_reference_seeded_metrics() {
        let data = seed_data();
        for ctx in data.values() {
            let ids: Vec<_> = ctx.metrics.iter().map(|m| m.id.as_str()).collect();
            for forecast in &ctx.forecasts {
                assert!(ids.contains(&forecast.metric_id.as_str()));
            }
        }
    }
}
