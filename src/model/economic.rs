//! Economic indicator types
//!
//! This module defines the entities held by the economic store:
//! - `EconomicMetric`: a single headline indicator (GDP growth, CPI, ...)
//! - `EconomicContext`: the geographic partition key for all collections
//! - `NewsItem`, `Forecast`, `EconomicEvent`: per-context companion data
//! - `ContextData`: everything the store holds for one context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic context an indicator belongs to
///
/// Partition key for every economic collection: each context owns its
/// own metrics, news, forecasts and events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EconomicContext {
    Local,
    State,
    National,
    International,
}

impl EconomicContext {
    /// Get all contexts for iteration
    pub fn all() -> &'static [EconomicContext] {
        &[
            EconomicContext::Local,
            EconomicContext::State,
            EconomicContext::National,
            EconomicContext::International,
        ]
    }
}

impl std::fmt::Display for EconomicContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EconomicContext::Local => write!(f, "local"),
            EconomicContext::State => write!(f, "state"),
            EconomicContext::National => write!(f, "national"),
            EconomicContext::International => write!(f, "international"),
        }
    }
}

/// Unit of measurement for a metric value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    /// Percentage (growth rates, unemployment)
    Percent,
    /// Index points (confidence indexes, PMI)
    Points,
    /// US dollars (median income, average wage)
    Usd,
    /// Billions of US dollars (GDP, trade volume)
    UsdBillions,
    /// Plain count (housing starts, new businesses)
    Count,
}

impl std::fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricUnit::Percent => write!(f, "%"),
            MetricUnit::Points => write!(f, "pts"),
            MetricUnit::Usd => write!(f, "USD"),
            MetricUnit::UsdBillions => write!(f, "B USD"),
            MetricUnit::Count => write!(f, "count"),
        }
    }
}

/// Direction a metric moved over its reporting period
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Derive the trend from a change value
    pub fn from_change(change: f64) -> Self {
        if change > f64::EPSILON {
            Trend::Up
        } else if change < -f64::EPSILON {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// A single economic indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomicMetric {
    /// Stable identifier (e.g. "gdp_growth")
    pub id: String,
    /// Human-readable name (e.g. "GDP Growth")
    pub name: String,
    /// Current value
    pub value: f64,
    /// Unit of measurement
    pub unit: MetricUnit,
    /// Absolute change over the reporting period
    pub change: f64,
    /// Change as a percentage of the prior value, derived from `change`
    pub change_percent: f64,
    /// Direction of the change
    pub trend: Trend,
    /// Reporting period label (e.g. "Q2 2026", "Jul 2026")
    pub period: String,
}

impl EconomicMetric {
    /// Create a metric with change/trend derived from a prior value
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        unit: MetricUnit,
        change: f64,
        period: impl Into<String>,
    ) -> Self {
        let previous = value - change;
        let mut metric = Self {
            id: id.into(),
            name: name.into(),
            value,
            unit,
            change,
            change_percent: 0.0,
            trend: Trend::from_change(change),
            period: period.into(),
        };
        metric.change_percent = Self::percent_of(change, previous);
        metric
    }

    /// Re-derive `change_percent` and `trend` after a mutation
    ///
    /// `previous` is the value the metric held before the mutation.
    /// Keeps the change/change_percent invariant: the two always agree.
    pub fn rederive(&mut self, previous: f64) {
        self.change_percent = Self::percent_of(self.change, previous);
        self.trend = Trend::from_change(self.change);
    }

    fn percent_of(change: f64, previous: f64) -> f64 {
        if previous.abs() < f64::EPSILON {
            0.0
        } else {
            change / previous * 100.0
        }
    }
}

/// A news headline attached to a context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// A projection for a metric over a stated horizon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    /// Metric this forecast applies to
    pub metric_id: String,
    /// Horizon label (e.g. "Q3 2026", "12 months")
    pub horizon: String,
    /// Projected value at the horizon
    pub projected_value: f64,
    /// Forecaster attribution
    pub source: String,
}

/// Expected market impact of a calendar event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Low,
    Medium,
    High,
}

/// A scheduled economic calendar event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconomicEvent {
    pub id: String,
    pub title: String,
    pub scheduled_for: DateTime<Utc>,
    pub impact: EventImpact,
}

/// Everything the economic store holds for one context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextData {
    pub metrics: Vec<EconomicMetric>,
    pub news: Vec<NewsItem>,
    pub forecasts: Vec<Forecast>,
    pub events: Vec<EconomicEvent>,
    /// When this context's data last changed
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_change() {
        assert_eq!(Trend::from_change(0.3), Trend::Up);
        assert_eq!(Trend::from_change(-0.3), Trend::Down);
        assert_eq!(Trend::from_change(0.0), Trend::Flat);
    }

    #[test]
    fn test_metric_derives_change_percent() {
        // value 102, change 2 -> previous 100 -> 2%
        let metric = EconomicMetric::new(
            "gdp_growth",
            "GDP Growth",
            102.0,
            MetricUnit::Points,
            2.0,
            "Q2 2026",
        );
        assert!((metric.change_percent - 2.0).abs() < 1e-9);
        assert_eq!(metric.trend, Trend::Up);
    }

    #[test]
    fn test_rederive_handles_zero_previous() {
        let mut metric = EconomicMetric::new(
            "new_businesses",
            "New Businesses",
            40.0,
            MetricUnit::Count,
            40.0,
            "Jul 2026",
        );
        metric.rederive(0.0);
        assert_eq!(metric.change_percent, 0.0);
    }

    #[test]
    fn test_context_serde_roundtrip() {
        let json = serde_json::to_string(&EconomicContext::International).unwrap();
        assert_eq!(json, "\"international\"");
        let restored: EconomicContext = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, EconomicContext::International);
    }

    #[test]
    fn test_all_contexts() {
        assert_eq!(EconomicContext::all().len(), 4);
    }
}
