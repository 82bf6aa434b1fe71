//! Store update events
//!
//! Stores publish a typed event on every committed mutation so consumers
//! (a renderer, the demo binary, tests counting ticks) can react without
//! polling. Backed by a tokio broadcast channel; slow consumers lag and
//! drop, they never block a store.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::model::{EconomicContext, FeasibilityMode};
use super::connection::ConnectionState;

/// Which kind of update a feasibility tick applied
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityTickKind {
    /// Project growth rates and competitor counts moved
    Projects,
    /// Risk sub-scores and confidence moved
    RiskScores,
    /// NPV/IRR figures moved
    Valuation,
}

/// An update committed by one of the stores
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A manual or initial economic fetch completed
    EconomicRefreshed {
        /// Contexts the refresh touched
        contexts: Vec<EconomicContext>,
    },
    /// The economic background feed perturbed one context
    EconomicTick { context: EconomicContext },
    /// A feasibility fetch completed (projects + full analysis set)
    FeasibilityRefreshed { projects: usize, analyses: usize },
    /// The feasibility background feed applied one update class
    FeasibilityTick { kind: FeasibilityTickKind },
    /// One analysis was recomputed on demand
    AnalysisCompleted {
        project_id: String,
        mode: FeasibilityMode,
    },
    /// A project was patched
    ProjectUpdated { project_id: String },
    /// The simulated connection changed state
    ConnectionChanged { state: ConnectionState },
}

/// Broadcast fan-out for store events
#[derive(Debug, Clone)]
pub struct UpdateBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl UpdateBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; a send with no subscribers is not an error
    pub fn publish(&self, event: StoreEvent) {
        if let Ok(n) = self.tx.send(event.clone()) {
            tracing::trace!(subscribers = n, ?event, "published store event");
        }
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let bus = UpdateBus::default();
        bus.publish(StoreEvent::EconomicTick {
            context: EconomicContext::Local,
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let bus = UpdateBus::default();
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::ProjectUpdated {
            project_id: "p1".to_string(),
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            StoreEvent::ProjectUpdated {
                project_id: "p1".to_string()
            }
        );
    }

    #[test]
    fn test_event_serializes_tagged() {
        let event = StoreEvent::EconomicTick {
            context: EconomicContext::National,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"economic_tick\""));
        assert!(json.contains("\"context\":\"national\""));
    }
}
