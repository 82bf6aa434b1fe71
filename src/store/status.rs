//! Store status block
//!
//! Both stores run the same machine:
//! `idle -> loading -> (success: idle | error: idle-with-error)`.
//! Background feed ticks bypass it entirely; only fetch/compute
//! operations move the flags.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::feed::ConnectionState;

/// Status flags shared by both stores
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    /// A fetch is in flight
    pub is_loading: bool,
    /// An on-demand analysis is in flight (feasibility store only)
    pub is_calculating: bool,
    /// Last error message, cleared by the next successful operation
    pub error: Option<String>,
    /// State of the simulated connection
    pub connection: ConnectionState,
    /// When any operation last committed
    pub last_updated: Option<DateTime<Utc>>,
}

impl StoreStatus {
    pub fn new(connection: ConnectionState) -> Self {
        Self {
            is_loading: false,
            is_calculating: false,
            error: None,
            connection,
            last_updated: None,
        }
    }

    /// idle -> loading; clears any stale error
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// loading -> idle (success)
    pub fn finish_ok(&mut self) {
        self.is_loading = false;
        self.is_calculating = false;
        self.error = None;
        self.last_updated = Some(Utc::now());
    }

    /// loading -> idle-with-error; busy flags always reset
    pub fn finish_err(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.is_calculating = false;
        self.error = Some(message.into());
    }

    pub fn begin_calculating(&mut self) {
        self.is_calculating = true;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_machine_success_path() {
        let mut status = StoreStatus::new(ConnectionState::Open);
        assert!(!status.is_loading);

        status.begin_loading();
        assert!(status.is_loading);

        status.finish_ok();
        assert!(!status.is_loading);
        assert!(status.error.is_none());
        assert!(status.last_updated.is_some());
    }

    #[test]
    fn test_status_machine_error_path() {
        let mut status = StoreStatus::new(ConnectionState::Open);
        status.begin_loading();
        status.finish_err("Fetch failed: simulated");

        assert!(!status.is_loading);
        assert_eq!(status.error.as_deref(), Some("Fetch failed: simulated"));
        assert!(status.last_updated.is_none());
    }

    #[test]
    fn test_next_load_clears_error() {
        let mut status = StoreStatus::new(ConnectionState::Open);
        status.begin_loading();
        status.finish_err("boom");
        status.begin_loading();
        assert!(status.error.is_none());
    }
}
