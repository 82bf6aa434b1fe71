//! Simulated feed connection
//!
//! The "connection" behind the live feed is an in-memory handle
//! satisfying an open/close contract, never a genuine socket. Stores
//! consult it to decide whether the fallback poll timer should fire, and
//! `reconnect()` drives the single-retry recovery path.

use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};

/// State of the simulated connection
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Open,
    Closed,
}

/// In-memory connection handle
///
/// Cheap to share: state is a single atomic, no locking.
#[derive(Debug)]
pub struct FeedConnection {
    state: AtomicU8,
}

const STATE_OPEN: u8 = 0;
const STATE_CLOSED: u8 = 1;

impl FeedConnection {
    /// Create a connection in the open state
    pub fn open() -> Self {
        Self {
            state: AtomicU8::new(STATE_OPEN),
        }
    }

    /// Create a connection in the closed state
    pub fn closed() -> Self {
        Self {
            state: AtomicU8::new(STATE_CLOSED),
        }
    }

    pub fn state(&self) -> ConnectionState {
        match self.state.load(Ordering::Acquire) {
            STATE_OPEN => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Mark the connection open
    pub fn mark_open(&self) {
        self.state.store(STATE_OPEN, Ordering::Release);
    }

    /// Mark the connection closed (simulated drop)
    pub fn mark_closed(&self) {
        self.state.store(STATE_CLOSED, Ordering::Release);
    }
}

impl Default for FeedConnection {
    fn default() -> Self {
        Self::open()
    }
}
