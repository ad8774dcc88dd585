//! Channel type definitions for publishing results to the display layer

use std::sync::Arc;
use tokio::sync::watch;

use super::types::TradeResult;

/// What the result slot currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Nothing submitted yet
    Idle,
    /// A calculation is in flight
    Loading,
    /// The latest calculation finished
    Ready(Arc<TradeResult>),
    /// The latest calculation failed with a user-facing message
    Failed(String),
}

/// Generation-tagged slot contents
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Generation of the submission this status belongs to
    pub generation: u64,
    pub status: SessionStatus,
}

impl SessionState {
    pub fn idle() -> Self {
        Self {
            generation: 0,
            status: SessionStatus::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    pub fn result(&self) -> Option<Arc<TradeResult>> {
        match &self.status {
            SessionStatus::Ready(result) => Some(result.clone()),
            _ => None,
        }
    }
}

/// Create a new result slot starting in the idle state
pub fn create_result_channel() -> (watch::Sender<SessionState>, watch::Receiver<SessionState>) {
    watch::channel(SessionState::idle())
}

/// Publish `status` for `generation` unless a newer generation already owns
/// the slot. The check and the write happen under the channel lock.
///
/// Returns true if the slot was updated.
pub fn publish_if_current(
    sender: &watch::Sender<SessionState>,
    generation: u64,
    status: SessionStatus,
) -> bool {
    sender.send_if_modified(|current| {
        if generation < current.generation {
            return false;
        }
        current.generation = generation;
        current.status = status;
        true
    })
}
