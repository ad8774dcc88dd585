//! Result slot with last-write-wins semantics over overlapping submissions

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::engine::TradeSimulator;
use crate::common::channels::{
    create_result_channel, publish_if_current, SessionState, SessionStatus,
};
use crate::common::types::TradeRequest;

/// Interactive simulation session
///
/// Every submission gets a generation number. Only the newest generation may
/// write the result slot, so a slow earlier calculation can never replace the
/// result of a later one. Superseded calculations are also aborted.
pub struct SimulationSession {
    simulator: Arc<TradeSimulator>,
    sender: Arc<watch::Sender<SessionState>>,
    generation: AtomicU64,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl SimulationSession {
    pub fn new(simulator: Arc<TradeSimulator>) -> Self {
        let (sender, _receiver) = create_result_channel();
        Self {
            simulator,
            sender: Arc::new(sender),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    /// Watch the result slot
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Snapshot of the result slot
    pub fn current(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Start a calculation for `request`
    ///
    /// Invalid requests are ignored and leave the slot untouched. Returns the
    /// generation of the started calculation. Must be called from within a
    /// tokio runtime.
    pub fn submit(&self, request: TradeRequest) -> Option<u64> {
        if let Err(e) = request.validate() {
            debug!(error = %e, "ignoring invalid submission");
            return None;
        }

        // The generation is taken under the lock so that the task being
        // replaced is always an older one.
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, symbol = %request.symbol, "submitting simulation");

        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        publish_if_current(&self.sender, generation, SessionStatus::Loading);

        let simulator = self.simulator.clone();
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let status = match simulator.simulate(&request).await {
                Ok(result) => SessionStatus::Ready(Arc::new(result)),
                Err(e) => {
                    warn!(generation, error = %e, "simulation failed");
                    SessionStatus::Failed(e.user_message())
                }
            };
            if !publish_if_current(&sender, generation, status) {
                debug!(generation, "discarding superseded result");
            }
        });
        *in_flight = Some(handle);

        Some(generation)
    }

    /// Start a calculation from unvalidated inputs
    ///
    /// A missing date or a non-positive quantity is a no-op.
    pub fn submit_raw(
        &self,
        symbol: &str,
        buy_date: Option<NaiveDate>,
        sell_date: Option<NaiveDate>,
        quantity: i64,
    ) -> Option<u64> {
        let (buy_date, sell_date) = (buy_date?, sell_date?);
        let quantity = u32::try_from(quantity).ok()?;
        let request = TradeRequest::new(symbol, buy_date, sell_date, quantity).ok()?;
        self.submit(request)
    }

    /// Wait until the latest submission has settled and return the slot
    pub async fn settled(&self) -> SessionState {
        let target = self.generation.load(Ordering::SeqCst);
        let mut receiver = self.sender.subscribe();
        let state = match receiver
            .wait_for(|state| state.generation >= target && !state.is_loading())
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.current(),
        };
        state
    }
}

impl Drop for SimulationSession {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if let Some(handle) = in_flight.take() {
                handle.abort();
            }
        }
    }
}
