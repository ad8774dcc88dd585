//! Simulation orchestration
//!
//! [`TradeSimulator`] fetches the inputs of one trade concurrently and runs
//! the calculator over them. [`SimulationSession`] owns the result slot that
//! a display layer watches.

pub mod engine;
pub mod session;

pub use engine::{TradeSimulator, DEFAULT_PROVIDER_TIMEOUT};
pub use session::SimulationSession;
