//! Simulation context and run loop.
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    CarConfig, DispatchConfig, RunSummary, Simulation, SimulationConfig, SimulationError,
    DEFAULT_CAPACITY,
};
