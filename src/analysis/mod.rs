// src/analysis/mod.rs
pub mod distribution;
pub mod statistics;
pub mod simulator;

// Re-export commonly used types
pub use statistics::RunSummary;
pub use simulator::{
    Simulator,
    RunPhase,
    StepOutcome,
    ChartData
};
