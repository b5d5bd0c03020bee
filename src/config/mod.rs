// src/config/mod.rs
pub mod simulation;
pub mod settings;

// Re-export commonly used types
pub use simulation::{DistributionKind, DistributionParams, SimulationConfig};
pub use settings::AppSettings;
