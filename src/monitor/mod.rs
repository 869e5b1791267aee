//! Pipeline orchestration and its configuration.

pub mod config;
pub mod sample_loop;

// Re-export commonly used items
pub use config::MonitorConfig;
pub use sample_loop::{CycleOutcome, LoopState, SampleLoop};
