//! CLI library components for the lab results consolidator.

pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod types;
