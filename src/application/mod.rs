//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ingest;
pub mod ports;

// Re-export use cases
pub use ingest::{
    IngestCallbacks, IngestOptions, IngestPipeline, JobFailure, PipelineError, RunSummary, Stage,
    StageError,
};
