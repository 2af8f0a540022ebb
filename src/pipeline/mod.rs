// Data processing pipeline: enrichment, grouping, quality assessment,
// and the orchestrator that sequences them

pub mod orchestrator;
pub mod processing;

// Re-export key types for convenience
pub use orchestrator::{DatasetSink, PipelineOrchestrator, PipelineOutcome, SummarySink};
