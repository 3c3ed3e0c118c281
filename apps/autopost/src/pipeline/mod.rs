// Publication pipeline: caption formatting and the bounded-retry orchestrator.

pub mod caption;
pub mod orchestrator;

pub use orchestrator::{Orchestrator, PipelineError, PipelineSettings, PublishedPost};
