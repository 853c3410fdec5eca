pub mod classifier;
pub mod collector;
pub mod discovery;
pub mod logging;
pub mod pipeline;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use classifier::Classifier;
pub use collector::Collector;
pub use discovery::Discoverer;
pub use pipeline::orchestrator::{Pipeline, PipelineParams};
pub use pipeline::stats::{RunReport, RunStats, RunStatus};
