pub mod orchestrator;
pub mod state;
pub mod stats;
