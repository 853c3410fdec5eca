pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FileConfig};
pub use error::OpinionWatchError;
pub use types::*;
