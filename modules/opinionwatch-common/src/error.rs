use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpinionWatchError {
    #[error("Unknown sentiment category: {0}")]
    UnknownSentiment(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
