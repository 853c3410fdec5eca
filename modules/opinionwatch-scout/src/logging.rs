//! Process-wide tracing subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use opinionwatch_common::config::LoggingConfig;

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "opinionwatch=info,youtube_client=info,sentiment_client=info";

/// Install the global subscriber. Console by default; an append-only file
/// when `config.file` is set. Call once, at process start.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match &config.file {
        None if config.json => builder.json().try_init(),
        None => builder.try_init(),
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can be set once per process; this is the only
    // test in the crate that installs one.
    #[test]
    fn file_sink_appends_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawler.log");
        std::fs::write(&path, "previous run\n").unwrap();

        init(&LoggingConfig {
            file: Some(path.clone()),
            json: false,
        })
        .unwrap();
        tracing::info!(target: "opinionwatch", rows = 3, "Dataset persisted");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert!(content.contains("Dataset persisted"));
        assert!(content.contains("rows=3"));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(&LoggingConfig {
            file: Some(dir.path().join("missing").join("crawler.log")),
            json: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
