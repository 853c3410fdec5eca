use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::OpinionWatchError;

// =============================================================================
// File config (TOML)
// =============================================================================

/// TOML-backed configuration loaded from disk. Every section is optional and
/// falls back to the defaults below. Secrets stay as env vars (`AppConfig`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Longest accepted recency window, in days.
pub const MAX_PERIOD_DAYS: u32 = 3650;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// `|` for OR, double quotes for an exact phrase.
    pub query: String,
    pub max_results: u32,
    pub period_days: u32,
    pub region_code: String,
    pub relevance_language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: r#""demo mahasiswa" | "perampasan asset" | "tolak RUU""#.to_string(),
            max_results: 15,
            period_days: 7,
            region_code: "ID".to_string(),
            relevance_language: "id".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    pub target_comments: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            target_comments: 20_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub model_id: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "mdhugol/indonesia-bert-sentiment-classification".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("youtube_data.db"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Append logs to this file instead of the console.
    pub file: Option<PathBuf>,
    pub json: bool,
}

impl FileConfig {
    /// Load and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), OpinionWatchError> {
        if self.search.query.trim().is_empty() {
            return Err(OpinionWatchError::Config("search.query must not be empty".into()));
        }
        if self.search.max_results == 0 || self.search.max_results > 50 {
            return Err(OpinionWatchError::Config(
                "search.max_results must be between 1 and 50".into(),
            ));
        }
        if !(1..=MAX_PERIOD_DAYS).contains(&self.search.period_days) {
            return Err(OpinionWatchError::Config(format!(
                "search.period_days must be between 1 and {MAX_PERIOD_DAYS}"
            )));
        }
        if self.model.model_id.trim().is_empty() {
            return Err(OpinionWatchError::Config("model.model_id must not be empty".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Env config (secrets, endpoints)
// =============================================================================

/// Secrets and env-specific values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub hf_api_token: Option<String>,

    // Endpoint overrides
    pub youtube_api_base: Option<String>,
    pub hf_hub_base: Option<String>,
    pub hf_inference_base: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            youtube_api_key: non_empty("YOUTUBE_API_KEY").ok_or_else(|| {
                OpinionWatchError::Config("YOUTUBE_API_KEY environment variable is required".into())
            })?,
            hf_api_token: non_empty("HF_API_TOKEN"),
            youtube_api_base: non_empty("YOUTUBE_API_BASE"),
            hf_hub_base: non_empty("HF_HUB_BASE"),
            hf_inference_base: non_empty("HF_INFERENCE_BASE"),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{}...({} chars)", head, val.chars().count())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => preview(v),
                None => "<not set>".to_string(),
            }
        }

        tracing::info!(
            youtube_api_key = %preview(&self.youtube_api_key),
            hf_api_token = %preview_opt(&self.hf_api_token),
            youtube_api_base = self.youtube_api_base.as_deref().unwrap_or("<default>"),
            hf_hub_base = self.hf_hub_base.as_deref().unwrap_or("<default>"),
            hf_inference_base = self.hf_inference_base.as_deref().unwrap_or("<default>"),
            "Config loaded"
        );
    }
}
