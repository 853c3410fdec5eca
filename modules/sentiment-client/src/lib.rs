//! Client for pretrained text-classification models served by Hugging Face.
//!
//! `HuggingFace::load_model` resolves a model on the Hub once and hands back a
//! `TextClassifier` bound to it. The classifier sends one text per request and
//! returns the top-scoring label.

mod client;
pub mod error;
pub mod types;
pub mod util;

pub use error::{Result, SentimentError};
pub use types::{ModelInfo, Prediction};
pub use util::{label_index, truncate_chars};

use client::HfClient;

const HUB_URL: &str = "https://huggingface.co";
const INFERENCE_URL: &str = "https://api-inference.huggingface.co";

const TEXT_CLASSIFICATION: &str = "text-classification";

#[derive(Clone)]
pub struct HuggingFace {
    api_token: Option<String>,
    hub_url: String,
    inference_url: String,
}

impl HuggingFace {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            api_token,
            hub_url: HUB_URL.to_string(),
            inference_url: INFERENCE_URL.to_string(),
        }
    }

    pub fn with_hub_url(mut self, url: impl Into<String>) -> Self {
        self.hub_url = url.into();
        self
    }

    pub fn with_inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = url.into();
        self
    }

    fn client(&self) -> HfClient {
        HfClient::new(self.api_token.clone(), &self.hub_url, &self.inference_url)
    }

    /// Resolve `model_id` on the Hub and check it is a text classifier.
    pub async fn load_model(&self, model_id: &str) -> Result<TextClassifier> {
        let client = self.client();
        let info = client
            .model_info(model_id)
            .await
            .map_err(|e| match e {
                SentimentError::Api { status: 404, .. } => SentimentError::ModelUnavailable {
                    model_id: model_id.to_string(),
                    reason: "not found on the Hub".to_string(),
                },
                other => other,
            })?;

        if let Some(tag) = info.pipeline_tag.as_deref() {
            if tag != TEXT_CLASSIFICATION {
                return Err(SentimentError::ModelUnavailable {
                    model_id: model_id.to_string(),
                    reason: format!("pipeline tag is {tag}, expected {TEXT_CLASSIFICATION}"),
                });
            }
        }

        tracing::info!(model_id, "Sentiment model resolved");
        Ok(TextClassifier {
            model_id: model_id.to_string(),
            client,
        })
    }
}

/// A loaded text-classification model.
pub struct TextClassifier {
    model_id: String,
    client: HfClient,
}

impl TextClassifier {
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Classify one text. Returns the top-scoring label.
    pub async fn classify(&self, text: &str) -> Result<Prediction> {
        self.client.text_classification(&self.model_id, text).await
    }
}
