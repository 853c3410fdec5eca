use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::error::{Result, SentimentError};
use crate::types::{ClassificationResponse, InferenceRequest, ModelInfo, Prediction};

pub(crate) struct HfClient {
    api_token: Option<String>,
    http: reqwest::Client,
    hub_url: String,
    inference_url: String,
}

impl HfClient {
    pub fn new(api_token: Option<String>, hub_url: &str, inference_url: &str) -> Self {
        Self {
            api_token,
            http: reqwest::Client::new(),
            hub_url: hub_url.trim_end_matches('/').to_string(),
            inference_url: inference_url.trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.api_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub async fn model_info(&self, model_id: &str) -> Result<ModelInfo> {
        let url = format!("{}/api/models/{}", self.hub_url, model_id);

        debug!(model_id, "Hub model info request");

        let response = self.http.get(&url).headers(self.headers()?).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SentimentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn text_classification(&self, model_id: &str, text: &str) -> Result<Prediction> {
        let url = format!("{}/models/{}", self.inference_url, model_id);

        debug!(model_id, chars = text.chars().count(), "Inference request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SentimentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ClassificationResponse = response.json().await?;
        body.top().ok_or(SentimentError::EmptyPrediction)
    }
}
