pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    CommentPage, CommentSnippet, CommentThreadListResponse, SearchListResponse, SearchParams,
};

use types::ErrorEnvelope;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Comment threads are always requested at the API maximum.
pub const COMMENT_PAGE_SIZE: u32 = 100;

pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (tests, proxies).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Search for videos, relevance-ranked. Returns video ids in ranking order.
    pub async fn search_videos(&self, params: &SearchParams) -> Result<Vec<String>> {
        tracing::debug!(query = %params.query, max_results = params.max_results, "YouTube search request");

        let url = format!("{}/search", self.base_url);
        let max_results = params.max_results.to_string();
        let published_after = params.published_after_param();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", params.query.as_str()),
                ("type", "video"),
                ("order", "relevance"),
                ("maxResults", max_results.as_str()),
                ("regionCode", params.region_code.as_str()),
                ("relevanceLanguage", params.relevance_language.as_str()),
                ("publishedAfter", published_after.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let resp = error_for_status(resp).await?;
        let body: SearchListResponse = resp.json().await?;
        Ok(body.video_ids())
    }

    /// Fetch one page of top-level comment threads for a video.
    pub async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage> {
        tracing::debug!(video_id, page_token, "YouTube commentThreads request");

        let url = format!("{}/commentThreads", self.base_url);
        let page_size = COMMENT_PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("textFormat", "plainText"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let resp = self.client.get(&url).query(&query).send().await?;
        let resp = error_for_status(resp).await?;
        let body: CommentThreadListResponse = resp.json().await?;
        Ok(body.into())
    }
}

/// Turn a non-2xx response into `YouTubeError::Api`, preferring the message
/// from Google's error envelope over the raw body.
async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(YouTubeError::Api {
        status: status.as_u16(),
        message,
    })
}
