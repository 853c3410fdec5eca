use chrono::{DateTime, Utc};
use serde::Deserialize;

// --- Search ---

/// Parameters for a `search.list` call restricted to videos.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Free-text query. `|` means OR, double quotes mark an exact phrase.
    pub query: String,
    pub max_results: u32,
    /// Only videos published after this instant are returned.
    pub published_after: DateTime<Utc>,
    pub region_code: String,
    pub relevance_language: String,
}

impl SearchParams {
    /// `publishedAfter` in the RFC 3339 form the API expects (second precision, `Z` suffix).
    pub fn published_after_param(&self) -> String {
        self.published_after.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// Response body of `search.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

const VIDEO_KIND: &str = "youtube#video";

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItemId {
    pub kind: Option<String>,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

impl SearchListResponse {
    /// Video ids in ranking order. Items that are not videos are skipped.
    pub fn video_ids(self) -> Vec<String> {
        self.items
            .into_iter()
            .filter(|item| item.id.kind.as_deref().map_or(true, |k| k == VIDEO_KIND))
            .filter_map(|item| item.id.video_id)
            .collect()
    }
}

// --- Comment threads ---

/// Response body of `commentThreads.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub snippet: Option<CommentThreadSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub snippet: CommentSnippet,
}

/// The fields of a top-level comment this client exposes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: Option<String>,
    #[serde(rename = "textDisplay")]
    pub text_display: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<i64>,
}

impl CommentThread {
    pub fn into_comment(self) -> Option<CommentSnippet> {
        self.snippet?.top_level_comment.map(|c| c.snippet)
    }
}

/// One page of top-level comments plus the token for the next page, if any.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<CommentSnippet>,
    pub next_page_token: Option<String>,
}

impl From<CommentThreadListResponse> for CommentPage {
    fn from(resp: CommentThreadListResponse) -> Self {
        Self {
            comments: resp
                .items
                .into_iter()
                .filter_map(CommentThread::into_comment)
                .collect(),
            next_page_token: resp.next_page_token,
        }
    }
}

/// Error envelope returned by Google APIs on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
