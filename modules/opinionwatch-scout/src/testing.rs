// Test mocks for the comment pipeline.
//
// Service seam mocks (drive the real Discoverer/Collector/Classifier):
// - MockVideoSearch (VideoSearch): fixed id list or failure, records params
// - MockCommentPages (CommentPages): synthetic paged comments per video
// - MockModelLoader (ModelLoader): text→label map, per-text and load failures
//
// Stage contract stubs (drive the Pipeline state machine):
// - StubDiscoverer, StubCollector, StubClassifier, MockDatasetStore
//
// Plus helpers for building snippets and comments.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use opinionwatch_common::{Comment, ContentId, Dataset, Sentiment};
use youtube_client::{CommentPage, CommentSnippet, SearchParams};

use crate::traits::{
    Collection, CommentCollector, CommentPages, ContentDiscoverer, DatasetStore, ModelLoader,
    SentimentModel, TextClassifier, VideoSearch,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn snippet(author: &str, text: &str, likes: i64) -> CommentSnippet {
    CommentSnippet {
        author_display_name: Some(author.to_string()),
        text_display: Some(text.to_string()),
        published_at: Some("2025-09-01T10:00:00Z".to_string()),
        like_count: Some(likes),
    }
}

/// An unclassified comment carrying only `text`.
pub fn text_comment(text: &str) -> Comment {
    Comment {
        author: Some("@tester".to_string()),
        text: Some(text.to_string()),
        ..Default::default()
    }
}

/// A classified comment, for report and store fixtures.
pub fn labelled(author: &str, text: &str, sentiment: Sentiment) -> Comment {
    Comment {
        author: Some(author.to_string()),
        text: Some(text.to_string()),
        sentiment: Some(sentiment),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// MockVideoSearch
// ---------------------------------------------------------------------------

pub struct MockVideoSearch {
    ids: Option<Vec<ContentId>>,
    last_params: Mutex<Option<SearchParams>>,
}

impl MockVideoSearch {
    pub fn returning(ids: Vec<&str>) -> Self {
        Self {
            ids: Some(ids.into_iter().map(String::from).collect()),
            last_params: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            ids: None,
            last_params: Mutex::new(None),
        }
    }

    pub fn last_params(&self) -> Option<SearchParams> {
        self.last_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearch for MockVideoSearch {
    async fn search_videos(&self, params: &SearchParams) -> Result<Vec<ContentId>> {
        *self.last_params.lock().unwrap() = Some(params.clone());
        match &self.ids {
            Some(ids) => Ok(ids.clone()),
            None => bail!("MockVideoSearch: quota exceeded"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockCommentPages
// ---------------------------------------------------------------------------

struct VideoComments {
    total: usize,
    page_size: usize,
}

/// Synthetic comment pages. Comment texts are `{video_id}-{n}`; page tokens
/// are page indexes. Unregistered videos fail on the first request.
/// Builder pattern: `.on_video()`, `.fail_after()`.
pub struct MockCommentPages {
    videos: HashMap<String, VideoComments>,
    fail_after: HashMap<String, usize>,
    calls: Mutex<Vec<String>>,
}

impl MockCommentPages {
    pub fn new() -> Self {
        Self {
            videos: HashMap::new(),
            fail_after: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_video(mut self, video_id: &str, total: usize, page_size: usize) -> Self {
        self.videos
            .insert(video_id.to_string(), VideoComments { total, page_size });
        self
    }

    /// Serve `ok_pages` pages for `video_id`, then fail.
    pub fn fail_after(mut self, video_id: &str, ok_pages: usize) -> Self {
        self.fail_after.insert(video_id.to_string(), ok_pages);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, video_id: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == video_id)
            .count()
    }
}

impl Default for MockCommentPages {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentPages for MockCommentPages {
    async fn comment_page(&self, video_id: &str, page_token: Option<&str>) -> Result<CommentPage> {
        self.calls.lock().unwrap().push(video_id.to_string());

        let video = self
            .videos
            .get(video_id)
            .ok_or_else(|| anyhow!("MockCommentPages: no video registered for {video_id}"))?;
        let page = page_token.map(str::parse::<usize>).transpose()?.unwrap_or(0);

        if let Some(&ok_pages) = self.fail_after.get(video_id) {
            if page >= ok_pages {
                bail!("MockCommentPages: commentsDisabled for {video_id}");
            }
        }

        let start = page * video.page_size;
        let end = (start + video.page_size).min(video.total);
        let comments = (start..end)
            .map(|n| snippet("@viewer", &format!("{video_id}-{n}"), 0))
            .collect();
        let next_page_token = (end < video.total).then(|| (page + 1).to_string());

        Ok(CommentPage {
            comments,
            next_page_token,
        })
    }
}

// ---------------------------------------------------------------------------
// MockModelLoader
// ---------------------------------------------------------------------------

const DEFAULT_LABEL: &str = "LABEL_1";

/// Text→label lookup. Unregistered texts get `LABEL_1`.
/// Builder pattern: `.on_text()`, `.failing_on()`, `.failing_load()`.
pub struct MockModelLoader {
    labels: HashMap<String, String>,
    failing: HashSet<String>,
    fail_load: bool,
    seen: Arc<Mutex<Vec<String>>>,
}

impl MockModelLoader {
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
            failing: HashSet::new(),
            fail_load: false,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on_text(mut self, text: &str, label: &str) -> Self {
        self.labels.insert(text.to_string(), label.to_string());
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Every text passed to `predict`, in call order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Default for MockModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

struct MockModel {
    labels: HashMap<String, String>,
    failing: HashSet<String>,
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SentimentModel for MockModel {
    async fn predict(&self, text: &str) -> Result<String> {
        self.seen.lock().unwrap().push(text.to_string());
        if self.failing.contains(text) {
            bail!("MockModel: inference failed");
        }
        Ok(self
            .labels
            .get(text)
            .cloned()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string()))
    }
}

#[async_trait]
impl ModelLoader for MockModelLoader {
    async fn load(&self) -> Result<Box<dyn SentimentModel>> {
        if self.fail_load {
            bail!("MockModelLoader: model unavailable");
        }
        Ok(Box::new(MockModel {
            labels: self.labels.clone(),
            failing: self.failing.clone(),
            seen: self.seen.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Stage stubs
// ---------------------------------------------------------------------------

pub struct StubDiscoverer {
    ids: Vec<ContentId>,
    last_request: Mutex<Option<(String, u32, u32)>>,
}

impl StubDiscoverer {
    pub fn returning(ids: Vec<&str>) -> Self {
        Self {
            ids: ids.into_iter().map(String::from).collect(),
            last_request: Mutex::new(None),
        }
    }

    /// `(query, max_results, period_days)` of the last call.
    pub fn last_request(&self) -> Option<(String, u32, u32)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentDiscoverer for StubDiscoverer {
    async fn discover(&self, query: &str, max_results: u32, period_days: u32) -> Vec<ContentId> {
        *self.last_request.lock().unwrap() = Some((query.to_string(), max_results, period_days));
        self.ids.clone()
    }
}

pub struct StubCollector {
    comments: Vec<Comment>,
    targets: Mutex<Vec<usize>>,
}

impl StubCollector {
    pub fn returning(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.targets.lock().unwrap().len()
    }

    pub fn last_target(&self) -> Option<usize> {
        self.targets.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl CommentCollector for StubCollector {
    async fn collect(&self, items: &[ContentId], target_count: usize) -> Collection {
        self.targets.lock().unwrap().push(target_count);
        Collection {
            comments: self.comments.clone(),
            items_fetched: items.len(),
            items_failed: 0,
        }
    }
}

/// Labels every comment with the same sentiment.
pub struct StubClassifier {
    sentiment: Sentiment,
    calls: Mutex<usize>,
}

impl StubClassifier {
    pub fn labelling(sentiment: Sentiment) -> Self {
        Self {
            sentiment,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextClassifier for StubClassifier {
    async fn classify_batch(&self, comments: Vec<Comment>) -> Vec<Comment> {
        *self.calls.lock().unwrap() += 1;
        comments
            .into_iter()
            .map(|c| c.with_sentiment(self.sentiment))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// MockDatasetStore
// ---------------------------------------------------------------------------

/// In-memory replace-on-save store.
pub struct MockDatasetStore {
    dataset: Mutex<Option<Dataset>>,
    fail_save: bool,
}

impl MockDatasetStore {
    pub fn new() -> Self {
        Self {
            dataset: Mutex::new(None),
            fail_save: false,
        }
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn saved(&self) -> Option<Dataset> {
        self.dataset.lock().unwrap().clone()
    }
}

impl Default for MockDatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetStore for MockDatasetStore {
    async fn save(&self, dataset: &Dataset) -> Result<usize> {
        if self.fail_save {
            bail!("MockDatasetStore: database is locked");
        }
        *self.dataset.lock().unwrap() = Some(dataset.clone());
        Ok(dataset.len())
    }

    async fn load(&self) -> Result<Option<Dataset>> {
        Ok(self.dataset.lock().unwrap().clone())
    }
}
