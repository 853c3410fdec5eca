// Trait seams for the comment pipeline.
//
// Two layers:
// - Service seams (VideoSearch, CommentPages, ModelLoader/SentimentModel) wrap
//   the external APIs. The stage implementations in this crate are written
//   against them, so collector/classifier logic runs without a network.
// - Stage contracts (ContentDiscoverer, CommentCollector, TextClassifier,
//   DatasetStore) are what the orchestrator sequences. Fakes of these four
//   exercise the state machine on its own.

use anyhow::Result;
use async_trait::async_trait;

use opinionwatch_common::{Comment, ContentId, Dataset};
use opinionwatch_store::SqliteStore;
use sentiment_client::{HuggingFace, TextClassifier as HubClassifier};
use youtube_client::{CommentPage, SearchParams, YouTubeClient};

// ---------------------------------------------------------------------------
// Service seams
// ---------------------------------------------------------------------------

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Relevance-ranked video ids matching `params`.
    async fn search_videos(&self, params: &SearchParams) -> Result<Vec<ContentId>>;
}

#[async_trait]
pub trait CommentPages: Send + Sync {
    /// One page of top-level comments for a video.
    async fn comment_page(&self, video_id: &str, page_token: Option<&str>)
        -> Result<CommentPage>;
}

#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Raw top label for `text` (e.g. `LABEL_2`).
    async fn predict(&self, text: &str) -> Result<String>;
}

#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// One-time model initialization.
    async fn load(&self) -> Result<Box<dyn SentimentModel>>;
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_videos(&self, params: &SearchParams) -> Result<Vec<ContentId>> {
        Ok(YouTubeClient::search_videos(self, params).await?)
    }
}

#[async_trait]
impl CommentPages for YouTubeClient {
    async fn comment_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentPage> {
        Ok(self.comment_threads(video_id, page_token).await?)
    }
}

#[async_trait]
impl SentimentModel for HubClassifier {
    async fn predict(&self, text: &str) -> Result<String> {
        Ok(self.classify(text).await?.label)
    }
}

/// Loads a Hub model by id.
pub struct HubModelLoader {
    hub: HuggingFace,
    model_id: String,
}

impl HubModelLoader {
    pub fn new(hub: HuggingFace, model_id: impl Into<String>) -> Self {
        Self {
            hub,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl ModelLoader for HubModelLoader {
    async fn load(&self) -> Result<Box<dyn SentimentModel>> {
        let model = self.hub.load_model(&self.model_id).await?;
        Ok(Box::new(model))
    }
}

// ---------------------------------------------------------------------------
// Stage contracts
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContentDiscoverer: Send + Sync {
    /// Matching video ids, best first. Failures yield an empty vec.
    async fn discover(&self, query: &str, max_results: u32, period_days: u32) -> Vec<ContentId>;
}

/// What the collector gathered, plus how many items were abandoned on error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub comments: Vec<Comment>,
    pub items_fetched: usize,
    pub items_failed: usize,
}

#[async_trait]
pub trait CommentCollector: Send + Sync {
    async fn collect(&self, items: &[ContentId], target_count: usize) -> Collection;
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Annotate every comment that has text with a sentiment. Never fails.
    async fn classify_batch(&self, comments: Vec<Comment>) -> Vec<Comment>;
}

#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Replace the persisted dataset. Returns rows written.
    async fn save(&self, dataset: &Dataset) -> Result<usize>;

    /// `None` when nothing has been persisted yet.
    async fn load(&self) -> Result<Option<Dataset>>;
}

#[async_trait]
impl DatasetStore for SqliteStore {
    async fn save(&self, dataset: &Dataset) -> Result<usize> {
        Ok(SqliteStore::save(self, dataset).await?)
    }

    async fn load(&self) -> Result<Option<Dataset>> {
        Ok(SqliteStore::load(self).await?)
    }
}
