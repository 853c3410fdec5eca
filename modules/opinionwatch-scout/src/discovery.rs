//! Content discovery: one relevance-ranked video search over a recency window.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};
use youtube_client::SearchParams;

use opinionwatch_common::ContentId;

use crate::traits::{ContentDiscoverer, VideoSearch};

pub struct Discoverer {
    search: Arc<dyn VideoSearch>,
    region_code: String,
    relevance_language: String,
}

impl Discoverer {
    pub fn new(
        search: Arc<dyn VideoSearch>,
        region_code: impl Into<String>,
        relevance_language: impl Into<String>,
    ) -> Self {
        Self {
            search,
            region_code: region_code.into(),
            relevance_language: relevance_language.into(),
        }
    }
}

#[async_trait]
impl ContentDiscoverer for Discoverer {
    async fn discover(&self, query: &str, max_results: u32, period_days: u32) -> Vec<ContentId> {
        let Some(published_after) =
            Utc::now().checked_sub_signed(Duration::days(i64::from(period_days)))
        else {
            warn!(query, period_days, "Recency window out of range");
            return Vec::new();
        };

        let params = SearchParams {
            query: query.to_string(),
            max_results,
            published_after,
            region_code: self.region_code.clone(),
            relevance_language: self.relevance_language.clone(),
        };

        info!(
            query,
            max_results,
            published_after = %params.published_after_param(),
            "Searching videos"
        );

        match self.search.search_videos(&params).await {
            Ok(mut ids) => {
                ids.truncate(max_results as usize);
                if ids.is_empty() {
                    warn!(query, "No videos found");
                } else {
                    info!(count = ids.len(), "Videos found");
                }
                ids
            }
            Err(e) => {
                warn!(query, error = %format!("{e:#}"), "Video search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockVideoSearch;

    #[tokio::test]
    async fn passes_window_and_locale_hints_to_search() {
        let search = Arc::new(MockVideoSearch::returning(vec!["a", "b"]));
        let discoverer = Discoverer::new(search.clone(), "ID", "id");

        let before = Utc::now();
        let ids = discoverer.discover("\"tolak RUU\"", 15, 7).await;
        let after = Utc::now();

        assert_eq!(ids, vec!["a", "b"]);
        let params = search.last_params().expect("search should be called");
        assert_eq!(params.query, "\"tolak RUU\"");
        assert_eq!(params.max_results, 15);
        assert_eq!(params.region_code, "ID");
        assert_eq!(params.relevance_language, "id");
        assert!(params.published_after >= before - Duration::days(7));
        assert!(params.published_after <= after - Duration::days(7));
    }

    #[tokio::test]
    async fn search_failure_yields_empty() {
        let discoverer = Discoverer::new(Arc::new(MockVideoSearch::failing()), "ID", "id");
        assert!(discoverer.discover("q", 15, 7).await.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_window_yields_empty_without_searching() {
        let search = Arc::new(MockVideoSearch::returning(vec!["a"]));
        let discoverer = Discoverer::new(search.clone(), "ID", "id");

        assert!(discoverer.discover("q", 15, u32::MAX).await.is_empty());
        assert!(search.last_params().is_none());
    }

    #[tokio::test]
    async fn result_is_bounded_by_max_results() {
        let search = Arc::new(MockVideoSearch::returning(vec!["a", "b", "c"]));
        let discoverer = Discoverer::new(search, "ID", "id");
        assert_eq!(discoverer.discover("q", 2, 7).await, vec!["a", "b"]);
    }
}
