//! Comment collection: walk each video's comment pages in order until the
//! target volume is reached.
//!
//! The target is checked before starting a video and between pages, never in
//! the middle of a page, so a run can overshoot by at most one page.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use youtube_client::CommentSnippet;

use opinionwatch_common::{Comment, ContentId};

use crate::traits::{Collection, CommentCollector, CommentPages};

pub struct Collector {
    pages: Arc<dyn CommentPages>,
}

impl Collector {
    pub fn new(pages: Arc<dyn CommentPages>) -> Self {
        Self { pages }
    }
}

fn to_comment(snippet: CommentSnippet) -> Comment {
    Comment {
        author: snippet.author_display_name,
        text: snippet.text_display,
        published_at: snippet.published_at,
        like_count: snippet.like_count.unwrap_or(0),
        sentiment: None,
    }
}

#[async_trait]
impl CommentCollector for Collector {
    async fn collect(&self, items: &[ContentId], target_count: usize) -> Collection {
        let mut collection = Collection::default();

        for video_id in items {
            if collection.comments.len() >= target_count {
                info!(
                    collected = collection.comments.len(),
                    target_count,
                    skipped = items.len() - collection.items_fetched,
                    "Target reached, skipping remaining videos"
                );
                break;
            }

            info!(video_id = video_id.as_str(), "Fetching comments");
            collection.items_fetched += 1;
            let before = collection.comments.len();
            let mut page_token: Option<String> = None;

            loop {
                let page = match self
                    .pages
                    .comment_page(video_id, page_token.as_deref())
                    .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(
                            video_id = video_id.as_str(),
                            kept = collection.comments.len() - before,
                            error = %format!("{e:#}"),
                            "Comment fetch failed, abandoning video"
                        );
                        collection.items_failed += 1;
                        break;
                    }
                };

                collection
                    .comments
                    .extend(page.comments.into_iter().map(to_comment));

                match page.next_page_token {
                    Some(next) if collection.comments.len() < target_count => {
                        page_token = Some(next);
                    }
                    _ => break,
                }
            }
        }

        info!(
            comments = collection.comments.len(),
            videos = collection.items_fetched,
            failed = collection.items_failed,
            "Collection finished"
        );
        collection
    }
}
