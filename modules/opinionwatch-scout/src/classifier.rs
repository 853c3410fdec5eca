//! Batch sentiment classification with per-comment failure isolation.
//!
//! The model is loaded once per batch. If loading fails every comment is
//! marked `Error` and no inference runs. Otherwise comments without text are
//! dropped, and each remaining text (cut to `MAX_INPUT_CHARS`) is classified
//! in order; a failed inference marks only that comment as `Error`.

use std::sync::Arc;

use async_trait::async_trait;
use sentiment_client::{label_index, truncate_chars};
use tracing::{error, info, warn};

use opinionwatch_common::{Comment, Sentiment};

use crate::traits::{ModelLoader, TextClassifier};

/// Longest input, in characters, sent to the model.
pub const MAX_INPUT_CHARS: usize = 512;

/// Characters of a failing text echoed into the log.
const LOG_SNIPPET_CHARS: usize = 50;

pub struct Classifier {
    loader: Arc<dyn ModelLoader>,
}

impl Classifier {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self { loader }
    }
}

/// Map a raw model label to a sentiment category.
pub fn sentiment_for_label(label: &str) -> Sentiment {
    Sentiment::from_label_index(label_index(label))
}

#[async_trait]
impl TextClassifier for Classifier {
    async fn classify_batch(&self, comments: Vec<Comment>) -> Vec<Comment> {
        info!(comments = comments.len(), "Starting sentiment analysis");

        let model = match self.loader.load().await {
            Ok(model) => model,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Model failed to load, marking batch as Error");
                return comments
                    .into_iter()
                    .map(|c| c.with_sentiment(Sentiment::Error))
                    .collect();
            }
        };

        let total = comments.len();
        let comments: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.usable_text().is_some())
            .collect();
        if comments.len() < total {
            info!(dropped = total - comments.len(), "Dropped comments without text");
        }

        let mut classified = Vec::with_capacity(comments.len());
        let mut failures = 0usize;
        for comment in comments {
            let text = truncate_chars(comment.usable_text().unwrap_or_default(), MAX_INPUT_CHARS);
            let sentiment = match model.predict(text).await {
                Ok(label) => sentiment_for_label(&label),
                Err(e) => {
                    failures += 1;
                    warn!(
                        text = truncate_chars(text, LOG_SNIPPET_CHARS),
                        error = %format!("{e:#}"),
                        "Failed to classify comment"
                    );
                    Sentiment::Error
                }
            };
            classified.push(comment.with_sentiment(sentiment));
        }

        info!(classified = classified.len(), failures, "Sentiment analysis finished");
        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{text_comment, MockModelLoader};

    #[test]
    fn label_mapping() {
        assert_eq!(sentiment_for_label("LABEL_2"), Sentiment::Negative);
        assert_eq!(sentiment_for_label("LABEL_0"), Sentiment::Positive);
        assert_eq!(sentiment_for_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(sentiment_for_label("LABEL_9"), Sentiment::Neutral);
        assert_eq!(sentiment_for_label("negative"), Sentiment::Neutral);
    }

    #[tokio::test]
    async fn failure_on_one_comment_is_isolated() {
        let loader = MockModelLoader::new()
            .on_text("bagus", "LABEL_0")
            .failing_on("rusak")
            .on_text("jelek", "LABEL_2");
        let classifier = Classifier::new(Arc::new(loader));

        let out = classifier
            .classify_batch(vec![
                text_comment("bagus"),
                text_comment("rusak"),
                text_comment("jelek"),
            ])
            .await;

        let labels: Vec<_> = out.iter().map(|c| c.sentiment).collect();
        assert_eq!(
            labels,
            vec![
                Some(Sentiment::Positive),
                Some(Sentiment::Error),
                Some(Sentiment::Negative)
            ]
        );
    }

    #[tokio::test]
    async fn only_first_512_characters_reach_the_model() {
        let loader = Arc::new(MockModelLoader::new());
        let classifier = Classifier::new(loader.clone());
        let long = "a".repeat(600);

        classifier.classify_batch(vec![text_comment(&long)]).await;

        let seen = loader.seen_texts();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].chars().count(), MAX_INPUT_CHARS);
        assert!(long.starts_with(&seen[0]));
    }

    #[tokio::test]
    async fn comments_without_text_are_dropped() {
        let loader = Arc::new(MockModelLoader::new());
        let classifier = Classifier::new(loader.clone());

        let out = classifier
            .classify_batch(vec![
                Comment::default(),
                text_comment("ada isi"),
                text_comment(""),
            ])
            .await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text.as_deref(), Some("ada isi"));
        assert_eq!(loader.seen_texts().len(), 1);
    }

    #[tokio::test]
    async fn model_load_failure_marks_everything_error_without_inference() {
        let loader = Arc::new(MockModelLoader::new().failing_load());
        let classifier = Classifier::new(loader.clone());

        let out = classifier
            .classify_batch(vec![text_comment("satu"), text_comment("dua")])
            .await;

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.sentiment == Some(Sentiment::Error)));
        assert!(loader.seen_texts().is_empty());
    }

    #[tokio::test]
    async fn output_preserves_input_order() {
        let loader = MockModelLoader::new()
            .on_text("x", "LABEL_2")
            .on_text("y", "LABEL_0");
        let classifier = Classifier::new(Arc::new(loader));

        let out = classifier
            .classify_batch(vec![text_comment("y"), text_comment("x"), text_comment("y")])
            .await;

        let texts: Vec<_> = out.iter().map(|c| c.text.clone().unwrap()).collect();
        assert_eq!(texts, vec!["y", "x", "y"]);
        assert_eq!(out[1].sentiment, Some(Sentiment::Negative));
    }
}
