//! Sequences discovery, collection, classification and persistence through
//! the state machine in [`super::state`].

use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};

use opinionwatch_common::{ContentId, Dataset};

use super::state::{transition, InvalidTransition, PipelineState, StageOutcome};
use super::stats::RunReport;
use crate::traits::{CommentCollector, ContentDiscoverer, DatasetStore, TextClassifier};

/// Per-run knobs.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub query: String,
    pub max_results: u32,
    pub period_days: u32,
    pub target_comments: usize,
}

pub struct Pipeline {
    discoverer: Arc<dyn ContentDiscoverer>,
    collector: Arc<dyn CommentCollector>,
    classifier: Arc<dyn TextClassifier>,
    store: Arc<dyn DatasetStore>,
    params: PipelineParams,
}

impl Pipeline {
    pub fn new(
        discoverer: Arc<dyn ContentDiscoverer>,
        collector: Arc<dyn CommentCollector>,
        classifier: Arc<dyn TextClassifier>,
        store: Arc<dyn DatasetStore>,
        params: PipelineParams,
    ) -> Self {
        Self {
            discoverer,
            collector,
            classifier,
            store,
            params,
        }
    }

    /// Run every stage once. Stage failures are absorbed into the report;
    /// the only error is a state machine bug.
    pub async fn run(&self) -> Result<RunReport, InvalidTransition> {
        let report = RunReport::start();
        let span = info_span!("pipeline_run", run_id = %report.run_id);
        self.run_stages(report).instrument(span).await
    }

    async fn run_stages(&self, mut report: RunReport) -> Result<RunReport, InvalidTransition> {
        let p = &self.params;
        info!(
            query = p.query.as_str(),
            max_results = p.max_results,
            period_days = p.period_days,
            target_comments = p.target_comments,
            "Pipeline run starting"
        );

        let mut state = PipelineState::Discovering;
        let mut videos: Vec<ContentId> = Vec::new();
        let mut dataset = Dataset::default();

        while !state.is_terminal() {
            let outcome = match state {
                PipelineState::Discovering => {
                    videos = self
                        .discoverer
                        .discover(&p.query, p.max_results, p.period_days)
                        .await;
                    report.stats.videos_found = videos.len();
                    StageOutcome::Discovered {
                        videos: videos.len(),
                    }
                }
                PipelineState::Collecting => {
                    let collection = self.collector.collect(&videos, p.target_comments).await;
                    report.stats.videos_fetched = collection.items_fetched;
                    report.stats.videos_failed = collection.items_failed;
                    report.stats.comments_collected = collection.comments.len();
                    let comments = collection.comments.len();
                    dataset = Dataset::new(collection.comments);
                    StageOutcome::Collected { comments }
                }
                PipelineState::Classifying => {
                    let comments = std::mem::take(&mut dataset).into_rows();
                    dataset = Dataset::new(self.classifier.classify_batch(comments).await);
                    report.stats.record_classified(&dataset);
                    StageOutcome::Classified
                }
                PipelineState::Persisting => match self.store.save(&dataset).await {
                    Ok(rows) => {
                        info!(rows, "Dataset persisted");
                        report.stats.rows_persisted = Some(rows);
                        StageOutcome::Persisted { saved: true }
                    }
                    Err(e) => {
                        let message = format!("{e:#}");
                        error!(error = message.as_str(), "Failed to persist dataset");
                        report.stats.persistence_error = Some(message);
                        StageOutcome::Persisted { saved: false }
                    }
                },
                PipelineState::Done
                | PipelineState::NoVideosFound
                | PipelineState::NoCommentsFound => unreachable!("loop exits on terminal state"),
            };
            state = transition(state, outcome)?;
        }

        match state {
            PipelineState::NoVideosFound => warn!("No videos found, stopping"),
            PipelineState::NoCommentsFound => warn!("No comments found, stopping"),
            _ => {}
        }

        let report = report.finish(state);
        info!(
            status = %report.status(),
            state = ?report.final_state,
            rows = report.stats.rows_classified,
            "Pipeline run finished"
        );
        Ok(report)
    }
}
