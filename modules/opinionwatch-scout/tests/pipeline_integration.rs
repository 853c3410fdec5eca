//! End-to-end runs: real stages over mocked network seams, persisted to a
//! real SQLite file.

use std::sync::Arc;

use opinionwatch_common::Sentiment;
use opinionwatch_scout::pipeline::state::PipelineState;
use opinionwatch_scout::testing::{MockCommentPages, MockModelLoader, MockVideoSearch};
use opinionwatch_scout::{
    Classifier, Collector, Discoverer, Pipeline, PipelineParams, RunStatus,
};
use opinionwatch_store::SqliteStore;

fn params(target_comments: usize) -> PipelineParams {
    PipelineParams {
        query: "\"tolak RUU\"".into(),
        max_results: 15,
        period_days: 7,
        target_comments,
    }
}

fn pipeline(
    search: MockVideoSearch,
    pages: MockCommentPages,
    loader: MockModelLoader,
    store: Arc<SqliteStore>,
    target_comments: usize,
) -> Pipeline {
    Pipeline::new(
        Arc::new(Discoverer::new(Arc::new(search), "ID", "id")),
        Arc::new(Collector::new(Arc::new(pages))),
        Arc::new(Classifier::new(Arc::new(loader))),
        store,
        params(target_comments),
    )
}

#[tokio::test]
async fn run_collects_classifies_and_replaces_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("youtube_data.db")).await.unwrap());

    let report = pipeline(
        MockVideoSearch::returning(vec!["A", "B", "C"]),
        MockCommentPages::new()
            .on_video("A", 100, 50)
            .on_video("B", 100, 50)
            .on_video("C", 100, 50),
        MockModelLoader::new()
            .on_text("A-0", "LABEL_2")
            .on_text("B-0", "LABEL_0")
            .failing_on("A-1"),
        store.clone(),
        150,
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.final_state, PipelineState::Done);
    assert_eq!(report.status(), RunStatus::Partial);
    assert_eq!(report.stats.videos_found, 3);
    assert_eq!(report.stats.comments_collected, 150);
    assert_eq!(report.stats.rows_persisted, Some(150));

    let saved = store.load().await.unwrap().expect("dataset persisted");
    assert_eq!(saved.len(), 150);
    assert_eq!(saved.rows()[0].text.as_deref(), Some("A-0"));
    assert_eq!(saved.rows()[0].sentiment, Some(Sentiment::Negative));
    assert_eq!(saved.rows()[1].sentiment, Some(Sentiment::Error));
    assert_eq!(saved.rows()[100].sentiment, Some(Sentiment::Positive));
    assert_eq!(saved.count(Sentiment::Neutral), 147);
    assert!(saved.iter().all(|c| !c.text.as_deref().unwrap_or("").starts_with("C-")));

    // A second, smaller run supersedes the first entirely.
    let report = pipeline(
        MockVideoSearch::returning(vec!["D"]),
        MockCommentPages::new().on_video("D", 3, 100),
        MockModelLoader::new(),
        store.clone(),
        150,
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.status(), RunStatus::Success);
    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.len(), 3);
    assert!(saved.iter().all(|c| c.text.as_deref().unwrap().starts_with("D-")));
}

#[tokio::test]
async fn failed_search_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("youtube_data.db")).await.unwrap());

    let report = pipeline(
        MockVideoSearch::failing(),
        MockCommentPages::new(),
        MockModelLoader::new(),
        store.clone(),
        100,
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.final_state, PipelineState::NoVideosFound);
    assert_eq!(report.status(), RunStatus::Empty);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn model_load_failure_persists_all_rows_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("youtube_data.db")).await.unwrap());

    let report = pipeline(
        MockVideoSearch::returning(vec!["A"]),
        MockCommentPages::new().on_video("A", 4, 100),
        MockModelLoader::new().failing_load(),
        store.clone(),
        100,
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.status(), RunStatus::Failed);
    assert_eq!(report.stats.errors, 4);
    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.count(Sentiment::Error), 4);
}
