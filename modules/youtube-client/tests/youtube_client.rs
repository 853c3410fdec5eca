//! YouTubeClient against a mock Data API server.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_client::{SearchParams, YouTubeClient, YouTubeError};

fn client(server: &MockServer) -> YouTubeClient {
    YouTubeClient::new("test-key".to_string()).with_base_url(&server.uri())
}

fn params() -> SearchParams {
    SearchParams {
        query: r#""tolak RUU" | "demo mahasiswa""#.to_string(),
        max_results: 15,
        published_after: Utc.with_ymd_and_hms(2024, 8, 25, 12, 0, 0).unwrap(),
        region_code: "ID".to_string(),
        relevance_language: "id".to_string(),
    }
}

#[tokio::test]
async fn search_sends_video_relevance_query_and_returns_ids_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", r#""tolak RUU" | "demo mahasiswa""#))
        .and(query_param("type", "video"))
        .and(query_param("order", "relevance"))
        .and(query_param("maxResults", "15"))
        .and(query_param("regionCode", "ID"))
        .and(query_param("relevanceLanguage", "id"))
        .and(query_param("publishedAfter", "2024-08-25T12:00:00Z"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "v2"}},
                {"id": {"kind": "youtube#video", "videoId": "v1"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client(&server).search_videos(&params()).await.unwrap();
    assert_eq!(ids, vec!["v2", "v1"]);
}

#[tokio::test]
async fn search_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "quotaExceeded"}
        })))
        .mount(&server)
        .await;

    let err = client(&server).search_videos(&params()).await.unwrap_err();
    match err {
        YouTubeError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "quotaExceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn comment_threads_passes_page_token_and_plain_text_format() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "v1"))
        .and(query_param("maxResults", "100"))
        .and(query_param("textFormat", "plainText"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"snippet": {"topLevelComment": {"snippet": {
                    "authorDisplayName": "@sari",
                    "textDisplay": "kawal terus",
                    "publishedAt": "2024-08-30T10:00:00Z",
                    "likeCount": 12
                }}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .comment_threads("v1", Some("page-2"))
        .await
        .unwrap();

    assert!(page.next_page_token.is_none());
    assert_eq!(page.comments.len(), 1);
    assert_eq!(page.comments[0].text_display.as_deref(), Some("kawal terus"));
    assert_eq!(page.comments[0].like_count, Some(12));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).comment_threads("v1", None).await.unwrap_err();
    assert!(matches!(err, YouTubeError::Parse(_)), "got {err:?}");
}
