//! Tests for the feed API client

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::pagination::FeedSource;
use crate::types::PostId;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> FeedApi {
    let config = ClientConfig::default().with_base_url(server.uri());
    FeedApi::from_config(&config).unwrap()
}

fn feed_body(ids: &[u64], end: bool) -> serde_json::Value {
    let posts: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "post_id": id,
                "creator_username": "carol",
                "timestamp": 1_700_000_000,
                "content": format!("post {id}")
            })
        })
        .collect();
    json!({"success": true, "posts": posts, "end": end})
}

#[tokio::test]
async fn test_following_without_cursor_omits_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FOLLOWING_PATH))
        .and(query_param_is_missing(OFFSET_PARAM))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(&[3, 2], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let page = api.following(None).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(!page.end);
    assert_eq!(page.last_id(), Some(PostId(2)));
}

#[tokio::test]
async fn test_following_with_cursor_sends_offset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FOLLOWING_PATH))
        .and(query_param(OFFSET_PARAM, "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body(&[49], true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let page = api.fetch_following(Some(PostId(50))).await.unwrap();

    assert!(page.end);
    assert_eq!(page.posts[0].post_id, PostId(49));
}

#[tokio::test]
async fn test_following_unsuccessful_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FOLLOWING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).following(None).await.unwrap_err();
    assert!(err.is_feed_load());
}

#[tokio::test]
async fn test_following_http_error_is_feed_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FOLLOWING_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).following(None).await.unwrap_err();
    assert!(err.is_feed_load());
    assert!(err.to_string().contains("HTTP 500"));
}

#[tokio::test]
async fn test_create_post_sends_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(CREATE_POST_PATH))
        .and(body_json(json!({"content": "<script> a & b"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    api_for(&mock_server)
        .create_post("<script> a & b")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_post_empty_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).create_post("").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[tokio::test]
async fn test_follow_and_unfollow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FOLLOWER_ADD_PATH))
        .and(body_json(json!({"username": "dave"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(FOLLOWER_REMOVE_PATH))
        .and(body_json(json!({"username": "dave"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    api.follow(" dave ").await.unwrap();
    api.unfollow("dave").await.unwrap();
}

#[tokio::test]
async fn test_follow_unsuccessful_is_action_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FOLLOWER_ADD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).follow("nobody").await.unwrap_err();
    assert!(err.is_action());
    assert_eq!(
        err.to_string(),
        "Failed to follow user: backend reported failure"
    );
}

#[tokio::test]
async fn test_rejection_reason_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(FOLLOWER_REMOVE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"success": false, "reason": "Ratelimited"})),
        )
        .mount(&mock_server)
        .await;

    let err = api_for(&mock_server).unfollow("erin").await.unwrap_err();
    assert!(err.is_action());
    assert_eq!(
        err.to_string(),
        "Failed to unfollow user: HTTP 429: Ratelimited"
    );
}
