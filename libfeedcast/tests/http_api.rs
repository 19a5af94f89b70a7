//! HTTP wiring tests for HttpFeedApi
//!
//! Each test starts a one-shot HTTP server on localhost that records the
//! request it receives and answers with a canned response.

use feedcast_test_support::{CannedServer, RecordedRequest};
use libfeedcast::api::http::HttpFeedApi;
use libfeedcast::api::FeedApi;
use libfeedcast::error::ApiError;
use libfeedcast::types::{CommentPatch, NewComment, NewPost, PostPatch};
use std::time::Duration;

/// Serve exactly one request, returning the base URL and the server
fn serve_once(status: u16, body: &'static str) -> (String, CannedServer) {
    let server = CannedServer::once(status, body);
    (server.base_url().to_string(), server)
}

fn json(request: &RecordedRequest) -> serde_json::Value {
    serde_json::from_str(request.body()).unwrap()
}

fn client(base_url: &str) -> HttpFeedApi {
    HttpFeedApi::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_posts_is_a_get_on_posts() {
    let (base, server) = serve_once(
        200,
        r#"[{"userId":1,"id":1,"title":"hello","body":"world"}]"#,
    );

    let posts = client(&base).fetch_posts().await.unwrap();
    let request = server.requests().remove(0);

    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/posts");
    assert_eq!(
        request.header("content-type"),
        Some("application/json; charset=UTF-8")
    );
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "hello");
}

#[tokio::test]
async fn test_create_post_sends_json_body() {
    let (base, server) = serve_once(
        201,
        r#"{"userId":1,"id":1700000000000,"title":"New Post Title","body":"New Post Body"}"#,
    );

    let created = client(&base)
        .create_post(NewPost {
            id: Some(1700000000000),
            user_id: 1,
            title: "New Post Title".to_string(),
            body: "New Post Body".to_string(),
        })
        .await
        .unwrap();
    let request = server.requests().remove(0);

    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/posts");
    assert_eq!(
        json(&request),
        serde_json::json!({
            "id": 1700000000000u64,
            "userId": 1,
            "title": "New Post Title",
            "body": "New Post Body"
        })
    );
    assert_eq!(created.id, 1700000000000);
}

#[tokio::test]
async fn test_update_post_is_a_patch_on_the_item() {
    let (base, server) = serve_once(200, r#"{"userId":1,"id":4,"title":"edited","body":"b"}"#);

    let patch = PostPatch {
        title: Some("edited".to_string()),
        ..Default::default()
    };
    let updated = client(&base).update_post(4, patch).await.unwrap();
    let request = server.requests().remove(0);

    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/posts/4");
    assert_eq!(json(&request), serde_json::json!({ "title": "edited" }));
    assert_eq!(updated.title, "edited");
}

#[tokio::test]
async fn test_delete_post_ignores_response_body() {
    let (base, server) = serve_once(200, "{}");

    client(&base).delete_post(7).await.unwrap();
    let request = server.requests().remove(0);

    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/posts/7");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_comment_routes() {
    let (base, server) = serve_once(200, r#"[{"id":1,"postId":3,"text":"hi"}]"#);
    let comments = client(&base).fetch_comments(3).await.unwrap();
    let request = server.requests().remove(0);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/posts/3/comments");
    assert_eq!(comments[0].post_id, 3);

    let (base, server) = serve_once(201, r#"{"id":2,"postId":3,"text":"new"}"#);
    client(&base)
        .create_comment(
            3,
            NewComment {
                text: "new".to_string(),
            },
        )
        .await
        .unwrap();
    let request = server.requests().remove(0);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/posts/3/comments");
    assert_eq!(json(&request), serde_json::json!({ "text": "new" }));

    let (base, server) = serve_once(200, r#"{"id":2,"postId":3,"text":"edited"}"#);
    client(&base)
        .update_comment(
            2,
            CommentPatch {
                text: "edited".to_string(),
            },
        )
        .await
        .unwrap();
    let request = server.requests().remove(0);
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/comments/2");
    assert_eq!(json(&request), serde_json::json!({ "text": "edited" }));

    let (base, server) = serve_once(200, "{}");
    client(&base).delete_comment(2).await.unwrap();
    let request = server.requests().remove(0);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/comments/2");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let (base, server) = serve_once(404, "{}");

    let err = client(&base).fetch_posts().await.unwrap_err();
    server.requests();

    match err {
        ApiError::Status { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/posts"));
        }
        other => panic!("Expected a status error, got {:?}", other),
    }
    assert_eq!(
        ApiError::Status {
            status: 404,
            url: String::new()
        }
        .to_string(),
        "Network request failed with status 404"
    );
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (base, server) = serve_once(200, r#"{"not":"a list"}"#);

    let err = client(&base).fetch_posts().await.unwrap_err();
    server.requests();

    assert!(matches!(err, ApiError::Decode(_)));
}
