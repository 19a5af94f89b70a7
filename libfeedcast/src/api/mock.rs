//! In-memory feed backend for testing
//!
//! Behaves like the json-server backend the client talks to: it stores what
//! it is given, assigns ids to new comments, and answers unknown ids with a
//! 404. Individual calls can be made to fail, and every call is counted so
//! tests can verify that no request was retried or skipped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use super::{ApiResult, FeedApi};
use crate::error::ApiError;
use crate::types::{
    Comment, CommentId, CommentPatch, NewComment, NewPost, Post, PostId, PostPatch,
};

/// Names of the calls, as used by [`MockFeedApi::fail`] and
/// [`MockFeedApi::call_count`]
pub const CALLS: [&str; 8] = [
    "fetch_posts",
    "create_post",
    "update_post",
    "delete_post",
    "fetch_comments",
    "create_comment",
    "update_comment",
    "delete_comment",
];

#[derive(Debug, Default)]
struct Backend {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    failures: HashMap<String, ApiError>,
    calls: Vec<String>,
}

/// Mock feed backend
///
/// Cloning shares the same backend, so a test can keep a handle for
/// inspection after giving one to a store.
#[derive(Debug, Clone, Default)]
pub struct MockFeedApi {
    backend: Arc<Mutex<Backend>>,
    delay: Duration,
}

impl MockFeedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with posts and comments
    pub fn with_data(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        let api = Self::new();
        {
            let mut backend = api.backend();
            backend.posts = posts;
            backend.comments = comments;
        }
        api
    }

    /// A backend every call of which fails as if the host were down
    pub fn unreachable() -> Self {
        let api = Self::new();
        for call in CALLS {
            api.fail(call, ApiError::Network("connection refused".to_string()));
        }
        api
    }

    /// Delay every call, simulating network latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make `call` fail with `error` until [`MockFeedApi::recover`] is called
    pub fn fail(&self, call: &str, error: ApiError) {
        self.backend().failures.insert(call.to_string(), error);
    }

    /// Make `call` fail with an HTTP status
    pub fn fail_with_status(&self, call: &str, status: u16) {
        self.fail(
            call,
            ApiError::Status {
                status,
                url: format!("mock://{}", call),
            },
        );
    }

    pub fn recover(&self, call: &str) {
        self.backend().failures.remove(call);
    }

    /// Number of times `call` was made, failed calls included
    pub fn call_count(&self, call: &str) -> usize {
        self.backend().calls.iter().filter(|c| c.as_str() == call).count()
    }

    /// Posts currently stored on the "server"
    pub fn stored_posts(&self) -> Vec<Post> {
        self.backend().posts.clone()
    }

    /// Comments currently stored on the "server"
    pub fn stored_comments(&self) -> Vec<Comment> {
        self.backend().comments.clone()
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and report a configured failure
    async fn enter(&self, call: &str) -> ApiResult<()> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let mut backend = self.backend();
        backend.calls.push(call.to_string());
        match backend.failures.get(call) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(path: String) -> ApiError {
    ApiError::Status {
        status: 404,
        url: format!("mock://{}", path),
    }
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        self.enter("fetch_posts").await?;
        Ok(self.backend().posts.clone())
    }

    async fn create_post(&self, post: NewPost) -> ApiResult<Post> {
        self.enter("create_post").await?;
        let mut backend = self.backend();
        let id = post
            .id
            .unwrap_or_else(|| backend.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1);
        let created = Post {
            id,
            user_id: post.user_id,
            title: post.title,
            body: post.body,
        };
        backend.posts.push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> ApiResult<Post> {
        self.enter("update_post").await?;
        let mut backend = self.backend();
        let stored = backend
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(format!("posts/{}", id)))?;

        if let Some(user_id) = patch.user_id {
            stored.user_id = user_id;
        }
        if let Some(title) = patch.title {
            stored.title = title;
        }
        if let Some(body) = patch.body {
            stored.body = body;
        }
        Ok(stored.clone())
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.enter("delete_post").await?;
        let mut backend = self.backend();
        let before = backend.posts.len();
        backend.posts.retain(|p| p.id != id);
        if backend.posts.len() == before {
            return Err(not_found(format!("posts/{}", id)));
        }
        Ok(())
    }

    async fn fetch_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        self.enter("fetch_comments").await?;
        Ok(self
            .backend()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, post_id: PostId, comment: NewComment) -> ApiResult<Comment> {
        self.enter("create_comment").await?;
        let mut backend = self.backend();
        let id = backend.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Comment {
            id,
            post_id,
            text: comment.text,
        };
        backend.comments.push(created.clone());
        Ok(created)
    }

    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> ApiResult<Comment> {
        self.enter("update_comment").await?;
        let mut backend = self.backend();
        let stored = backend
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(format!("comments/{}", id)))?;
        stored.text = patch.text;
        Ok(stored.clone())
    }

    async fn delete_comment(&self, id: CommentId) -> ApiResult<()> {
        self.enter("delete_comment").await?;
        let mut backend = self.backend();
        let before = backend.comments.len();
        backend.comments.retain(|c| c.id != id);
        if backend.comments.len() == before {
            return Err(not_found(format!("comments/{}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("title {}", id),
            body: format!("body {}", id),
        }
    }

    #[tokio::test]
    async fn test_create_post_keeps_client_id() {
        let api = MockFeedApi::new();
        let created = api
            .create_post(NewPost {
                id: Some(1700000000000),
                user_id: 1,
                title: "t".to_string(),
                body: "b".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1700000000000);
        assert_eq!(api.stored_posts().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_post_is_404() {
        let api = MockFeedApi::with_data(vec![post(1)], vec![]);
        let err = api.update_post(2, PostPatch::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_comment_ids_are_assigned_by_the_server() {
        let api = MockFeedApi::new();
        let first = api
            .create_comment(1, NewComment { text: "a".to_string() })
            .await
            .unwrap();
        let second = api
            .create_comment(2, NewComment { text: "b".to_string() })
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.post_id, 2);
    }

    #[tokio::test]
    async fn test_failures_are_counted_and_recoverable() {
        let api = MockFeedApi::with_data(vec![post(1)], vec![]);
        api.fail_with_status("fetch_posts", 500);

        assert!(api.fetch_posts().await.is_err());
        api.recover("fetch_posts");
        assert_eq!(api.fetch_posts().await.unwrap().len(), 1);
        assert_eq!(api.call_count("fetch_posts"), 2);
    }

    #[tokio::test]
    async fn test_unreachable_fails_every_call() {
        let api = MockFeedApi::unreachable();
        assert!(api.fetch_posts().await.is_err());
        assert!(api.delete_comment(1).await.is_err());
        assert!(api.fetch_comments(1).await.is_err());
    }
}
