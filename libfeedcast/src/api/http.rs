//! REST implementation of [`FeedApi`] on top of reqwest

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::{build_url, ApiResult, FeedApi, Resource};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::types::{
    Comment, CommentId, CommentPatch, NewComment, NewPost, Post, PostId, PostPatch,
};

const CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// HTTP client for the feed backend
///
/// Holds one connection pool. Share it behind an `Arc`.
pub struct HttpFeedApi {
    client: Client,
    base_url: String,
}

impl HttpFeedApi {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ConfigError::InvalidValue {
                field: "api".to_string(),
                reason: format!("cannot build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api.base_url.clone(), config.request_timeout()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: Resource, id: Option<u64>, post_id: Option<PostId>) -> ApiResult<String> {
        build_url(&self.base_url, resource, id, post_id)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        tracing::debug!(%method, url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%method, url, status = status.as_u16(), "Request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    async fn request<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, url, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn fetch_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.url(Resource::Posts, None, None)?;
        self.request::<(), _>(Method::GET, &url, None).await
    }

    async fn create_post(&self, post: NewPost) -> ApiResult<Post> {
        let url = self.url(Resource::Posts, None, None)?;
        self.request(Method::POST, &url, Some(&post)).await
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> ApiResult<Post> {
        let url = self.url(Resource::Posts, Some(id), None)?;
        self.request(Method::PATCH, &url, Some(&patch)).await
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        let url = self.url(Resource::Posts, Some(id), None)?;
        self.send::<()>(Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn fetch_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        let url = self.url(Resource::CommentsForPost, None, Some(post_id))?;
        self.request::<(), _>(Method::GET, &url, None).await
    }

    async fn create_comment(&self, post_id: PostId, comment: NewComment) -> ApiResult<Comment> {
        let url = self.url(Resource::CommentsForPost, None, Some(post_id))?;
        self.request(Method::POST, &url, Some(&comment)).await
    }

    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> ApiResult<Comment> {
        let url = self.url(Resource::Comments, Some(id), None)?;
        self.request(Method::PATCH, &url, Some(&patch)).await
    }

    async fn delete_comment(&self, id: CommentId) -> ApiResult<()> {
        let url = self.url(Resource::Comments, Some(id), None)?;
        self.send::<()>(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
