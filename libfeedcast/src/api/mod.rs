//! Feed backend abstraction
//!
//! `FeedApi` is the single seam between the state container and the network.
//! `HttpFeedApi` talks to the real REST backend; `MockFeedApi` keeps
//! everything in memory and can be told to fail, which is what the store and
//! CLI tests use.
//!
//! # Examples
//!
//! ```no_run
//! use libfeedcast::api::{http::HttpFeedApi, FeedApi};
//! use libfeedcast::Config;
//!
//! # async fn example() -> libfeedcast::Result<()> {
//! let api = HttpFeedApi::from_config(&Config::default_config())?;
//!
//! let posts = api.fetch_posts().await?;
//! if let Some(first) = posts.first() {
//!     let comments = api.fetch_comments(first.id).await?;
//!     println!("{} has {} comments", first.title, comments.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    Comment, CommentId, CommentPatch, NewComment, NewPost, Post, PostId, PostPatch,
};

pub mod http;
pub mod mock;
pub mod resource;

pub use resource::{build_url, Resource};

/// Result of a single backend call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Service calls offered by the feed backend
///
/// Every call is one HTTP round trip. Implementations must not retry.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// `GET /posts`
    async fn fetch_posts(&self) -> ApiResult<Vec<Post>>;

    /// `POST /posts`, returns the post as stored by the server
    async fn create_post(&self, post: NewPost) -> ApiResult<Post>;

    /// `PATCH /posts/{id}`
    async fn update_post(&self, id: PostId, patch: PostPatch) -> ApiResult<Post>;

    /// `DELETE /posts/{id}`
    async fn delete_post(&self, id: PostId) -> ApiResult<()>;

    /// `GET /posts/{postId}/comments`
    async fn fetch_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>>;

    /// `POST /posts/{postId}/comments`
    async fn create_comment(&self, post_id: PostId, comment: NewComment) -> ApiResult<Comment>;

    /// `PATCH /comments/{id}`
    async fn update_comment(&self, id: CommentId, patch: CommentPatch) -> ApiResult<Comment>;

    /// `DELETE /comments/{id}`
    async fn delete_comment(&self, id: CommentId) -> ApiResult<()>;
}
