//! The feed store: state, dispatcher and request boundary
//!
//! Each operation follows the same shape:
//!
//! 1. dispatch `Pending`
//! 2. make one backend call
//! 3. dispatch the fulfilled action, or `Rejected` with the fixed message
//!    for the operation kind
//!
//! Failures are not retried and concurrent requests are not ordered: two
//! quick edits of the same post land in whatever order the server answers.
//!
//! # Example
//!
//! ```no_run
//! use libfeedcast::{Config, FeedStore, Post};
//!
//! # async fn example() -> libfeedcast::Result<()> {
//! let store = FeedStore::from_config(&Config::load()?)?;
//!
//! store.fetch_posts().await?;
//! let created = store.create_post(Post::placeholder(1)).await?;
//! store.create_comment(created.id, "first!").await?;
//!
//! for post in store.state().feed_newest_first() {
//!     println!("{}: {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Instrument;
use uuid::Uuid;

use super::actions::{Action, FeedOp};
use super::events::{ActionBus, ActionReceiver};
use super::reducer::reduce;
use super::state::FeedState;
use crate::api::http::HttpFeedApi;
use crate::api::{ApiResult, FeedApi};
use crate::config::{Config, Locale};
use crate::error::{ApiError, Rejection, Result};
use crate::types::{Comment, CommentId, CommentPatch, NewComment, NewPost, Post, PostId, PostPatch};

/// Single in-memory store of posts, comments, loading and error status
///
/// Clones share the same state, backend and subscribers.
#[derive(Clone)]
pub struct FeedStore {
    state: Arc<Mutex<FeedState>>,
    api: Arc<dyn FeedApi>,
    bus: ActionBus,
    locale: Locale,
}

impl FeedStore {
    pub fn new(api: Arc<dyn FeedApi>, locale: Locale) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState::default())),
            api,
            bus: ActionBus::default(),
            locale,
        }
    }

    /// Store backed by the HTTP client described in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = HttpFeedApi::from_config(config)?;
        Ok(Self::new(Arc::new(api), config.feed.locale))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FeedState {
        self.lock().clone()
    }

    /// Receive every action dispatched from now on
    pub fn subscribe(&self) -> ActionReceiver {
        self.bus.subscribe()
    }

    /// Reduce one action into the state and notify subscribers
    pub fn dispatch(&self, action: Action) {
        tracing::trace!(action = %action.type_name(), "Dispatching");
        {
            let mut state = self.lock();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action.clone());
        }
        self.bus.emit(action);
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // The reducer cannot leave the state half-written, so a poisoned
        // lock still holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one request through the pending/fulfilled/rejected lifecycle
    async fn request<T, F>(
        &self,
        op: FeedOp,
        call: F,
        fulfilled: impl FnOnce(&T) -> Action,
    ) -> Result<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("request", op = op.type_prefix(), %request_id);

        async move {
            self.dispatch(Action::Pending { op });

            match call.await {
                Ok(payload) => {
                    self.dispatch(fulfilled(&payload));
                    tracing::debug!("Request fulfilled");
                    Ok(payload)
                }
                Err(cause) => {
                    let message = op.failure_message(self.locale).to_string();
                    tracing::warn!(error = %cause, "Request rejected");
                    self.dispatch(Action::Rejected {
                        op,
                        message: message.clone(),
                    });
                    Err(Rejection { op, message, cause }.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    // === Posts ===

    /// Load the whole feed, replacing what the store holds
    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.request(FeedOp::FetchPosts, self.api.fetch_posts(), |posts| {
            Action::PostsFetched {
                posts: posts.clone(),
            }
        })
        .await
    }

    /// Send a new post and append the server's copy to the feed
    ///
    /// The post's client-generated id is sent along; the feed gains the post
    /// only once the server confirms it.
    pub async fn create_post(&self, post: Post) -> Result<Post> {
        self.request(
            FeedOp::CreatePost,
            self.api.create_post(NewPost::from(&post)),
            |created| Action::PostCreated {
                post: created.clone(),
            },
        )
        .await
    }

    /// Send the post's fields and replace the matching feed entry
    pub async fn update_post(&self, post: Post) -> Result<Post> {
        self.request(
            FeedOp::UpdatePost,
            self.api.update_post(post.id, PostPatch::from(&post)),
            |updated| Action::PostUpdated {
                post: updated.clone(),
            },
        )
        .await
    }

    pub async fn delete_post(&self, post_id: PostId) -> Result<PostId> {
        let call = async {
            self.api.delete_post(post_id).await?;
            Ok::<_, ApiError>(post_id)
        };
        self.request(FeedOp::DeletePost, call, |post_id| Action::PostDeleted {
            post_id: *post_id,
        })
        .await
    }

    // === Comments ===

    /// Load the comments of one post, replacing that post's list
    pub async fn fetch_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.request(
            FeedOp::FetchComments,
            self.api.fetch_comments(post_id),
            |comments| Action::CommentsFetched {
                post_id,
                comments: comments.clone(),
            },
        )
        .await
    }

    /// Add a comment; it is filed under the post id the server reports
    pub async fn create_comment(&self, post_id: PostId, text: impl Into<String>) -> Result<Comment> {
        let body = NewComment { text: text.into() };
        self.request(
            FeedOp::CreateComment,
            self.api.create_comment(post_id, body),
            |comment| Action::CommentCreated {
                comment: comment.clone(),
            },
        )
        .await
    }

    /// Change a comment's text
    ///
    /// The entry is looked up under the post id in the server's answer;
    /// `post_id` only labels the request in logs.
    pub async fn update_comment(
        &self,
        comment_id: CommentId,
        post_id: PostId,
        text: impl Into<String>,
    ) -> Result<Comment> {
        tracing::debug!(comment_id, post_id, "Updating comment");
        let patch = CommentPatch { text: text.into() };
        self.request(
            FeedOp::UpdateComment,
            self.api.update_comment(comment_id, patch),
            |comment| Action::CommentUpdated {
                comment: comment.clone(),
            },
        )
        .await
    }

    pub async fn delete_comment(
        &self,
        comment_id: CommentId,
        post_id: PostId,
    ) -> Result<(CommentId, PostId)> {
        let call = async {
            self.api.delete_comment(comment_id).await?;
            Ok::<_, ApiError>((comment_id, post_id))
        };
        self.request(
            FeedOp::DeleteComment,
            call,
            |&(comment_id, post_id): &(CommentId, PostId)| Action::CommentDeleted {
                comment_id,
                post_id,
            },
        )
        .await
    }

    /// Dismiss the visible error
    pub fn reset_error(&self) {
        self.dispatch(Action::ResetError);
    }
}
