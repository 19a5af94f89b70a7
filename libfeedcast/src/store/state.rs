//! Feed state
//!
//! The single source of truth for the view layer. Only the reducer produces
//! new values of this type.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::{Comment, Post, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedState {
    /// Posts in the order the server returned or the client added them
    pub posts: Vec<Post>,

    /// Comments keyed by their parent post id
    ///
    /// Nothing ties these keys to `posts`; a list for a post that is no
    /// longer in the feed stays here.
    pub comments: HashMap<PostId, Vec<Comment>>,

    /// A request is in flight
    pub loading: bool,

    /// Message of the last failed request, until it is reset
    pub error: Option<String>,

    // Pagination is declared for the feed screen but no action moves it yet.
    pub page: u32,
    pub has_more: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            comments: HashMap::new(),
            loading: false,
            error: None,
            page: 1,
            has_more: true,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts newest first, the way the feed is shown
    pub fn feed_newest_first(&self) -> Vec<Post> {
        self.posts.iter().rev().cloned().collect()
    }

    /// Comments of one post; empty when none were loaded
    pub fn comments_for(&self, post_id: PostId) -> &[Comment] {
        self.comments
            .get(&post_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }
}
