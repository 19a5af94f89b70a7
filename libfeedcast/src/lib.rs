//! Feedcast - a small client for a feed of posts and comments
//!
//! This library talks to a REST backend for posts and comments and keeps the
//! client-side view of the feed in a single state container driven by
//! actions and a pure reducer.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{http::HttpFeedApi, FeedApi};
pub use config::{Config, Locale};
pub use error::{FeedError, Result};
pub use store::{reduce, Action, FeedOp, FeedState, FeedStore};
pub use types::{Comment, CommentId, Post, PostId};
