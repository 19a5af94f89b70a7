//! Actions for the feed state container
//!
//! Every request goes through three phases: it is marked pending, then it is
//! either fulfilled with a payload or rejected with a fixed message. The
//! reducer (see `reducer.rs`) only ever sees these actions.

use serde::{Deserialize, Serialize};

use crate::config::Locale;
use crate::types::{Comment, CommentId, Post, PostId};

/// Kinds of request the container knows how to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedOp {
    FetchPosts,
    CreatePost,
    UpdatePost,
    DeletePost,
    FetchComments,
    CreateComment,
    UpdateComment,
    DeleteComment,
}

impl FeedOp {
    /// Action type prefix, e.g. `feed/fetchPosts`
    pub fn type_prefix(&self) -> &'static str {
        match self {
            FeedOp::FetchPosts => "feed/fetchPosts",
            FeedOp::CreatePost => "feed/createPost",
            FeedOp::UpdatePost => "feed/updatePost",
            FeedOp::DeletePost => "feed/deletePost",
            FeedOp::FetchComments => "feed/fetchComments",
            FeedOp::CreateComment => "feed/createComment",
            FeedOp::UpdateComment => "feed/updateComment",
            FeedOp::DeleteComment => "feed/deleteComment",
        }
    }

    /// The message shown when a request of this kind fails
    pub fn failure_message(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                FeedOp::FetchPosts => "Failed to load posts.",
                FeedOp::CreatePost => "Failed to create post.",
                FeedOp::UpdatePost => "Failed to update post.",
                FeedOp::DeletePost => "Failed to delete post.",
                FeedOp::FetchComments => "Failed to load comments.",
                FeedOp::CreateComment => "Failed to create comment.",
                FeedOp::UpdateComment => "Failed to update comment.",
                FeedOp::DeleteComment => "Failed to delete comment.",
            },
            Locale::Ru => match self {
                FeedOp::FetchPosts => "Не удалось загрузить посты.",
                FeedOp::CreatePost => "Не удалось создать пост.",
                FeedOp::UpdatePost => "Не удалось обновить пост.",
                FeedOp::DeletePost => "Не удалось удалить пост.",
                FeedOp::FetchComments => "Не удалось загрузить комментарии.",
                FeedOp::CreateComment => "Не удалось создать комментарий.",
                FeedOp::UpdateComment => "Не удалось обновить комментарий.",
                FeedOp::DeleteComment => "Не удалось удалить комментарий.",
            },
        }
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A request was sent
    Pending { op: FeedOp },

    // === Fulfilled ===
    PostsFetched { posts: Vec<Post> },
    PostCreated { post: Post },
    PostUpdated { post: Post },
    PostDeleted { post_id: PostId },
    CommentsFetched { post_id: PostId, comments: Vec<Comment> },
    CommentCreated { comment: Comment },
    CommentUpdated { comment: Comment },
    CommentDeleted { comment_id: CommentId, post_id: PostId },

    /// A request failed
    Rejected { op: FeedOp, message: String },

    /// The visible error was dismissed
    ResetError,
}

impl Action {
    /// The operation this action belongs to, if any
    pub fn op(&self) -> Option<FeedOp> {
        match self {
            Action::Pending { op } | Action::Rejected { op, .. } => Some(*op),
            Action::PostsFetched { .. } => Some(FeedOp::FetchPosts),
            Action::PostCreated { .. } => Some(FeedOp::CreatePost),
            Action::PostUpdated { .. } => Some(FeedOp::UpdatePost),
            Action::PostDeleted { .. } => Some(FeedOp::DeletePost),
            Action::CommentsFetched { .. } => Some(FeedOp::FetchComments),
            Action::CommentCreated { .. } => Some(FeedOp::CreateComment),
            Action::CommentUpdated { .. } => Some(FeedOp::UpdateComment),
            Action::CommentDeleted { .. } => Some(FeedOp::DeleteComment),
            Action::ResetError => None,
        }
    }

    /// Action type string, e.g. `feed/createPost/fulfilled`
    pub fn type_name(&self) -> String {
        match (self, self.op()) {
            (Action::Pending { .. }, Some(op)) => format!("{}/pending", op.type_prefix()),
            (Action::Rejected { .. }, Some(op)) => format!("{}/rejected", op.type_prefix()),
            (_, Some(op)) => format!("{}/fulfilled", op.type_prefix()),
            (_, None) => "feed/resetError".to_string(),
        }
    }
}
