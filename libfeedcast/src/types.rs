//! Core types for Feedcast
//!
//! Field names on the wire are camelCase (`userId`, `postId`) to match the
//! backend's JSON.

use serde::{Deserialize, Serialize};

pub type PostId = u64;
pub type CommentId = u64;

/// Title given to a post created without one
pub const NEW_POST_TITLE: &str = "New Post Title";
/// Body given to a post created without one
pub const NEW_POST_BODY: &str = "New Post Body";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Build a post that has not been confirmed by the server yet
    ///
    /// The id is the current time in milliseconds. It can collide with ids
    /// assigned by the server.
    pub fn draft(user_id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: client_id(),
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// The post a fresh "new post" action produces
    pub fn placeholder(user_id: u64) -> Self {
        Self::draft(user_id, NEW_POST_TITLE, NEW_POST_BODY)
    }

    pub fn with_changes(&self, title: Option<String>, body: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| self.title.clone()),
            body: body.unwrap_or_else(|| self.body.clone()),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub text: String,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl From<&Post> for NewPost {
    fn from(post: &Post) -> Self {
        Self {
            id: Some(post.id),
            user_id: post.user_id,
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

/// Body of `PATCH /posts/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl From<&Post> for PostPatch {
    fn from(post: &Post) -> Self {
        Self {
            id: Some(post.id),
            user_id: Some(post.user_id),
            title: Some(post.title.clone()),
            body: Some(post.body.clone()),
        }
    }
}

/// Body of `POST /posts/{postId}/comments`; the post is named by the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub text: String,
}

/// Body of `PATCH /comments/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPatch {
    pub text: String,
}

fn client_id() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
