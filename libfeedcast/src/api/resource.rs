//! Resource URL builder

use crate::error::ApiError;
use crate::types::PostId;

/// REST resources exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `/posts[/{id}]`
    Posts,
    /// `/posts/{postId}/comments[/{id}]`
    CommentsForPost,
    /// `/comments[/{id}]`
    Comments,
}

/// Build the URL of a resource, optionally addressing one item
///
/// `post_id` is only consulted for [`Resource::CommentsForPost`], where it is
/// required.
pub fn build_url(
    base: &str,
    resource: Resource,
    id: Option<u64>,
    post_id: Option<PostId>,
) -> Result<String, ApiError> {
    let mut url = base.trim_end_matches('/').to_string();

    match resource {
        Resource::Posts => url.push_str("/posts"),
        Resource::CommentsForPost => {
            let post_id = post_id.ok_or(ApiError::MissingParent)?;
            url.push_str(&format!("/posts/{}/comments", post_id));
        }
        Resource::Comments => url.push_str("/comments"),
    }

    if let Some(id) = id {
        url.push_str(&format!("/{}", id));
    }

    Ok(url)
}
