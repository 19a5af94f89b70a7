//! Pure reducer for the feed state
//!
//! `(FeedState, Action) -> FeedState`, with no I/O. Requests and their
//! failure handling live in `dispatch.rs`.

use super::actions::Action;
use super::state::FeedState;

/// Apply one action to the state
///
/// Failed requests only touch `loading` and `error`: nothing is added to a
/// collection before the server confirms it, so there is nothing to roll
/// back.
pub fn reduce(state: FeedState, action: Action) -> FeedState {
    match action {
        Action::Pending { .. } => FeedState {
            loading: true,
            error: None,
            ..state
        },

        // === Posts ===
        Action::PostsFetched { posts } => FeedState {
            loading: false,
            posts,
            ..state
        },

        Action::PostCreated { post } => {
            let mut posts = state.posts;
            posts.push(post);
            FeedState {
                loading: false,
                posts,
                ..state
            }
        }

        Action::PostUpdated { post } => {
            let mut posts = state.posts;
            if let Some(index) = posts.iter().position(|p| p.id == post.id) {
                posts[index] = post;
            }
            FeedState {
                loading: false,
                posts,
                ..state
            }
        }

        Action::PostDeleted { post_id } => {
            let mut posts = state.posts;
            posts.retain(|p| p.id != post_id);
            FeedState {
                loading: false,
                posts,
                ..state
            }
        }

        // === Comments ===
        Action::CommentsFetched { post_id, comments } => {
            let mut by_post = state.comments;
            by_post.insert(post_id, comments);
            FeedState {
                loading: false,
                comments: by_post,
                ..state
            }
        }

        Action::CommentCreated { comment } => {
            let mut by_post = state.comments;
            by_post.entry(comment.post_id).or_default().push(comment);
            FeedState {
                loading: false,
                comments: by_post,
                ..state
            }
        }

        Action::CommentUpdated { comment } => {
            let mut by_post = state.comments;
            if let Some(list) = by_post.get_mut(&comment.post_id) {
                if let Some(index) = list.iter().position(|c| c.id == comment.id) {
                    list[index] = comment;
                }
            }
            FeedState {
                loading: false,
                comments: by_post,
                ..state
            }
        }

        Action::CommentDeleted {
            comment_id,
            post_id,
        } => {
            let mut by_post = state.comments;
            if let Some(list) = by_post.get_mut(&post_id) {
                list.retain(|c| c.id != comment_id);
            }
            FeedState {
                loading: false,
                comments: by_post,
                ..state
            }
        }

        // === Errors ===
        Action::Rejected { message, .. } => FeedState {
            loading: false,
            error: Some(message),
            ..state
        },

        Action::ResetError => FeedState {
            error: None,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::actions::FeedOp;
    use crate::types::{Comment, Post};

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: format!("body of {}", title),
        }
    }

    fn comment(id: u64, post_id: u64, text: &str) -> Comment {
        Comment {
            id,
            post_id,
            text: text.to_string(),
        }
    }

    fn seeded() -> FeedState {
        let state = FeedState {
            posts: vec![post(1, "first"), post(2, "second"), post(3, "third")],
            ..FeedState::default()
        };
        let state = reduce(
            state,
            Action::CommentsFetched {
                post_id: 1,
                comments: vec![comment(10, 1, "a"), comment(11, 1, "b")],
            },
        );
        reduce(
            state,
            Action::CommentsFetched {
                post_id: 2,
                comments: vec![comment(20, 2, "c")],
            },
        )
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = seeded();
        let before = state.clone();

        let next = reduce(state.clone(), Action::PostDeleted { post_id: 1 });

        assert_eq!(state, before);
        assert_ne!(next, before);
    }

    #[test]
    fn test_pending_sets_loading_and_clears_error() {
        let state = FeedState {
            error: Some("old".to_string()),
            ..FeedState::default()
        };
        let state = reduce(state, Action::Pending { op: FeedOp::FetchPosts });
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_fetch_replaces_posts() {
        let state = reduce(seeded(), Action::Pending { op: FeedOp::FetchPosts });
        let state = reduce(
            state,
            Action::PostsFetched {
                posts: vec![post(9, "only")],
            },
        );
        assert!(!state.loading);
        assert_eq!(state.posts, vec![post(9, "only")]);
    }

    #[test]
    fn test_create_appends() {
        let state = reduce(
            seeded(),
            Action::PostCreated {
                post: post(4, "fourth"),
            },
        );
        assert_eq!(state.posts.len(), 4);
        assert_eq!(state.posts.last().unwrap().id, 4);
    }

    #[test]
    fn test_update_replaces_only_matching_post() {
        let before = seeded();
        let state = reduce(
            before.clone(),
            Action::PostUpdated {
                post: post(2, "edited"),
            },
        );
        assert_eq!(state.posts[1].title, "edited");
        assert_eq!(state.posts[0], before.posts[0]);
        assert_eq!(state.posts[2], before.posts[2]);
    }

    #[test]
    fn test_update_of_unknown_post_changes_nothing() {
        let before = seeded();
        let state = reduce(
            before.clone(),
            Action::PostUpdated {
                post: post(99, "ghost"),
            },
        );
        assert_eq!(state.posts, before.posts);
    }

    #[test]
    fn test_delete_removes_only_matching_post() {
        let state = reduce(seeded(), Action::PostDeleted { post_id: 2 });
        let ids: Vec<_> = state.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_deleting_a_post_keeps_its_comments() {
        let state = reduce(seeded(), Action::PostDeleted { post_id: 1 });
        assert_eq!(state.comments_for(1).len(), 2);
    }

    #[test]
    fn test_comment_create_is_scoped_by_post() {
        let state = reduce(
            seeded(),
            Action::CommentCreated {
                comment: comment(12, 1, "new"),
            },
        );
        assert_eq!(state.comments_for(1).len(), 3);
        assert_eq!(state.comments_for(2).len(), 1);
    }

    #[test]
    fn test_comment_create_starts_a_missing_list() {
        let state = reduce(
            seeded(),
            Action::CommentCreated {
                comment: comment(30, 3, "first for 3"),
            },
        );
        assert_eq!(state.comments_for(3), &[comment(30, 3, "first for 3")]);
    }

    #[test]
    fn test_orphaned_comment_is_representable() {
        let state = reduce(
            seeded(),
            Action::CommentCreated {
                comment: comment(40, 404, "orphan"),
            },
        );
        assert!(state.post(404).is_none());
        assert_eq!(state.comments_for(404).len(), 1);
    }

    #[test]
    fn test_comment_update_is_scoped_by_post() {
        let state = reduce(
            seeded(),
            Action::CommentUpdated {
                comment: comment(11, 1, "edited"),
            },
        );
        assert_eq!(state.comments_for(1)[1].text, "edited");
        assert_eq!(state.comments_for(1)[0].text, "a");

        // same id under another post does not match
        let state = reduce(
            state,
            Action::CommentUpdated {
                comment: comment(20, 1, "wrong parent"),
            },
        );
        assert_eq!(state.comments_for(2)[0].text, "c");
        assert_eq!(state.comments_for(1).len(), 2);
    }

    #[test]
    fn test_comment_delete_is_scoped_by_post() {
        let state = reduce(
            seeded(),
            Action::CommentDeleted {
                comment_id: 20,
                post_id: 1,
            },
        );
        assert_eq!(state.comments_for(2).len(), 1);

        let state = reduce(
            state,
            Action::CommentDeleted {
                comment_id: 10,
                post_id: 1,
            },
        );
        assert_eq!(state.comments_for(1), &[comment(11, 1, "b")]);
    }

    #[test]
    fn test_comment_delete_for_unknown_post_adds_no_list() {
        let state = reduce(
            seeded(),
            Action::CommentDeleted {
                comment_id: 1,
                post_id: 77,
            },
        );
        assert!(!state.comments.contains_key(&77));
    }

    #[test]
    fn test_rejection_only_touches_error_and_loading() {
        let before = seeded();
        let state = reduce(before.clone(), Action::Pending { op: FeedOp::CreatePost });
        let state = reduce(
            state,
            Action::Rejected {
                op: FeedOp::CreatePost,
                message: "Failed to create post.".to_string(),
            },
        );
        assert_eq!(state.error.as_deref(), Some("Failed to create post."));
        assert!(!state.loading);
        assert_eq!(state.posts, before.posts);
        assert_eq!(state.comments, before.comments);
    }

    #[test]
    fn test_reset_error() {
        let state = reduce(
            seeded(),
            Action::Rejected {
                op: FeedOp::FetchPosts,
                message: "boom".to_string(),
            },
        );
        let state = reduce(state, Action::ResetError);
        assert!(state.error.is_none());
    }
}
