//! Automatic dismissal of request errors
//!
//! An error stays in the state for a fixed time after the request fails and
//! is then reset. A newer failure restarts the countdown; a new request
//! (whose `Pending` action already clears the error) cancels it.

use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::actions::Action;
use super::dispatch::FeedStore;

/// Background task that resets the store's error after `timeout`
///
/// The task runs until the handle is dropped or [`ErrorDisplay::stop`] is
/// called. Must be created inside a tokio runtime.
pub struct ErrorDisplay {
    handle: JoinHandle<()>,
}

impl ErrorDisplay {
    pub fn spawn(store: FeedStore, timeout: Duration) -> Self {
        // Subscribe before spawning so no action dispatched after this call
        // is missed.
        let mut actions = store.subscribe();

        let handle = tokio::spawn(async move {
            let mut deadline: Option<Instant> = None;

            loop {
                let received = match deadline {
                    Some(at) => tokio::select! {
                        _ = sleep_until(at) => {
                            tracing::debug!("Error display timed out");
                            deadline = None;
                            store.reset_error();
                            continue;
                        }
                        received = actions.recv() => received,
                    },
                    None => actions.recv().await,
                };

                match received {
                    Ok(Action::Rejected { .. }) => deadline = Some(Instant::now() + timeout),
                    Ok(Action::Pending { .. }) => deadline = None,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Error display lagged, skipped {} actions", skipped);
                        if store.state().error.is_some() {
                            deadline = Some(Instant::now() + timeout);
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { handle }
    }

    pub fn stop(self) {
        // Drop aborts the task
    }
}

impl Drop for ErrorDisplay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockFeedApi;
    use crate::config::Locale;
    use crate::store::actions::FeedOp;
    use std::sync::Arc;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_error_is_cleared_after_timeout() {
        let store = FeedStore::new(Arc::new(MockFeedApi::unreachable()), Locale::En);
        let _display = ErrorDisplay::spawn(store.clone(), Duration::from_millis(3000));

        let _ = store.fetch_posts().await;
        assert_eq!(store.state().error.as_deref(), Some("Failed to load posts."));

        sleep(Duration::from_millis(2900)).await;
        assert!(store.state().error.is_some());

        sleep(Duration::from_millis(200)).await;
        assert!(store.state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_error_restarts_the_countdown() {
        let store = FeedStore::new(Arc::new(MockFeedApi::unreachable()), Locale::En);
        let _display = ErrorDisplay::spawn(store.clone(), Duration::from_secs(3));

        let _ = store.fetch_posts().await;
        sleep(Duration::from_secs(2)).await;

        let _ = store.delete_post(1).await;
        sleep(Duration::from_secs(2)).await;
        assert_eq!(store.state().error.as_deref(), Some("Failed to delete post."));

        sleep(Duration::from_millis(1500)).await;
        assert!(store.state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_cancels_the_countdown() {
        let store = FeedStore::new(Arc::new(MockFeedApi::unreachable()), Locale::En);
        let _display = ErrorDisplay::spawn(store.clone(), Duration::from_secs(3));
        let mut actions = store.subscribe();

        let _ = store.fetch_posts().await;
        sleep(Duration::from_secs(1)).await;

        store.dispatch(Action::Pending {
            op: FeedOp::FetchPosts,
        });
        store.reset_error();
        sleep(Duration::from_millis(2500)).await;

        // only the reset dispatched above, none from the cancelled timer
        let mut resets = 0;
        while let Ok(action) = actions.try_recv() {
            if matches!(action, Action::ResetError) {
                resets += 1;
            }
        }
        assert_eq!(resets, 1);

        store.dispatch(Action::Rejected {
            op: FeedOp::DeletePost,
            message: "Failed to delete post.".to_string(),
        });
        sleep(Duration::from_millis(2900)).await;
        assert_eq!(store.state().error.as_deref(), Some("Failed to delete post."));

        sleep(Duration::from_millis(200)).await;
        assert!(store.state().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_display_leaves_error_in_place() {
        let store = FeedStore::new(Arc::new(MockFeedApi::unreachable()), Locale::En);
        let display = ErrorDisplay::spawn(store.clone(), Duration::from_secs(1));
        display.stop();

        let _ = store.fetch_posts().await;
        sleep(Duration::from_secs(5)).await;
        assert!(store.state().error.is_some());
    }
}
