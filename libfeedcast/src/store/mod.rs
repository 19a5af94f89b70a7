//! Feed state container
//!
//! - Actions: what happened to a request
//! - State: what the view layer shows right now
//! - Reducer: pure `(FeedState, Action) -> FeedState`
//! - Store: owns the state, runs requests, broadcasts actions

pub mod actions;
pub mod dispatch;
pub mod error_display;
pub mod events;
pub mod reducer;
pub mod state;

pub use actions::{Action, FeedOp};
pub use dispatch::FeedStore;
pub use error_display::ErrorDisplay;
pub use reducer::reduce;
pub use state::FeedState;
