//! Change notifications for the feed store
//!
//! Every action the store reduces is broadcast to subscribers after the new
//! state is in place, so a subscriber that reads the state on receipt sees
//! the effect of that action.
//!
//! The bus uses `tokio::sync::broadcast`. With no subscribers, actions are
//! dropped; a slow subscriber lags and loses the oldest actions instead of
//! blocking the store.
//!
//! ```
//! use libfeedcast::store::events::ActionBus;
//! use libfeedcast::store::Action;
//!
//! # async fn example() {
//! let bus = ActionBus::new(64);
//! let mut receiver = bus.subscribe();
//!
//! bus.emit(Action::ResetError);
//!
//! if let Ok(action) = receiver.recv().await {
//!     println!("{}", action.type_name());
//! }
//! # }
//! ```

use tokio::sync::broadcast;

use super::actions::Action;

/// Receiving end of the bus
pub type ActionReceiver = broadcast::Receiver<Action>;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct ActionBus {
    sender: broadcast::Sender<Action>,
}

impl ActionBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to actions emitted from now on
    pub fn subscribe(&self) -> ActionReceiver {
        self.sender.subscribe()
    }

    /// Broadcast an action; never blocks
    pub fn emit(&self, action: Action) {
        // Err only means nobody is listening
        let _ = self.sender.send(action);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ActionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
