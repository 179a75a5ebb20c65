//! Topic-based event bus for refresh notifications.
//!
//! Consumers subscribe to the topics they care about and receive every event
//! published after subscribing. Delivery is best effort: a lagging receiver
//! drops the oldest events.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CommitmentEvent, RefreshEvent};
