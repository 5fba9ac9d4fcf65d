//! Topic-based event bus for battle events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need: narrative log lines, turn changes, or the final
//! outcome.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LogEvent, OutcomeEvent, TurnEvent};
