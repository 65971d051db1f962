//! Round orchestration: the tick loop plus the feed and stat views it feeds.

pub mod feed;
pub mod stats;
pub mod tick;

pub use feed::EventFeed;
pub use stats::{snapshot, StatLine, StatValue};
pub use tick::{Session, TickEvent, TickResult};
