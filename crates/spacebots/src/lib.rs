//! `spacebots`: thin bindings to the collaborative-space platform.
//!
//! Everything the agency needs from the platform goes through here:
//! - REST calls for bot create/update/delete and outbound chat,
//! - an ActionCable-style websocket feed of entity-change events.
//!
//! The [`SpaceApi`] trait is the seam: production code uses [`RestClient`],
//! tests swap in an in-memory fake.

pub mod api;
pub mod cable;
pub mod rest;
pub mod types;

pub use api::{BotPatch, NewBot, SpaceApi};
pub use cable::Subscription;
pub use rest::RestClient;
pub use types::{BotRecord, Entity, EntityId, MessagePayload, Pos};

/// Platform mention syntax. Outbound chat must embed the recipient this way
/// for the message to land in their feed.
pub fn mention(display_name: &str) -> String {
    format!("@**{display_name}**")
}

#[derive(Debug, Clone)]
pub enum FeedError {
    SubscriptionRejected,
    Malformed(&'static str),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::SubscriptionRejected => write!(f, "event channel rejected subscription"),
            FeedError::Malformed(s) => write!(f, "malformed event frame: {s}"),
        }
    }
}

impl std::error::Error for FeedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_wraps_display_name() {
        assert_eq!(mention("Alice Smith"), "@**Alice Smith**");
    }
}
