use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-assigned entity identifier. Opaque; never arithmetic.
pub type EntityId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

/// A chat message attached to an entity update (or to a bot record, where it
/// is the bot's most recently sent message).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub mentioned_entity_ids: Vec<EntityId>,
}

/// A bot as the platform reports it from `GET /bots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotRecord {
    pub id: EntityId,
    pub name: String,
    pub emoji: String,
    pub pos: Pos,
    #[serde(default)]
    pub message: Option<MessagePayload>,
    #[serde(default)]
    pub can_be_mentioned: bool,
}

/// One entity-change event off the websocket feed.
///
/// The feed carries every entity kind in the space; only `Avatar` matters to
/// the agency, so the kind stays a plain string rather than a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: EntityId,
    #[serde(default)]
    pub person_name: Option<String>,
    pub pos: Pos,
    #[serde(default)]
    pub message: Option<MessagePayload>,
}

impl Entity {
    pub fn is_avatar(&self) -> bool {
        self.kind == "Avatar"
    }
}
