use async_trait::async_trait;
use serde::Serialize;

use crate::types::{BotRecord, EntityId};

/// Fields for `POST /bots`.
#[derive(Debug, Clone, Serialize)]
pub struct NewBot<'a> {
    pub name: &'a str,
    pub emoji: &'a str,
    pub x: i32,
    pub y: i32,
    pub can_be_mentioned: bool,
}

/// Partial update for `PATCH /bots/{id}`. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BotPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

impl<'a> BotPatch<'a> {
    pub fn rename(name: &'a str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn move_to(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// The platform contract the agency consumes. Calls are fire-and-forget from
/// the agency's point of view: failures propagate, nothing retries.
#[async_trait]
pub trait SpaceApi {
    async fn list_bots(&self) -> anyhow::Result<Vec<BotRecord>>;
    async fn create_bot(&self, bot: &NewBot<'_>) -> anyhow::Result<BotRecord>;
    async fn update_bot(&self, id: EntityId, patch: &BotPatch<'_>) -> anyhow::Result<()>;
    async fn delete_bot(&self, id: EntityId) -> anyhow::Result<()>;
    /// Send chat as `sender`. `text` must already embed the recipient via
    /// [`crate::mention`].
    async fn send_message(&self, sender: EntityId, text: &str) -> anyhow::Result<()>;
}
