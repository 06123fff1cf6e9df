use std::collections::VecDeque;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::FeedError;
use crate::types::Entity;

const CHANNEL_IDENTIFIER: &str = r#"{"channel":"ApiChannel"}"#;

/// The live entity-change feed.
///
/// Cable-protocol chatter (welcome, pings, subscription confirms) is consumed
/// internally; callers only ever see entities. A `world` snapshot frame is
/// unrolled and its entities handed out one at a time, so the caller sees a
/// single flat sequence. Non-restartable: once `next_entity` returns
/// `Ok(None)` the connection is gone.
pub struct Subscription {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    pending: VecDeque<Entity>,
}

#[derive(Debug, Deserialize)]
struct ChannelMessage {
    #[serde(rename = "type")]
    kind: String,
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WorldPayload {
    entities: Vec<Entity>,
}

impl Subscription {
    /// Connect and subscribe to the entity channel.
    pub async fn connect(ws_url: &str, app_id: &str, app_secret: &str) -> anyhow::Result<Self> {
        let url = format!("{ws_url}?app_id={app_id}&app_secret={app_secret}");
        let (mut ws, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .with_context(|| format!("connect {ws_url}"))?;

        let subscribe = serde_json::json!({
            "command": "subscribe",
            "identifier": CHANNEL_IDENTIFIER,
        });
        ws.send(Message::Text(subscribe.to_string().into()))
            .await
            .context("send subscribe")?;

        Ok(Self {
            ws,
            pending: VecDeque::new(),
        })
    }

    /// Pull the next entity event.
    ///
    /// Returns:
    /// - `Ok(Some(entity))` for each entity-change event,
    /// - `Ok(None)` once the server closes the connection.
    pub async fn next_entity(&mut self) -> anyhow::Result<Option<Entity>> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Ok(Some(e));
            }

            let Some(frame) = self.ws.next().await else {
                return Ok(None);
            };

            match frame.context("read event frame")? {
                Message::Text(raw) => ingest_frame(&mut self.pending, &raw)?,
                Message::Ping(p) => {
                    self.ws.send(Message::Pong(p)).await.context("send pong")?;
                }
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
    }
}

/// Decode one text frame and queue any entities it carries.
fn ingest_frame(pending: &mut VecDeque<Entity>, raw: &str) -> anyhow::Result<()> {
    let frame: serde_json::Value = serde_json::from_str(raw).context("decode event frame")?;

    // Control frames carry a top-level "type".
    if let Some(kind) = frame.get("type").and_then(|v| v.as_str()) {
        match kind {
            "welcome" | "ping" | "confirm_subscription" => return Ok(()),
            "reject_subscription" => return Err(FeedError::SubscriptionRejected.into()),
            other => {
                debug!(kind = %other, "ignoring unknown control frame");
                return Ok(());
            }
        }
    }

    let Some(message) = frame.get("message") else {
        return Err(FeedError::Malformed("data frame without message").into());
    };
    let message: ChannelMessage =
        serde_json::from_value(message.clone()).context("decode channel message")?;

    match message.kind.as_str() {
        "world" => {
            let world: WorldPayload =
                serde_json::from_value(message.payload).context("decode world payload")?;
            debug!(entities = world.entities.len(), "world snapshot");
            pending.extend(world.entities);
        }
        "entity" => {
            let entity: Entity =
                serde_json::from_value(message.payload).context("decode entity payload")?;
            pending.push_back(entity);
        }
        other => {
            debug!(kind = %other, "ignoring unknown channel message");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_frames_yield_nothing() {
        let mut q = VecDeque::new();
        ingest_frame(&mut q, r#"{"type":"welcome"}"#).unwrap();
        ingest_frame(&mut q, r#"{"type":"ping","message":171}"#).unwrap();
        ingest_frame(&mut q, r#"{"type":"confirm_subscription","identifier":"x"}"#).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn rejection_is_an_error() {
        let mut q = VecDeque::new();
        assert!(ingest_frame(&mut q, r#"{"type":"reject_subscription"}"#).is_err());
    }

    #[test]
    fn data_frame_without_message_is_malformed() {
        let mut q = VecDeque::new();
        assert!(ingest_frame(&mut q, r#"{"identifier":"x"}"#).is_err());
    }

    #[test]
    fn world_snapshot_unrolls_to_individual_entities() {
        let mut q = VecDeque::new();
        let raw = r#"{"identifier":"x","message":{"type":"world","payload":{"entities":[
            {"type":"Avatar","id":1,"person_name":"Alice","pos":{"x":0,"y":0}},
            {"type":"Bot","id":2,"pos":{"x":1,"y":1}}
        ]}}}"#;
        ingest_frame(&mut q, raw).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].id, 1);
        assert_eq!(q[1].id, 2);
    }

    #[test]
    fn entity_frame_queues_one() {
        let mut q = VecDeque::new();
        let raw = r#"{"identifier":"x","message":{"type":"entity","payload":
            {"type":"Avatar","id":9,"person_name":"Bob","pos":{"x":5,"y":6}}}}"#;
        ingest_frame(&mut q, raw).unwrap();
        assert_eq!(q.len(), 1);
        assert!(q[0].is_avatar());
    }
}
