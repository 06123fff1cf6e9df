use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

use crate::api::{BotPatch, NewBot, SpaceApi};
use crate::types::{BotRecord, EntityId};

/// REST client for the platform API.
///
/// Auth rides on every request as `app_id`/`app_secret` query parameters,
/// which is how the platform wants it.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base: String,
    app_id: String,
    app_secret: String,
}

// The API wraps write bodies in a named envelope.
#[derive(Serialize)]
struct BotEnvelope<'a, T: Serialize> {
    bot: &'a T,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    bot_id: EntityId,
    text: &'a str,
}

impl RestClient {
    pub fn new(base_url: &str, app_id: &str, app_secret: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
        }
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [
            ("app_id", self.app_id.as_str()),
            ("app_secret", self.app_secret.as_str()),
        ]
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SpaceApi for RestClient {
    async fn list_bots(&self) -> anyhow::Result<Vec<BotRecord>> {
        let resp = self
            .http
            .get(self.url("bots"))
            .query(&self.auth())
            .send()
            .await
            .context("GET /bots")?
            .error_for_status()
            .context("GET /bots status")?;
        Ok(resp.json().await.context("decode bot list")?)
    }

    async fn create_bot(&self, bot: &NewBot<'_>) -> anyhow::Result<BotRecord> {
        let resp = self
            .http
            .post(self.url("bots"))
            .query(&self.auth())
            .json(&BotEnvelope { bot })
            .send()
            .await
            .with_context(|| format!("POST /bots ({})", bot.name))?
            .error_for_status()
            .context("POST /bots status")?;
        Ok(resp.json().await.context("decode created bot")?)
    }

    async fn update_bot(&self, id: EntityId, patch: &BotPatch<'_>) -> anyhow::Result<()> {
        self.http
            .patch(self.url(&format!("bots/{id}")))
            .query(&self.auth())
            .json(&BotEnvelope { bot: patch })
            .send()
            .await
            .with_context(|| format!("PATCH /bots/{id}"))?
            .error_for_status()
            .with_context(|| format!("PATCH /bots/{id} status"))?;
        Ok(())
    }

    async fn delete_bot(&self, id: EntityId) -> anyhow::Result<()> {
        self.http
            .delete(self.url(&format!("bots/{id}")))
            .query(&self.auth())
            .send()
            .await
            .with_context(|| format!("DELETE /bots/{id}"))?
            .error_for_status()
            .with_context(|| format!("DELETE /bots/{id} status"))?;
        Ok(())
    }

    async fn send_message(&self, sender: EntityId, text: &str) -> anyhow::Result<()> {
        self.http
            .post(self.url("messages"))
            .query(&self.auth())
            .json(&OutboundMessage {
                bot_id: sender,
                text,
            })
            .send()
            .await
            .context("POST /messages")?
            .error_for_status()
            .context("POST /messages status")?;
        Ok(())
    }
}
