//! The agency: the stateful controller behind the genie.
//!
//! One instance per run, owned by the event loop. All mutation happens on
//! the single event-consuming path; there is no locking because there is no
//! concurrent access.

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use spacebots::{
    mention, BotPatch, BotRecord, Entity, EntityId, MessagePayload, NewBot, Pos, SpaceApi,
};

use crate::catalog::{
    noise_for, sad_message, GENIE_GLYPH, GENIE_HOME, GENIE_NAME, THANKS_REPLIES,
};
use crate::dispatch::{a_an, dispatch, is_polite, Command};
use crate::inventory::Inventory;
use crate::ledger::Ledger;
use crate::rng::Rng64;
use crate::Pet;

/// The eight unit offsets an owned pet may hop to around its owner.
const FOLLOW_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub struct Agency<A: SpaceApi> {
    api: A,
    genie: Option<EntityId>,
    inventory: Inventory,
    ledger: Ledger,
    /// High-water mark of the last processed mention. Only strictly newer
    /// messages are handled; this is the sole dedup/ordering mechanism.
    processed_message_dt: DateTime<Utc>,
    rng: Rng64,
}

impl<A: SpaceApi> Agency<A> {
    /// Rebuild agency state from the platform's live bot list.
    ///
    /// A bot with the genie glyph is the genie. A bot carrying a message is
    /// owned (the first mentioned entity of that message is its owner);
    /// everything else is available inventory at its current coordinate.
    pub async fn create(api: A, rng: Rng64) -> anyhow::Result<Self> {
        let bots = api.list_bots().await.context("rebuild agency state")?;
        let mut agency = Self {
            api,
            genie: None,
            inventory: Inventory::new(),
            ledger: Ledger::new(),
            processed_message_dt: Utc::now(),
            rng,
        };
        for bot in bots {
            agency.absorb_bot(bot);
        }
        info!(
            available = agency.inventory.len(),
            genie = agency.genie.is_some(),
            "agency state rebuilt"
        );
        Ok(agency)
    }

    fn absorb_bot(&mut self, bot: BotRecord) {
        if bot.emoji == GENIE_GLYPH {
            info!(id = bot.id, "found the genie");
            self.genie = Some(bot.id);
            return;
        }

        let owner = bot
            .message
            .as_ref()
            .and_then(|m| m.mentioned_entity_ids.first().copied());
        let pet = Pet {
            id: bot.id,
            species: species_from_label(&bot.name),
            name: bot.name,
            glyph: bot.emoji,
            pos: bot.pos,
        };
        match owner {
            Some(owner) => self.ledger.claim(owner, pet),
            None => self.inventory.insert(pet),
        }
    }

    /// Handle one entity-change event off the feed.
    pub async fn handle_entity(&mut self, entity: &Entity) -> anyhow::Result<()> {
        if !entity.is_avatar() {
            return Ok(());
        }

        if let Some(message) = entity.message.as_ref() {
            let mentions_genie = self
                .genie
                .is_some_and(|g| message.mentioned_entity_ids.contains(&g));
            if mentions_genie {
                if message.sent_at <= self.processed_message_dt {
                    debug!(sent_at = %message.sent_at, "skipping already-processed mention");
                } else {
                    self.handle_mention(entity, message).await?;
                    self.processed_message_dt = message.sent_at;
                }
            }
        }

        // Owned pets trail their owner: every avatar event nudges each of
        // the avatar's pets to a spot one step off the avatar.
        for pet in self.ledger.owned_by(entity.id) {
            let &(dx, dy) = self.rng.pick(&FOLLOW_DELTAS).expect("deltas are non-empty");
            let pos = Pos {
                x: entity.pos.x + dx,
                y: entity.pos.y + dy,
            };
            debug!(pet = pet.id, x = pos.x, y = pos.y, "pet follows owner");
            self.api
                .update_bot(pet.id, &BotPatch::move_to(pos.x, pos.y))
                .await?;
        }
        Ok(())
    }

    async fn handle_mention(
        &mut self,
        adopter: &Entity,
        message: &MessagePayload,
    ) -> anyhow::Result<()> {
        let reply = match dispatch(&message.text) {
            Command::Restock => {
                self.restock_inventory().await?;
                Some("New pets now in stock!".to_string())
            }
            Command::Adopt { species } => {
                self.handle_adoption(adopter, &message.text, &species).await?
            }
            Command::Thanks => self.rng.pick(THANKS_REPLIES).map(|s| s.to_string()),
            Command::Abandon { species } => self.handle_abandonment(adopter, &species).await?,
            Command::SocialRules => Some("Oh, you're right. Sorry!".to_string()),
            Command::Fallback => {
                Some("Sorry, I don't understand. Would you like to adopt a pet?".to_string())
            }
        };

        if let Some(text) = reply {
            let genie = self.genie.context("no genie to reply as")?;
            self.send_to(genie, adopter, &text).await?;
        }
        Ok(())
    }

    /// Adoption. Returns the genie's reply, or `None` on success — the
    /// vocalization sent from the pet itself is the confirmation.
    async fn handle_adoption(
        &mut self,
        adopter: &Entity,
        full_text: &str,
        species: &str,
    ) -> anyhow::Result<Option<String>> {
        if !is_polite(full_text) {
            return Ok(Some(
                "No please? Our pets are only available to polite homes.".to_string(),
            ));
        }

        match species {
            "horse" => {
                return Ok(Some("Sorry, that's just a picture of a horse.".to_string()));
            }
            "genie" => {
                return Ok(Some("You can't adopt me. I'm not a pet!".to_string()));
            }
            "apatosaurus" => {
                return Ok(Some(
                    "Since 2015 the brontosaurus and apatosaurus have been recognised \
                     as separate species. Would you like to adopt a brontosaurus?"
                        .to_string(),
                ));
            }
            _ => {}
        }

        let Some(pet) = self.inventory.lookup_by_name(species).cloned() else {
            let reply = match self.inventory.random_available(&mut self.rng) {
                Some(alt) => format!(
                    "Sorry, we don't have {} at the moment, perhaps you'd like {} instead?",
                    a_an(species),
                    a_an(&alt.species)
                ),
                None => "Sorry, we're all out of pets at the moment.".to_string(),
            };
            return Ok(Some(reply));
        };

        self.send_to(pet.id, adopter, noise_for(&pet.glyph)).await?;

        let owner_name = display_name(adopter)?;
        let new_label = format!("{owner_name}'s {}", pet.species);
        self.api
            .update_bot(pet.id, &BotPatch::rename(&new_label))
            .await?;

        let mut pet = self
            .inventory
            .remove(pet.pos)
            .context("adopted pet vanished from inventory")?;
        pet.name = new_label;
        info!(owner = adopter.id, species = %pet.species, pet = pet.id, "pet adopted");
        self.ledger.claim(adopter.id, pet);
        Ok(None)
    }

    /// Abandonment. Returns the genie's reply, or `None` when the pet was
    /// released (the commiseration from the pet is the only message).
    async fn handle_abandonment(
        &mut self,
        adopter: &Entity,
        species: &str,
    ) -> anyhow::Result<Option<String>> {
        let Some(pet) = self.ledger.release_by_species(adopter.id, species) else {
            let reply = match self.ledger.random_owned(adopter.id, &mut self.rng) {
                Some(owned) => format!(
                    "Sorry, you don't have {}. Would you like to abandon your {} instead?",
                    a_an(species),
                    owned.species
                ),
                None => "You don't have any pets to abandon.".to_string(),
            };
            return Ok(Some(reply));
        };

        let farewell = sad_message(&mut self.rng, &pet.species);
        self.send_to(pet.id, adopter, &farewell).await?;
        self.api.delete_bot(pet.id).await?;
        info!(owner = adopter.id, species = %pet.species, pet = pet.id, "pet abandoned");
        Ok(None)
    }

    /// Fill every vacant spawn point, creating the genie first if this run
    /// doesn't have one yet.
    pub async fn restock_inventory(&mut self) -> anyhow::Result<()> {
        if self.genie.is_none() {
            let genie = self
                .api
                .create_bot(&NewBot {
                    name: GENIE_NAME,
                    emoji: GENIE_GLYPH,
                    x: GENIE_HOME.x,
                    y: GENIE_HOME.y,
                    can_be_mentioned: true,
                })
                .await
                .context("create genie")?;
            info!(id = genie.id, "created the genie");
            self.genie = Some(genie.id);
        }

        for pos in self.inventory.vacancies() {
            let animal = self.inventory.choose_species(&mut self.rng);
            let bot = self
                .api
                .create_bot(&NewBot {
                    name: animal.name,
                    emoji: animal.glyph,
                    x: pos.x,
                    y: pos.y,
                    can_be_mentioned: false,
                })
                .await
                .with_context(|| format!("spawn {}", animal.name))?;
            debug!(species = animal.name, x = pos.x, y = pos.y, "spawned pet");
            self.inventory.insert(Pet {
                id: bot.id,
                name: animal.name.to_string(),
                species: animal.name.to_string(),
                glyph: animal.glyph.to_string(),
                pos,
            });
        }
        Ok(())
    }

    async fn send_to(
        &self,
        sender: EntityId,
        recipient: &Entity,
        text: &str,
    ) -> anyhow::Result<()> {
        let name = display_name(recipient)?;
        self.api
            .send_message(sender, &format!("{} {text}", mention(name)))
            .await
    }
}

fn display_name(entity: &Entity) -> anyhow::Result<&str> {
    entity
        .person_name
        .as_deref()
        .context("avatar event without person_name")
}

/// Species recovered from a platform label: the final whitespace token, so
/// "Alice's dog" and plain "dog" both come back as "dog". Only used when
/// rebuilding state, where the label is all the platform stores.
fn species_from_label(label: &str) -> String {
    label
        .split_whitespace()
        .last()
        .unwrap_or(label)
        .to_string()
}
