//! `petagency`: the pet agency core.
//!
//! A genie bot spawns adoptable pets around its home, interprets chat
//! mentions as commands (adopt, abandon, restock, ...), and keeps adopted
//! pets trailing their owner. All platform I/O goes through
//! [`spacebots::SpaceApi`], so everything here runs against an in-memory
//! fake in tests.

pub mod agency;
pub mod catalog;
pub mod dispatch;
pub mod inventory;
pub mod ledger;
pub mod rng;

pub use agency::Agency;

use spacebots::{EntityId, Pos};

/// A live pet bot.
///
/// `name` is the platform label and changes on adoption ("Alice's dog");
/// `species` is the stable identity and never changes.
#[derive(Debug, Clone)]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub glyph: String,
    pub pos: Pos,
}
