//! Ownership ledger: owner id → pets they currently hold, in adoption order.

use std::collections::HashMap;

use spacebots::EntityId;

use crate::Pet;
use crate::rng::Rng64;

#[derive(Debug, Default)]
pub struct Ledger {
    owned: HashMap<EntityId, Vec<Pet>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pet` to `owner`'s sequence.
    pub fn claim(&mut self, owner: EntityId, pet: Pet) {
        self.owned.entry(owner).or_default().push(pet);
    }

    /// Remove and return the first of `owner`'s pets of the given species.
    ///
    /// Matches the stable `species` field, so the owner-name prefix added on
    /// adoption never gets in the way.
    pub fn release_by_species(&mut self, owner: EntityId, species: &str) -> Option<Pet> {
        let pets = self.owned.get_mut(&owner)?;
        let i = pets.iter().position(|p| p.species == species)?;
        let pet = pets.remove(i);
        if pets.is_empty() {
            self.owned.remove(&owner);
        }
        Some(pet)
    }

    /// Uniform pick over `owner`'s pets; `None` when they own nothing.
    pub fn random_owned(&self, owner: EntityId, rng: &mut Rng64) -> Option<&Pet> {
        rng.pick(self.owned_by(owner))
    }

    /// All pets currently owned by `owner`, oldest adoption first.
    pub fn owned_by(&self, owner: EntityId) -> &[Pet] {
        self.owned.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }
}
