//! Spatial inventory: spawn coordinate → currently-available pet.

use std::collections::HashMap;

use spacebots::Pos;

use crate::Pet;
use crate::catalog::{ANIMALS, Animal, SPAWN_POINTS};
use crate::rng::Rng64;

/// Invariants: at most one pet per spawn point, every pet here is unowned,
/// and no two available pets share a glyph (enforced at restock time via
/// [`Inventory::choose_species`]).
#[derive(Debug, Default)]
pub struct Inventory {
    slots: HashMap<Pos, Pet>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pet: Pet) {
        self.slots.insert(pet.pos, pet);
    }

    /// Spawn points not currently holding a pet, in fixed order.
    pub fn vacancies(&self) -> Vec<Pos> {
        SPAWN_POINTS
            .iter()
            .copied()
            .filter(|p| !self.slots.contains_key(p))
            .collect()
    }

    pub fn glyph_in_stock(&self, glyph: &str) -> bool {
        self.slots.values().any(|p| p.glyph == glyph)
    }

    /// Exact species-name match over available pets.
    pub fn lookup_by_name(&self, species: &str) -> Option<&Pet> {
        self.slots.values().find(|p| p.species == species)
    }

    /// Uniform pick over available pets; `None` when the inventory is empty.
    pub fn random_available(&self, rng: &mut Rng64) -> Option<&Pet> {
        let mut pets: Vec<&Pet> = self.slots.values().collect();
        pets.sort_by_key(|p| (p.pos.x, p.pos.y));
        rng.pick(&pets).copied()
    }

    pub fn remove(&mut self, pos: Pos) -> Option<Pet> {
        self.slots.remove(&pos)
    }

    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pick a species for a new spawn.
    ///
    /// Samples directly from the species whose glyph is not already in
    /// stock, so the pick is always a single bounded draw. Only when every
    /// glyph is stocked does it allow a duplicate.
    pub fn choose_species(&self, rng: &mut Rng64) -> &'static Animal {
        let fresh: Vec<&'static Animal> = ANIMALS
            .iter()
            .filter(|a| !self.glyph_in_stock(a.glyph))
            .collect();
        match rng.pick(&fresh).copied() {
            Some(a) => a,
            None => rng.pick(ANIMALS).expect("catalog is non-empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: u64, species: &str, glyph: &str, pos: Pos) -> Pet {
        Pet {
            id,
            name: species.to_string(),
            species: species.to_string(),
            glyph: glyph.to_string(),
            pos,
        }
    }

    #[test]
    fn vacancies_shrink_as_slots_fill() {
        let mut inv = Inventory::new();
        assert_eq!(inv.vacancies().len(), 7);

        inv.insert(pet(1, "dog", "🐕", SPAWN_POINTS[0]));
        inv.insert(pet(2, "cat", "🐈", SPAWN_POINTS[3]));
        let vac = inv.vacancies();
        assert_eq!(vac.len(), 5);
        assert!(!vac.contains(&SPAWN_POINTS[0]));
        assert!(!vac.contains(&SPAWN_POINTS[3]));
    }

    #[test]
    fn insert_at_same_point_replaces_not_duplicates() {
        let mut inv = Inventory::new();
        inv.insert(pet(1, "dog", "🐕", SPAWN_POINTS[0]));
        inv.insert(pet(2, "cat", "🐈", SPAWN_POINTS[0]));
        assert_eq!(inv.len(), 1);
        assert!(inv.lookup_by_name("dog").is_none());
    }

    #[test]
    fn lookup_is_exact_on_species() {
        let mut inv = Inventory::new();
        inv.insert(pet(1, "t-rex", "🦖", SPAWN_POINTS[1]));
        assert!(inv.lookup_by_name("t-rex").is_some());
        assert!(inv.lookup_by_name("rex").is_none());
        assert!(inv.lookup_by_name("T-REX").is_none());
    }

    #[test]
    fn remove_by_coordinate() {
        let mut inv = Inventory::new();
        inv.insert(pet(1, "dog", "🐕", SPAWN_POINTS[0]));
        assert!(inv.remove(SPAWN_POINTS[0]).is_some());
        assert!(inv.remove(SPAWN_POINTS[0]).is_none());
        assert!(inv.is_empty());
    }

    #[test]
    fn random_available_on_empty_is_none() {
        let inv = Inventory::new();
        let mut rng = Rng64::from_seed(1);
        assert!(inv.random_available(&mut rng).is_none());
    }

    #[test]
    fn choose_species_avoids_stocked_glyphs() {
        let mut inv = Inventory::new();
        inv.insert(pet(1, "dog", "🐕", SPAWN_POINTS[0]));
        inv.insert(pet(2, "cat", "🐈", SPAWN_POINTS[1]));

        let mut rng = Rng64::from_seed(9);
        for _ in 0..100 {
            let a = inv.choose_species(&mut rng);
            assert_ne!(a.glyph, "🐕");
            assert_ne!(a.glyph, "🐈");
        }
    }

    #[test]
    fn choose_species_still_terminates_when_everything_is_stocked() {
        let mut inv = Inventory::new();
        // Stock every glyph in the catalog (off-grid positions are fine for
        // this; the inventory doesn't police coordinates).
        for (i, a) in ANIMALS.iter().enumerate() {
            inv.insert(pet(
                i as u64,
                a.name,
                a.glyph,
                Pos {
                    x: i as i32,
                    y: 100,
                },
            ));
        }
        let mut rng = Rng64::from_seed(4);
        // Falls back to any species rather than spinning.
        let a = inv.choose_species(&mut rng);
        assert!(ANIMALS.iter().any(|b| b.glyph == a.glyph));
    }
}
