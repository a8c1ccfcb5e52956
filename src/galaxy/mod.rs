//! Galaxy state consumed and mutated by the combat core
//!
//! The surrounding turn processor owns these records. Combat only edits
//! fields in place and removes wrecked ships at the end of a battle.

pub mod colony;
pub mod item;
pub mod ship;
pub mod species;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{CombatError, Result};
use crate::core::types::SpeciesId;

pub use colony::Colony;
pub use item::{Inventory, Item};
pub use ship::{Ship, ShipClass, ShipStatus, DESTROYED_AGE, MAX_SURVIVABLE_AGE};
pub use species::Species;

/// Address of a combat unit: a ship in a species' fleet, or a colony's
/// planetary defenses. Slots stay valid for the whole battle because ships
/// are only removed once the battle is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitRef {
    Ship { species: SpeciesId, slot: usize },
    Colony { species: SpeciesId, slot: usize },
}

impl UnitRef {
    pub fn species(&self) -> SpeciesId {
        match self {
            UnitRef::Ship { species, .. } | UnitRef::Colony { species, .. } => *species,
        }
    }
}

/// Every species in the game, keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Galaxy {
    pub species: BTreeMap<SpeciesId, Species>,
}

impl Galaxy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_species(&mut self, species: Species) {
        self.species.insert(species.id, species);
    }

    pub fn get(&self, id: SpeciesId) -> Result<&Species> {
        self.species.get(&id).ok_or(CombatError::SpeciesNotFound(id))
    }

    pub fn get_mut(&mut self, id: SpeciesId) -> Result<&mut Species> {
        self.species.get_mut(&id).ok_or(CombatError::SpeciesNotFound(id))
    }

    /// Species by id; ids inside a battle are validated when it is set up
    pub fn species(&self, id: SpeciesId) -> &Species {
        &self.species[&id]
    }

    pub fn species_mut(&mut self, id: SpeciesId) -> &mut Species {
        self.species
            .get_mut(&id)
            .unwrap_or_else(|| panic!("species {} is not part of the galaxy", id))
    }

    pub fn ship(&self, species: SpeciesId, slot: usize) -> &Ship {
        &self.species(species).fleet[slot]
    }

    pub fn ship_mut(&mut self, species: SpeciesId, slot: usize) -> &mut Ship {
        &mut self.species_mut(species).fleet[slot]
    }

    pub fn colony(&self, species: SpeciesId, slot: usize) -> &Colony {
        &self.species(species).colonies[slot]
    }

    pub fn colony_mut(&mut self, species: SpeciesId, slot: usize) -> &mut Colony {
        &mut self.species_mut(species).colonies[slot]
    }
}
