//! Species - an empire with its tech, diplomacy, fleet and colonies

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::combat::log::CombatLog;
use crate::core::types::{Coords, PlanetNumber, SpeciesId, TechLevels};
use crate::galaxy::colony::Colony;
use crate::galaxy::ship::Ship;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub tech: TechLevels,

    // Diplomatic relations (declarations, not opinions)
    #[serde(default)]
    pub allies: BTreeSet<SpeciesId>,
    #[serde(default)]
    pub enemies: BTreeSet<SpeciesId>,
    #[serde(default)]
    pub contacts: BTreeSet<SpeciesId>,

    #[serde(default)]
    pub econ_units: i64,

    #[serde(default)]
    pub fleet: Vec<Ship>,
    #[serde(default)]
    pub colonies: Vec<Colony>,

    /// Combat text accumulated over the turn for the report writer
    #[serde(default)]
    pub log: CombatLog,
}

impl Species {
    pub fn new(id: SpeciesId, name: impl Into<String>, tech: TechLevels) -> Self {
        Self {
            id,
            name: name.into(),
            tech,
            allies: BTreeSet::new(),
            enemies: BTreeSet::new(),
            contacts: BTreeSet::new(),
            econ_units: 0,
            fleet: Vec::new(),
            colonies: Vec::new(),
            log: CombatLog::new(),
        }
    }

    pub fn is_ally(&self, other: SpeciesId) -> bool {
        self.allies.contains(&other)
    }

    pub fn is_enemy(&self, other: SpeciesId) -> bool {
        self.enemies.contains(&other)
    }

    pub fn in_contact(&self, other: SpeciesId) -> bool {
        self.contacts.contains(&other)
    }

    /// Declare `other` an enemy, dropping any alliance with it
    pub fn declare_enemy(&mut self, other: SpeciesId) {
        self.allies.remove(&other);
        self.enemies.insert(other);
    }

    /// Any non-disbanded colony in this star system
    pub fn has_colony_at(&self, location: Coords) -> bool {
        self.colonies
            .iter()
            .any(|c| c.location == location && !c.disbanded)
    }

    /// A disbanded colony on this exact planet
    pub fn has_disbanded_colony_at(&self, location: Coords, planet: PlanetNumber) -> bool {
        self.colonies
            .iter()
            .any(|c| c.location == location && c.planet == planet && c.disbanded)
    }
}
