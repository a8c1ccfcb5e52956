//! Named planets (colonies) owned by a species

use serde::{Deserialize, Serialize};

use crate::core::types::{Coords, PlanetNumber};
use crate::galaxy::item::Inventory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colony {
    pub name: String,
    pub location: Coords,
    pub planet: PlanetNumber,
    #[serde(default)]
    pub is_home: bool,
    /// Mining base, in tenths
    pub mining_base: i64,
    /// Manufacturing base, in tenths
    pub manufacturing_base: i64,
    pub pop_units: i64,
    /// Planetary defense units
    pub pd_units: i64,
    #[serde(default)]
    pub items: Inventory,
    /// Percentage of output lost to an ongoing siege
    #[serde(default)]
    pub siege_eff: i32,
    #[serde(default)]
    pub disbanded: bool,
}

impl Colony {
    pub fn new(name: impl Into<String>, location: Coords, planet: PlanetNumber) -> Self {
        Self {
            name: name.into(),
            location,
            planet,
            is_home: false,
            mining_base: 0,
            manufacturing_base: 0,
            pop_units: 0,
            pd_units: 0,
            items: Inventory::new(),
            siege_eff: 0,
            disbanded: false,
        }
    }

    /// Combined economic base, in tenths
    pub fn economic_base(&self) -> i64 {
        self.mining_base + self.manufacturing_base
    }

    /// Strip the colony down to an empty claim
    pub fn wipe_out(&mut self) {
        self.mining_base = 0;
        self.manufacturing_base = 0;
        self.pop_units = 0;
        self.pd_units = 0;
        self.items.clear();
        self.siege_eff = 0;
    }
}
