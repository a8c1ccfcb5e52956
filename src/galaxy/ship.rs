//! Ships and their combat-relevant state

use serde::{Deserialize, Serialize};

use crate::core::types::{Coords, PlanetNumber};
use crate::galaxy::item::{Inventory, Item};

/// Highest age a ship survives. Anything older is wreckage.
pub const MAX_SURVIVABLE_AGE: i32 = 49;

/// Age assigned to a ship that is removed outright (destroyed or hijacked)
pub const DESTROYED_AGE: i32 = 50;

/// Tonnage of a strike cruiser, the reference hull for bombardment
pub const STRIKE_CRUISER_TONNAGE: i64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    Picketboat,
    Corvette,
    Escort,
    Frigate,
    Destroyer,
    LightCruiser,
    StrikeCruiser,
    HeavyCruiser,
    CommandCruiser,
    Battlecruiser,
    Battleship,
    Dreadnought,
    SuperDreadnought,
    Battlemoon,
    Battleworld,
    Battlestar,
    Starbase,
    Transport,
}

impl ShipClass {
    pub fn abbr(&self) -> &'static str {
        match self {
            ShipClass::Picketboat => "PB",
            ShipClass::Corvette => "CT",
            ShipClass::Escort => "ES",
            ShipClass::Frigate => "FF",
            ShipClass::Destroyer => "DD",
            ShipClass::LightCruiser => "CL",
            ShipClass::StrikeCruiser => "CS",
            ShipClass::HeavyCruiser => "CA",
            ShipClass::CommandCruiser => "CC",
            ShipClass::Battlecruiser => "BC",
            ShipClass::Battleship => "BS",
            ShipClass::Dreadnought => "DN",
            ShipClass::SuperDreadnought => "SD",
            ShipClass::Battlemoon => "BM",
            ShipClass::Battleworld => "BW",
            ShipClass::Battlestar => "BR",
            ShipClass::Starbase => "BA",
            ShipClass::Transport => "TR",
        }
    }

    /// Fixed tonnage of warship classes; starbases and transports are built to order
    pub fn standard_tonnage(&self) -> Option<i64> {
        let tons = match self {
            ShipClass::Picketboat => 1,
            ShipClass::Corvette => 2,
            ShipClass::Escort => 5,
            ShipClass::Frigate => 10,
            ShipClass::Destroyer => 15,
            ShipClass::LightCruiser => 20,
            ShipClass::StrikeCruiser => 25,
            ShipClass::HeavyCruiser => 30,
            ShipClass::CommandCruiser => 35,
            ShipClass::Battlecruiser => 40,
            ShipClass::Battleship => 45,
            ShipClass::Dreadnought => 50,
            ShipClass::SuperDreadnought => 55,
            ShipClass::Battlemoon => 60,
            ShipClass::Battleworld => 65,
            ShipClass::Battlestar => 70,
            ShipClass::Starbase | ShipClass::Transport => return None,
        };
        Some(tons)
    }

    pub fn is_transport(&self) -> bool {
        *self == ShipClass::Transport
    }

    pub fn is_starbase(&self) -> bool {
        *self == ShipClass::Starbase
    }

    pub fn is_warship(&self) -> bool {
        !self.is_transport() && !self.is_starbase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    UnderConstruction,
    InOrbit,
    OnSurface,
    InDeepSpace,
    /// Thrown out of the battle by an enemy forced-jump unit
    ForcedJump,
    /// Withdrew from the battle under its own power
    JumpedInCombat,
}

impl ShipStatus {
    /// Ship has left the battle this turn
    pub fn has_left_battle(&self) -> bool {
        matches!(self, ShipStatus::ForcedJump | ShipStatus::JumpedInCombat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub class: ShipClass,
    /// Tonnage in units of 10,000 tons
    pub tonnage: i64,
    pub sub_light: bool,
    pub age: i32,
    pub status: ShipStatus,
    pub location: Coords,
    pub planet: PlanetNumber,
    /// Where the ship ends up after a withdrawal or forced jump
    #[serde(default)]
    pub destination: Option<Coords>,
    #[serde(default)]
    pub arrived_via_wormhole: bool,
    /// Construction cost still owed while under construction
    #[serde(default)]
    pub remaining_cost: i64,
    #[serde(default)]
    pub cargo: Inventory,
}

impl Ship {
    /// A ship of the given class sitting in deep space
    pub fn new(name: impl Into<String>, class: ShipClass, tonnage: i64, location: Coords) -> Self {
        Self {
            name: name.into(),
            class,
            tonnage,
            sub_light: false,
            age: 0,
            status: ShipStatus::InDeepSpace,
            location,
            planet: 0,
            destination: None,
            arrived_via_wormhole: false,
            remaining_cost: 0,
            cargo: Inventory::new(),
        }
    }

    /// Warship with its class' standard tonnage
    pub fn warship(name: impl Into<String>, class: ShipClass, location: Coords) -> Self {
        let tonnage = class.standard_tonnage().unwrap_or(1);
        Self::new(name, class, tonnage, location)
    }

    pub fn is_destroyed(&self) -> bool {
        self.age > MAX_SURVIVABLE_AGE
    }

    /// Carries enough field-distortion units to hide its identity
    pub fn is_distorted(&self) -> bool {
        self.tonnage > 0 && self.cargo.get(Item::FieldDistortion) >= self.tonnage
    }

    /// FTL-capable hulls can jump out of a battle
    pub fn can_withdraw(&self) -> bool {
        !self.sub_light && !self.class.is_starbase()
    }

    pub fn original_cost(&self) -> i64 {
        let base = if self.class.is_transport() {
            25 * self.tonnage
        } else {
            100 * self.tonnage
        };
        if self.sub_light {
            (3 * base) / 4
        } else {
            base
        }
    }

    /// Economic value recovered by taking this ship apart at `age`
    ///
    /// Hijackers pass the age before the killing blow.
    pub fn recycle_value_at_age(&self, age: i32) -> i64 {
        let original = self.original_cost();
        let hull = if self.status == ShipStatus::UnderConstruction {
            (original - self.remaining_cost).max(0) / 2
        } else {
            let remaining_life = i64::from(DESTROYED_AGE - age.clamp(0, DESTROYED_AGE));
            (3 * original * remaining_life) / 200
        };

        let cargo: i64 = self
            .cargo
            .iter()
            .map(|(item, qty)| (item.unit_cost() * qty) / 2)
            .sum();

        hull + cargo
    }
}
