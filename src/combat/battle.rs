//! Per-location battle context
//!
//! Rebuilt for every battle from the galaxy and the orders. Holds the
//! hostility matrix and every piece of state that must survive between
//! sub-engagements (shield levels, exposed ships, surprise).

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::combat::log::CombatLog;
use crate::combat::options::{
    BattleOrders, Engagement, EngagementOption, Hostility, SpeciesOrders, TargetClass,
};
use crate::combat::transaction::TransactionLog;
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::{Coords, PlanetNumber, SpeciesId};
use crate::galaxy::{Galaxy, Ship, ShipStatus, UnitRef};

/// Whether a species can be caught off guard in this battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurpriseState {
    /// Gave combat orders or was attacked by a non-ally
    NotEligible,
    /// Gave no orders and is attacked only by declared allies
    Eligible,
    /// Gave no orders and nobody attacks it
    Unmobilized,
}

/// Resolved withdrawal thresholds of one species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalThresholds {
    pub warship_age: i32,
    pub transport_age: i32,
    pub fleet_percent: u32,
}

/// A species taking part in the battle
#[derive(Debug, Clone)]
pub struct Participant {
    pub species: SpeciesId,
    pub orders: SpeciesOrders,
    /// Combat orders were actually issued (rather than defaulted)
    pub issued_orders: bool,
    /// Only fully cloaked units are present, so nobody can name this species
    pub distorted: bool,
    pub hijacker: bool,
    pub surprise: SurpriseState,
    pub withdrawal: WithdrawalThresholds,
    pub ambush_funds: i64,
    /// Fleet slots of the ships present when the battle began
    pub ship_slots: Vec<usize>,
    /// Colony slots in this star system
    pub colony_slots: Vec<usize>,
    /// Owns a colony in this star system
    pub has_colony: bool,
}

impl Participant {
    /// Requested engagements, defaulting to defense in place
    pub fn engagements(&self) -> Vec<Engagement> {
        if self.orders.engagements.is_empty() {
            vec![Engagement::defense_in_place()]
        } else {
            self.orders.engagements.clone()
        }
    }

    pub fn requested(&self, engagement: Engagement) -> bool {
        self.engagements().contains(&engagement)
    }

    pub fn requested_option(&self, option: EngagementOption) -> bool {
        self.engagements().iter().any(|e| e.option == option)
    }

    pub fn requested_at(&self, option: EngagementOption, planet: PlanetNumber) -> bool {
        self.requested(Engagement::new(option, planet))
    }

    pub fn special_target(&self) -> Option<TargetClass> {
        self.orders.special_target
    }

    pub fn haven(&self) -> Option<Coords> {
        self.orders.haven
    }
}

/// Battle record: A attacked B while some alliance tied them together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Betrayal {
    pub betrayer: SpeciesId,
    pub victim: SpeciesId,
    /// Third species allied with and in contact with both
    pub witnesses: Vec<SpeciesId>,
}

#[derive(Debug)]
pub struct Battle {
    pub location: Coords,
    pub participants: Vec<Participant>,
    /// `hostility[a][b]`: how participant `a` treats participant `b`
    pub hostility: Vec<Vec<Hostility>>,
    pub betrayals: Vec<Betrayal>,
    /// Shield level (percent) each unit ended its last sub-engagement with
    pub shield_percent: AHashMap<UnitRef, i64>,
    /// Cloaked ships whose identity was revealed by damage
    pub exposed: AHashSet<UnitRef>,
    /// Ships taken as salvage; wrecked, but not reported destroyed
    pub hijacked: AHashSet<UnitRef>,
    pub surprise_announced: bool,
    pub log: CombatLog,
    pub transactions: TransactionLog,
}

impl Battle {
    /// Collect every species present at the location
    ///
    /// Species with ships or colonies here but no orders join as idle
    /// participants, so they can still be attacked and defend themselves.
    pub fn assemble(galaxy: &Galaxy, orders: &BattleOrders, config: &CombatConfig) -> Result<Self> {
        let location = orders.location;
        let mut all_orders: Vec<SpeciesOrders> = Vec::new();

        for species_orders in &orders.species {
            galaxy.get(species_orders.species)?;
            if !all_orders.iter().any(|o| o.species == species_orders.species) {
                all_orders.push(species_orders.clone());
            }
        }
        for species in galaxy.species.values() {
            let present = species.fleet.iter().any(|s| s.location == location)
                || species.colonies.iter().any(|c| c.location == location && !c.disbanded);
            if present && !all_orders.iter().any(|o| o.species == species.id) {
                all_orders.push(SpeciesOrders::idle(species.id));
            }
        }

        let mut participants = Vec::with_capacity(all_orders.len());
        for species_orders in all_orders {
            let species = galaxy.get(species_orders.species)?;

            let ship_slots: Vec<usize> = species
                .fleet
                .iter()
                .enumerate()
                .filter(|(_, s)| s.location == location && is_present(s))
                .map(|(slot, _)| slot)
                .collect();
            let colony_slots: Vec<usize> = species
                .colonies
                .iter()
                .enumerate()
                .filter(|(_, c)| c.location == location && !c.disbanded)
                .map(|(slot, _)| slot)
                .collect();

            if ship_slots.is_empty() && colony_slots.is_empty() {
                tracing::debug!("SP {} has nothing at {}, skipping", species.name, location);
                continue;
            }

            // Colonies always identify their owner
            let identifiable = ship_slots
                .iter()
                .filter(|&&slot| !species.fleet[slot].is_distorted())
                .count()
                + colony_slots.len();
            let cloaked = ship_slots.len() + colony_slots.len() - identifiable;

            let withdrawal = WithdrawalThresholds {
                warship_age: species_orders
                    .withdrawal
                    .warship_age
                    .unwrap_or(config.default_warship_withdraw_age),
                transport_age: species_orders
                    .withdrawal
                    .transport_age
                    .unwrap_or(config.default_transport_withdraw_age),
                fleet_percent: species_orders
                    .withdrawal
                    .fleet_percent
                    .unwrap_or(config.default_fleet_withdraw_percent),
            };

            participants.push(Participant {
                species: species.id,
                issued_orders: !species_orders.engagements.is_empty(),
                distorted: identifiable == 0 && cloaked > 0,
                hijacker: false,
                surprise: SurpriseState::NotEligible,
                withdrawal,
                ambush_funds: species_orders.ambush_funds.max(0),
                has_colony: species.has_colony_at(location),
                ship_slots,
                colony_slots,
                orders: species_orders,
            });
        }

        let n = participants.len();
        Ok(Self {
            location,
            participants,
            hostility: vec![vec![Hostility::None; n]; n],
            betrayals: Vec::new(),
            shield_percent: AHashMap::new(),
            exposed: AHashSet::new(),
            hijacked: AHashSet::new(),
            surprise_announced: false,
            log: CombatLog::new(),
            transactions: TransactionLog::new(),
        })
    }

    pub fn index_of(&self, species: SpeciesId) -> Option<usize> {
        self.participants.iter().position(|p| p.species == species)
    }

    pub fn is_hostile(&self, a: usize, b: usize) -> bool {
        a != b && self.hostility[a][b] != Hostility::None
    }

    pub fn is_mutually_hostile(&self, a: usize, b: usize) -> bool {
        self.is_hostile(a, b) && self.is_hostile(b, a)
    }

    /// Any hostility at all between participants
    pub fn has_hostilities(&self) -> bool {
        let n = self.participants.len();
        (0..n).any(|a| (0..n).any(|b| self.is_hostile(a, b)))
    }

    pub fn species_at(&self, side: usize) -> SpeciesId {
        self.participants[side].species
    }

    /// Ship still counts as a cloaked unknown
    pub fn is_cloaked(&self, galaxy: &Galaxy, unit: UnitRef) -> bool {
        match unit {
            UnitRef::Ship { species, slot } => {
                galaxy.ship(species, slot).is_distorted() && !self.exposed.contains(&unit)
            }
            UnitRef::Colony { .. } => false,
        }
    }

    /// Name as the other players see it
    pub fn unit_name(&self, galaxy: &Galaxy, unit: UnitRef) -> String {
        if self.is_cloaked(galaxy, unit) {
            if let UnitRef::Ship { species, slot } = unit {
                let ship = galaxy.ship(species, slot);
                return format!("SP ??? {} ???", ship.class.abbr());
            }
        }
        true_name(galaxy, unit)
    }

    pub fn shield_percent(&self, unit: UnitRef) -> i64 {
        self.shield_percent.get(&unit).copied().unwrap_or(100)
    }
}

/// Ship can take part in this battle at all
pub fn is_present(ship: &Ship) -> bool {
    ship.status != ShipStatus::UnderConstruction && !ship.status.has_left_battle()
}

/// Real identity of a unit, regardless of cloaking
pub fn true_name(galaxy: &Galaxy, unit: UnitRef) -> String {
    match unit {
        UnitRef::Ship { species, slot } => {
            let ship = galaxy.ship(species, slot);
            format!("SP {} {} {}", galaxy.species(species).name, ship.class.abbr(), ship.name)
        }
        UnitRef::Colony { species, slot } => {
            let colony = galaxy.colony(species, slot);
            format!("PL {} (SP {})", colony.name, galaxy.species(species).name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::options::WithdrawalOrders;
    use crate::core::types::TechLevels;
    use crate::galaxy::{Colony, Item, ShipClass, Species};

    fn galaxy_at(here: Coords) -> Galaxy {
        let mut galaxy = Galaxy::new();

        let mut vorn = Species::new(SpeciesId(1), "Vorn", TechLevels::uniform(10));
        vorn.fleet.push(Ship::warship("Lance", ShipClass::Destroyer, here));
        vorn.fleet.push(Ship::warship("Far", ShipClass::Destroyer, Coords::new(9, 9, 9)));
        galaxy.add_species(vorn);

        let mut kesh = Species::new(SpeciesId(2), "Kesh", TechLevels::uniform(10));
        let mut ghost = Ship::warship("Ghost", ShipClass::Frigate, here);
        ghost.cargo.set(Item::FieldDistortion, 10);
        kesh.fleet.push(ghost);
        galaxy.add_species(kesh);

        let mut orin = Species::new(SpeciesId(3), "Orin", TechLevels::uniform(10));
        orin.colonies.push(Colony::new("Haven", here, 2));
        galaxy.add_species(orin);

        galaxy
    }

    #[test]
    fn test_assemble_adds_idle_species_present() {
        let here = Coords::new(1, 2, 3);
        let galaxy = galaxy_at(here);
        let orders = BattleOrders {
            location: here,
            species: vec![SpeciesOrders::idle(SpeciesId(1)).engage(Engagement::deep_space_fight())],
        };

        let battle = Battle::assemble(&galaxy, &orders, &CombatConfig::default()).unwrap();
        assert_eq!(battle.participants.len(), 3);
        assert!(battle.participants[0].issued_orders);
        assert!(!battle.participants[1].issued_orders);
        assert_eq!(battle.participants[0].ship_slots, vec![0]);
        assert!(battle.participants[2].has_colony);
    }

    #[test]
    fn test_fully_cloaked_species_is_distorted() {
        let here = Coords::new(1, 2, 3);
        let galaxy = galaxy_at(here);
        let orders = BattleOrders { location: here, species: vec![] };
        let battle = Battle::assemble(&galaxy, &orders, &CombatConfig::default()).unwrap();

        let kesh = battle.index_of(SpeciesId(2)).unwrap();
        assert!(battle.participants[kesh].distorted);
        let vorn = battle.index_of(SpeciesId(1)).unwrap();
        assert!(!battle.participants[vorn].distorted);

        let ghost = UnitRef::Ship { species: SpeciesId(2), slot: 0 };
        assert_eq!(battle.unit_name(&galaxy, ghost), "SP ??? FF ???");
        assert_eq!(true_name(&galaxy, ghost), "SP Kesh FF Ghost");
    }

    #[test]
    fn test_withdrawal_defaults_from_config() {
        let here = Coords::new(1, 2, 3);
        let galaxy = galaxy_at(here);
        let mut orders = SpeciesOrders::idle(SpeciesId(1));
        orders.withdrawal = WithdrawalOrders { warship_age: Some(30), ..Default::default() };
        let battle_orders = BattleOrders { location: here, species: vec![orders] };

        let battle = Battle::assemble(&galaxy, &battle_orders, &CombatConfig::default()).unwrap();
        let thresholds = battle.participants[0].withdrawal;
        assert_eq!(thresholds.warship_age, 30);
        assert_eq!(thresholds.transport_age, 100);
        assert_eq!(thresholds.fleet_percent, 100);
    }

    #[test]
    fn test_unknown_species_is_an_error() {
        let here = Coords::new(1, 2, 3);
        let galaxy = galaxy_at(here);
        let orders = BattleOrders { location: here, species: vec![SpeciesOrders::idle(SpeciesId(42))] };
        assert!(Battle::assemble(&galaxy, &orders, &CombatConfig::default()).is_err());
    }
}
