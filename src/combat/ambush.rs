//! Ambush: funds committed before the battle age enemy ships once, up front

use crate::combat::battle::{is_present, Battle};
use crate::galaxy::{Galaxy, Ship, UnitRef};

/// Age added to each ambushed ship
///
/// Integer division happens left to right, exactly as written.
pub fn ambush_age_increment(funds: i64, friendly_tonnage: i64, enemy_tonnage: i64) -> i64 {
    if enemy_tonnage <= 0 {
        return 0;
    }
    (10 * funds / enemy_tonnage) * friendly_tonnage / enemy_tonnage
}

/// Transports are easy prey and count for a tenth of a warship
fn weighted_tonnage(ship: &Ship) -> i64 {
    if ship.class.is_transport() {
        ship.tonnage
    } else {
        10 * ship.tonnage
    }
}

fn in_battle(ship: &Ship) -> bool {
    is_present(ship) && !ship.is_destroyed()
}

/// Spend every participant's ambush funds
///
/// Returns the number of ships destroyed by ambushes.
pub fn run_ambushes(battle: &mut Battle, galaxy: &mut Galaxy) -> usize {
    let mut destroyed = 0;

    for side in 0..battle.participants.len() {
        let funds = battle.participants[side].ambush_funds;
        if funds <= 0 {
            continue;
        }
        battle.participants[side].ambush_funds = 0;
        let ambusher = battle.species_at(side);

        let targets: Vec<usize> = (0..battle.participants.len())
            .filter(|&other| battle.is_mutually_hostile(side, other))
            .collect();
        if targets.is_empty() {
            continue;
        }

        let friendly_tonnage: i64 = battle.participants[side]
            .ship_slots
            .iter()
            .map(|&slot| galaxy.ship(ambusher, slot))
            .filter(|s| in_battle(s) && s.class.is_warship())
            .map(|s| s.tonnage)
            .sum();

        let victims: Vec<UnitRef> = targets
            .iter()
            .flat_map(|&other| {
                let species = battle.species_at(other);
                battle.participants[other]
                    .ship_slots
                    .iter()
                    .map(move |&slot| UnitRef::Ship { species, slot })
            })
            .filter(|unit| match *unit {
                UnitRef::Ship { species, slot } => in_battle(galaxy.ship(species, slot)),
                UnitRef::Colony { .. } => false,
            })
            .collect();

        let enemy_tonnage: i64 = victims
            .iter()
            .filter_map(|unit| match *unit {
                UnitRef::Ship { species, slot } => Some(weighted_tonnage(galaxy.ship(species, slot))),
                UnitRef::Colony { .. } => None,
            })
            .sum();

        let increment = ambush_age_increment(funds, friendly_tonnage, enemy_tonnage);
        tracing::info!(
            "SP {} ambushes at {} for {} (age +{})",
            ambusher,
            battle.location,
            funds,
            increment
        );
        battle.log.headline(format!(
            "SP {} springs an ambush!",
            galaxy.species(ambusher).name
        ));
        if increment <= 0 {
            continue;
        }

        for unit in victims {
            let UnitRef::Ship { species, slot } = unit else {
                continue;
            };
            let name = battle.unit_name(galaxy, unit);
            let ship = galaxy.ship_mut(species, slot);
            let mut added = increment;
            if ship.arrived_via_wormhole {
                added *= 2;
            }
            ship.age = ship.age.saturating_add(i32::try_from(added).unwrap_or(i32::MAX));

            if ship.is_destroyed() {
                destroyed += 1;
                battle.log.headline(format!("{} is destroyed in the ambush!", name));
            } else {
                battle.log.detail(format!("{} is damaged in the ambush.", name));
            }
        }
    }

    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::diplomacy::settle_hostilities;
    use crate::combat::options::{BattleOrders, HostilityDecl, SpeciesOrders};
    use crate::core::config::CombatConfig;
    use crate::core::types::{Coords, SpeciesId, TechLevels};
    use crate::galaxy::{ShipClass, Species};

    const HERE: Coords = Coords { x: 3, y: 3, z: 3 };

    #[test]
    fn test_increment_example() {
        assert_eq!(ambush_age_increment(50, 100, 200), 1);
        assert_eq!(ambush_age_increment(50, 100, 0), 0);
        // truncation happens before the tonnage ratio
        assert_eq!(ambush_age_increment(19, 1000, 200), 0);
    }

    #[test]
    fn test_ambush_ages_enemy_ships() {
        let mut galaxy = Galaxy::new();
        let mut vorn = Species::new(SpeciesId(1), "Vorn", TechLevels::uniform(10));
        vorn.fleet.push(Ship::new("Big", ShipClass::Battleship, 100, HERE));
        galaxy.add_species(vorn);

        let mut kesh = Species::new(SpeciesId(2), "Kesh", TechLevels::uniform(10));
        kesh.fleet.push(Ship::new("Slow", ShipClass::Frigate, 10, HERE));
        let mut tunneler = Ship::new("Worm", ShipClass::Frigate, 10, HERE);
        tunneler.arrived_via_wormhole = true;
        kesh.fleet.push(tunneler);
        galaxy.add_species(kesh);

        let mut orders = SpeciesOrders::idle(SpeciesId(1)).declare(HostilityDecl::attack(SpeciesId(2)));
        orders.ambush_funds = 800;
        let battle_orders = BattleOrders { location: HERE, species: vec![orders] };
        let mut battle = Battle::assemble(&galaxy, &battle_orders, &CombatConfig::default()).unwrap();
        settle_hostilities(&mut battle, &galaxy);

        // enemy tonnage 200, friendly 100: (8000 / 200) * 100 / 200 = 20
        assert_eq!(run_ambushes(&mut battle, &mut galaxy), 0);
        assert_eq!(galaxy.ship(SpeciesId(2), 0).age, 20);
        assert_eq!(galaxy.ship(SpeciesId(2), 1).age, 40);
        assert_eq!(battle.participants[0].ambush_funds, 0);

        // funds are spent, a second pass does nothing
        assert_eq!(run_ambushes(&mut battle, &mut galaxy), 0);
        assert_eq!(galaxy.ship(SpeciesId(2), 0).age, 20);
    }
}
