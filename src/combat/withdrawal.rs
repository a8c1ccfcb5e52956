//! Withdrawal of battered ships between rounds

use crate::combat::battle::{is_present, Battle};
use crate::galaxy::{Galaxy, Ship, ShipStatus, UnitRef};

fn can_still_withdraw(ship: &Ship) -> bool {
    is_present(ship) && !ship.is_destroyed() && ship.can_withdraw()
}

fn has_gone(ship: &Ship) -> bool {
    ship.is_destroyed() || ship.status.has_left_battle()
}

/// Pull out every ship past its species' age threshold, then whole fleets
/// whose losses exceed their withdrawal percentage
///
/// Returns how many ships withdrew.
pub fn check_withdrawals(battle: &mut Battle, galaxy: &mut Galaxy) -> usize {
    let mut withdrawn = 0;

    for side in 0..battle.participants.len() {
        let participant = &battle.participants[side];
        let species_id = participant.species;
        let thresholds = participant.withdrawal;
        let haven = participant.haven();
        let slots = participant.ship_slots.clone();

        let mut leaving: Vec<usize> = slots
            .iter()
            .copied()
            .filter(|&slot| {
                let ship = galaxy.ship(species_id, slot);
                let limit = if ship.class.is_transport() {
                    thresholds.transport_age
                } else {
                    thresholds.warship_age
                };
                can_still_withdraw(ship) && ship.age > limit
            })
            .collect();

        let total = slots.len() as u64;
        let gone = slots
            .iter()
            .filter(|&&slot| leaving.contains(&slot) || has_gone(galaxy.ship(species_id, slot)))
            .count() as u64;

        if total > 0 && gone * 100 > u64::from(thresholds.fleet_percent) * total {
            for &slot in &slots {
                if !leaving.contains(&slot) && can_still_withdraw(galaxy.ship(species_id, slot)) {
                    leaving.push(slot);
                }
            }
        }

        for slot in leaving {
            let unit = UnitRef::Ship { species: species_id, slot };
            let name = battle.unit_name(galaxy, unit);
            let ship = galaxy.ship_mut(species_id, slot);
            ship.status = ShipStatus::JumpedInCombat;
            ship.destination = haven;
            battle.log.headline(format!("{} withdraws from the battle!", name));
            withdrawn += 1;
        }
    }

    if withdrawn > 0 {
        tracing::debug!("{} ships withdrew at {}", withdrawn, battle.location);
    }
    withdrawn
}
