//! Siege bookkeeping for colonies blockaded during a siege engagement

use ahash::AHashSet;

use crate::combat::battle::Battle;
use crate::combat::roster::EngagementRoster;
use crate::combat::transaction::TransactionKind;
use crate::core::types::SpeciesId;
use crate::galaxy::{Galaxy, UnitRef};

/// Share of the colony's output lost to the blockade, 1..=100
pub fn siege_effectiveness(besieging_offense: i64, colony_defense: i64) -> i32 {
    let total = besieging_offense + colony_defense;
    if total <= 0 {
        return 1;
    }
    (100 * besieging_offense / total).clamp(1, 100) as i32
}

/// Set siege effectiveness on every besieged colony and notify both sides
pub fn apply_siege(battle: &mut Battle, galaxy: &mut Galaxy, roster: &EngagementRoster) {
    let mut notified: AHashSet<(UnitRef, SpeciesId)> = AHashSet::new();

    for combatant in &roster.combatants {
        let UnitRef::Colony { species: besieged, slot } = combatant.unit else {
            continue;
        };
        if combatant.besiegers.is_empty() {
            continue;
        }

        let offense: i64 = combatant
            .besiegers
            .iter()
            .filter_map(|&unit| roster.find(unit))
            .map(|c| c.threat())
            .sum();
        let effectiveness = siege_effectiveness(offense, combatant.shield_strength);
        let name = battle.unit_name(galaxy, combatant.unit);

        let colony = galaxy.colony_mut(besieged, slot);
        colony.siege_eff = effectiveness;
        let colony_name = colony.name.clone();

        for &ship_ref in &combatant.besiegers {
            let UnitRef::Ship { species: besieger, slot: ship_slot } = ship_ref else {
                continue;
            };
            if !notified.insert((ship_ref, besieged)) {
                continue;
            }
            battle.transactions.record(
                battle.location,
                TransactionKind::Besieged {
                    besieger,
                    besieged,
                    ship_name: galaxy.ship(besieger, ship_slot).name.clone(),
                    colony_name: colony_name.clone(),
                },
            );
        }

        tracing::info!("{} besieged at {}%", name, effectiveness);
        battle.log.headline(format!("{} is under siege!", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effectiveness_clamps() {
        assert_eq!(siege_effectiveness(300, 100), 75);
        assert_eq!(siege_effectiveness(1, 10_000), 1);
        assert_eq!(siege_effectiveness(500, 0), 100);
        assert_eq!(siege_effectiveness(0, 0), 1);
    }
}
