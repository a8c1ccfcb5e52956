//! Shield regeneration between rounds

use crate::combat::battle::Battle;
use crate::combat::roster::EngagementRoster;
use crate::galaxy::{Galaxy, UnitRef};

/// Shield level after one round of regeneration
///
/// Shields recover `5 + LS/10` percent of their full strength, never
/// beyond it.
pub fn regenerated(left: i64, strength: i64, life_support: i64) -> i64 {
    let recovered = strength * (5 + life_support / 10) / 100;
    (left + recovered).clamp(0, strength.max(0))
}

/// Regenerate every unit still in the fight
pub fn regenerate_shields(roster: &mut EngagementRoster, galaxy: &Galaxy) {
    for combatant in &mut roster.combatants {
        let alive = match combatant.unit {
            UnitRef::Ship { species, slot } => {
                let ship = galaxy.ship(species, slot);
                !ship.is_destroyed() && !ship.status.has_left_battle()
            }
            UnitRef::Colony { .. } => true,
        };
        if !alive {
            continue;
        }
        let life_support = galaxy.species(combatant.unit.species()).tech.life_support;
        combatant.shield_strength_left = regenerated(
            combatant.shield_strength_left,
            combatant.shield_strength,
            life_support,
        );
    }
}

/// Remember how charged each unit's shields were for the next engagement
pub fn store_shield_levels(battle: &mut Battle, roster: &EngagementRoster) {
    for combatant in &roster.combatants {
        let percent = if combatant.shield_strength > 0 {
            100 * combatant.shield_strength_left / combatant.shield_strength
        } else {
            100
        };
        battle.shield_percent.insert(combatant.unit, percent);
    }
}
