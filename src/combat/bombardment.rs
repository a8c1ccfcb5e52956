//! Bombardment: damage piled up during a bomb run is turned into economic losses

use crate::combat::battle::Battle;
use crate::combat::roster::{reference_cruiser_output, EngagementRoster};
use crate::core::config::CombatConfig;
use crate::galaxy::{Galaxy, Item, UnitRef};

/// Number of strike cruisers in the reference fleet
const REFERENCE_FLEET: i64 = 10;

/// Damage the reference fleet deals over a full bombardment
pub fn reference_damage(config: &CombatConfig) -> i64 {
    REFERENCE_FLEET * i64::from(config.bombardment_rounds.max(1)) * reference_cruiser_output()
}

/// Percent of the colony destroyed, capped at 101
pub fn bombardment_percent(total_damage: i64, reference: i64) -> i64 {
    if reference <= 0 {
        return 0;
    }
    (100 * total_damage / reference).clamp(0, 101)
}

/// Apply every colony's accumulated bomb damage
pub fn apply_bombardment(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &EngagementRoster,
    config: &CombatConfig,
) {
    let reference = reference_damage(config);

    for combatant in &roster.combatants {
        let UnitRef::Colony { species, slot } = combatant.unit else {
            continue;
        };
        if combatant.bomb_damage <= 0 {
            continue;
        }
        let percent = bombardment_percent(combatant.bomb_damage, reference);
        let name = battle.unit_name(galaxy, combatant.unit);
        tracing::info!("Bombardment of {} destroys {}%", name, percent);

        let colony = galaxy.colony_mut(species, slot);
        if percent >= 100 {
            colony.wipe_out();
            battle.log.headline(format!("{} is wiped out by the bombardment!", name));
            continue;
        }

        colony.mining_base -= percent * colony.mining_base / 100;
        colony.manufacturing_base -= percent * colony.manufacturing_base / 100;
        colony.pop_units -= percent * colony.pop_units / 100;
        colony.pd_units -= percent * colony.pd_units / 100;

        let items: Vec<(Item, i64)> = colony.items.iter().collect();
        for (item, qty) in items {
            colony.items.remove(item, percent * qty / 100);
        }

        battle
            .log
            .headline(format!("{} loses {}% of its economy to the bombardment.", name, percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_damage_default_rounds() {
        let config = CombatConfig::default();
        assert_eq!(reference_damage(&config), 10 * 10 * 19035);
    }

    #[test]
    fn test_percent_is_capped() {
        assert_eq!(bombardment_percent(50, 100), 50);
        assert_eq!(bombardment_percent(1_000, 100), 101);
        assert_eq!(bombardment_percent(10, 0), 0);
    }
}
