//! Germ warfare: each bomb dropped on a colony may wipe it out

use crate::combat::battle::Battle;
use crate::combat::dice::Dice;
use crate::combat::roster::EngagementRoster;
use crate::combat::transaction::TransactionKind;
use crate::galaxy::{Galaxy, UnitRef};

/// Percent chance that a single bomb takes hold
pub fn germ_success_chance(attacker_bi: i64, defender_bi: i64) -> i64 {
    50 + 2 * (attacker_bi - defender_bi)
}

/// Economic units looted from a wiped-out colony; home planets pay five times over
pub fn germ_loot(economic_base: i64, is_home: bool) -> i64 {
    if is_home {
        5 * economic_base
    } else {
        economic_base
    }
}

/// Roll every bomb dropped during the engagement
///
/// Bombs roll one at a time and the first success wipes the colony, so
/// later bombs on the same colony are wasted.
pub fn apply_germ_warfare<D: Dice + ?Sized>(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &EngagementRoster,
    dice: &mut D,
) {
    for combatant in &roster.combatants {
        let UnitRef::Colony { species: victim, slot } = combatant.unit else {
            continue;
        };
        let defender_bi = galaxy.species(victim).tech.biology;
        let name = battle.unit_name(galaxy, combatant.unit);

        for bomb in &combatant.germ_bombs {
            let attacker = bomb.species();
            let chance = germ_success_chance(galaxy.species(attacker).tech.biology, defender_bi);
            if !dice.percent(chance) {
                battle.log.detail(format!("A germ warfare bomb on {} fails.", name));
                continue;
            }

            let colony = galaxy.colony_mut(victim, slot);
            let loot = germ_loot(colony.economic_base(), colony.is_home);
            let planet = colony.planet;
            let colony_name = colony.name.clone();
            colony.wipe_out();

            galaxy.species_mut(attacker).econ_units += loot;
            battle.transactions.record(
                battle.location,
                TransactionKind::GermWarfareLoot {
                    attacker,
                    victim,
                    planet,
                    colony_name,
                    value: loot,
                },
            );
            tracing::info!("Germ warfare wipes out {} (loot {})", name, loot);
            battle.log.headline(format!(
                "{} is wiped out by germ warfare! SP {} loots {} economic units.",
                name,
                galaxy.species(attacker).name,
                loot
            ));
            break;
        }
    }
}
