//! Battle orchestrator
//!
//! Sequences everything that happens at one location: diplomacy, the
//! ambush pass, each queued sub-engagement with its round loop, bomb-run
//! effects, and the final clean-up that writes results back to the galaxy.

use serde::{Deserialize, Serialize};

use crate::combat::ambush::run_ambushes;
use crate::combat::battle::{Battle, Betrayal, SurpriseState};
use crate::combat::bombardment::apply_bombardment;
use crate::combat::dice::Dice;
use crate::combat::diplomacy::{apply_escalations, settle_hostilities};
use crate::combat::germ_warfare::apply_germ_warfare;
use crate::combat::options::{build_engagement_queue, BattleOrders, Engagement, EngagementOption};
use crate::combat::roster::{build_roster, EngagementRoster};
use crate::combat::round::fight_round;
use crate::combat::shields::{regenerate_shields, store_shield_levels};
use crate::combat::siege::apply_siege;
use crate::combat::transaction::TransactionLog;
use crate::combat::withdrawal::check_withdrawals;
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::Coords;
use crate::galaxy::{Galaxy, ShipStatus, UnitRef, DESTROYED_AGE};

/// What came out of one battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub location: Coords,
    /// Sub-engagements that actually saw combat, in order
    pub engagements: Vec<Engagement>,
    /// Rounds fought per sub-engagement
    pub rounds: Vec<u32>,
    pub destroyed: Vec<String>,
    /// Ships recycled by a hijacker instead of destroyed
    pub hijacked: Vec<String>,
    pub withdrawn: Vec<String>,
    pub forced_jumped: Vec<String>,
    pub betrayals: Vec<Betrayal>,
    pub transactions: TransactionLog,
}

impl BattleOutcome {
    pub fn fought(&self) -> bool {
        !self.engagements.is_empty()
    }
}

/// Most rounds a sub-engagement may last
///
/// A deep space fight against a better-armed species holding a deep space
/// defense lasts at most as many rounds as the military tech gap.
pub fn round_cap(battle: &Battle, galaxy: &Galaxy, engagement: Engagement, config: &CombatConfig) -> u32 {
    match engagement.option {
        EngagementOption::Bombardment => config.bombardment_rounds,
        EngagementOption::GermWarfare => config.germ_warfare_rounds,
        EngagementOption::Siege => config.siege_rounds,
        EngagementOption::DeepSpaceFight => {
            let n = battle.participants.len();
            let mut cap = config.max_rounds;
            for a in 0..n {
                if !battle.participants[a].requested_option(EngagementOption::DeepSpaceFight) {
                    continue;
                }
                let attacker_ml = galaxy.species(battle.species_at(a)).tech.military;
                for d in 0..n {
                    if !battle.is_hostile(a, d)
                        || !battle.participants[d].requested_option(EngagementOption::DeepSpaceDefense)
                    {
                        continue;
                    }
                    let defender_ml = galaxy.species(battle.species_at(d)).tech.military;
                    if defender_ml > attacker_ml {
                        let gap = u32::try_from(defender_ml - attacker_ml).unwrap_or(u32::MAX);
                        cap = cap.min(gap.max(1));
                    }
                }
            }
            cap
        }
        _ => config.max_rounds,
    }
}

/// Resolve the battle at one location
pub fn resolve_battle<D: Dice + ?Sized>(
    galaxy: &mut Galaxy,
    orders: &BattleOrders,
    config: &CombatConfig,
    dice: &mut D,
) -> Result<BattleOutcome> {
    let mut battle = Battle::assemble(galaxy, orders, config)?;
    tracing::info!(
        "Resolving battle at {} with {} species",
        battle.location,
        battle.participants.len()
    );

    battle.log.headline(format!("Battle at {}:", battle.location));
    for participant in &battle.participants {
        let species = galaxy.species(participant.species);
        let name = if participant.distorted { "???" } else { species.name.as_str() };
        battle.log.detail(format!("  SP {} is present.", name));
    }

    settle_hostilities(&mut battle, galaxy);

    let mut outcome = BattleOutcome { location: battle.location, ..Default::default() };
    if !battle.has_hostilities() {
        tracing::debug!("No hostilities at {}", battle.location);
        battle.log.detail("No combat takes place.");
        finish(&mut battle, galaxy, &mut outcome);
        return Ok(outcome);
    }

    run_ambushes(&mut battle, galaxy);

    let requests: Vec<(Vec<Engagement>, bool)> = battle
        .participants
        .iter()
        .map(|p| (p.engagements(), !p.has_colony))
        .collect();
    let queue = build_engagement_queue(requests.iter().map(|(e, outsider)| (e.as_slice(), *outsider)));

    for engagement in queue {
        let Some(mut roster) = build_roster(&battle, galaxy, engagement) else {
            tracing::debug!("No fight for {} at {}", engagement, battle.location);
            continue;
        };

        tracing::info!("Engagement: {} at {}", engagement, battle.location);
        battle.log.headline(format!("Engagement: {}.", engagement));
        announce_surprise(&mut battle, galaxy, &mut roster);

        let cap = round_cap(&battle, galaxy, engagement, config);
        let mut rounds = 0;
        for round in 1..=cap {
            if round > 1 {
                check_withdrawals(&mut battle, galaxy);
            }
            if !fight_round(&mut battle, galaxy, &mut roster, dice, config) {
                break;
            }
            rounds = round;
            regenerate_shields(&mut roster, galaxy);
            tracing::debug!("Round {} of {} done", round, engagement);
        }
        store_shield_levels(&mut battle, &roster);

        match engagement.option {
            EngagementOption::Bombardment => apply_bombardment(&mut battle, galaxy, &roster, config),
            EngagementOption::GermWarfare => apply_germ_warfare(&mut battle, galaxy, &roster, dice),
            EngagementOption::Siege => apply_siege(&mut battle, galaxy, &roster),
            _ => {}
        }

        outcome.engagements.push(engagement);
        outcome.rounds.push(rounds);
    }

    finish(&mut battle, galaxy, &mut outcome);
    Ok(outcome)
}

/// Catch eligible species with their shields down at the first real fight
fn announce_surprise(battle: &mut Battle, galaxy: &Galaxy, roster: &mut EngagementRoster) {
    if battle.surprise_announced {
        return;
    }
    battle.surprise_announced = true;

    for (side, participant) in battle.participants.iter().enumerate() {
        if participant.surprise != SurpriseState::Eligible {
            continue;
        }
        let mut caught = false;
        for combatant in roster.combatants.iter_mut().filter(|c| c.side == side) {
            combatant.surprised = true;
            caught = true;
        }
        if caught {
            battle.log.headline(format!(
                "SP {} is taken by surprise!",
                galaxy.species(participant.species).name
            ));
        }
    }
}

/// Write the battle's results back to the galaxy
///
/// Escalations from betrayals only take effect now, so they never change
/// how this battle was fought.
fn finish(battle: &mut Battle, galaxy: &mut Galaxy, outcome: &mut BattleOutcome) {
    apply_escalations(galaxy, &battle.betrayals);

    for participant in &battle.participants {
        for &slot in &participant.ship_slots {
            let unit = UnitRef::Ship { species: participant.species, slot };
            let ship = galaxy.ship(participant.species, slot);
            let name = battle.unit_name(galaxy, unit);
            if battle.hijacked.contains(&unit) {
                outcome.hijacked.push(name);
            } else if ship.age >= DESTROYED_AGE && ship.status != ShipStatus::UnderConstruction {
                outcome.destroyed.push(name);
            } else if ship.status == ShipStatus::JumpedInCombat {
                outcome.withdrawn.push(name);
            } else if ship.status == ShipStatus::ForcedJump {
                outcome.forced_jumped.push(name);
            }
        }
    }

    for participant in &battle.participants {
        galaxy.species_mut(participant.species).log.append(&battle.log);
    }

    let location = battle.location;
    for participant in &battle.participants {
        galaxy
            .species_mut(participant.species)
            .fleet
            .retain(|ship| {
                ship.location != location
                    || ship.age < DESTROYED_AGE
                    || ship.status == ShipStatus::UnderConstruction
            });
    }

    tracing::info!(
        "Battle at {} over: {} destroyed, {} hijacked, {} withdrew, {} jumped",
        location,
        outcome.destroyed.len(),
        outcome.hijacked.len(),
        outcome.withdrawn.len(),
        outcome.forced_jumped.len()
    );

    outcome.betrayals = battle.betrayals.clone();
    outcome.transactions = std::mem::take(&mut battle.transactions);
}

/// Resolve every battle of a turn, one location at a time
pub fn resolve_battles<D: Dice + ?Sized>(
    galaxy: &mut Galaxy,
    battles: &[BattleOrders],
    config: &CombatConfig,
    dice: &mut D,
) -> Result<Vec<BattleOutcome>> {
    battles
        .iter()
        .map(|orders| resolve_battle(galaxy, orders, config, dice))
        .collect()
}
