//! Round resolver
//!
//! One round lets every unit fire its shots. Attackers are drawn at random
//! among units with shots left, so fire from both sides interleaves.

use crate::combat::battle::{true_name, Battle};
use crate::combat::dice::Dice;
use crate::combat::forced_jump::{attempt_chance, carries_jump_units, resolve_jump, usable_device};
use crate::combat::options::{EngagementOption, Hostility, TargetClass};
use crate::combat::roster::{is_targetable, Combatant, EngagementRoster};
use crate::combat::transaction::TransactionKind;
use crate::core::config::CombatConfig;
use crate::core::types::SpeciesId;
use crate::galaxy::{Galaxy, Item, ShipStatus, UnitRef, DESTROYED_AGE};

/// Chance that a shot involving a transport is held back
const TRANSPORT_AVOIDANCE: i64 = 90;

/// Chance that a shot goes to the attacker's preferred target class
const SPECIAL_TARGET_BIAS: i64 = 75;

/// Candidates sampled when looking for the toughest target
const TARGET_SAMPLES: usize = 4;

/// Percent chance to hit
///
/// `attacker_age` is set for ship attackers, whose aim worsens with damage.
pub fn hit_chance(
    attacker_ml: i64,
    defender_ml: i64,
    defender_surprised: bool,
    defender_cloaked: bool,
    attacker_age: Option<i32>,
) -> i64 {
    let total = attacker_ml + defender_ml;
    let mut chance = if total > 0 { 150 * attacker_ml / total } else { 0 };

    if defender_surprised {
        chance *= 2;
    }
    if defender_cloaked {
        chance -= chance / 4;
    }
    chance = chance.clamp(2, 98);

    if let Some(age) = attacker_age {
        chance -= 2 * i64::from(age.max(0)) * chance / 100;
    }
    chance
}

/// Roll `base` with up to 25% variance either way
pub fn vary<D: Dice + ?Sized>(dice: &mut D, base: i64) -> i64 {
    let swing = 26 - i64::from(dice.rnd(51));
    base + swing * base / 100
}

/// What reaches the hull after shields take their share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorption {
    pub net_damage: i64,
    pub shield_left: i64,
}

/// Shields absorb in proportion to their remaining charge
pub fn absorb(damage: i64, shield_left: i64, shield_strength: i64, shields_up: bool) -> Absorption {
    if !shields_up || shield_left <= 0 || shield_strength <= 0 {
        return Absorption { net_damage: damage, shield_left: shield_left.max(0) };
    }
    let percent = 100 * shield_left / shield_strength;
    let absorbed = percent * damage / 100;
    if absorbed > shield_left {
        Absorption { net_damage: damage - shield_left, shield_left: 0 }
    } else {
        Absorption { net_damage: damage - absorbed, shield_left: shield_left - absorbed }
    }
}

/// Structural damage in percent before variance
pub fn percent_decrease(net_damage: i64, shield_strength: i64) -> i64 {
    50 * net_damage / shield_strength.max(1)
}

/// PD units lost to a hit
pub fn pd_losses(percent: i64, original_pd: i64, net_damage: i64, remaining: i64) -> i64 {
    let mut lost = percent * original_pd / 100;
    if net_damage > 0 {
        lost = lost.max(1);
    }
    lost.min(remaining).max(0)
}

/// Unit may fire this round
fn can_fire(combatant: &Combatant, galaxy: &Galaxy, option: EngagementOption) -> bool {
    if combatant.surprised {
        return false;
    }
    if combatant.non_combatant && option != EngagementOption::GermWarfare {
        return false;
    }
    match combatant.unit {
        UnitRef::Ship { species, slot } => {
            let ship = galaxy.ship(species, slot);
            !ship.is_destroyed()
                && !ship.status.has_left_battle()
                && ship.status != ShipStatus::UnderConstruction
        }
        UnitRef::Colony { species, slot } => {
            option.is_bomb_run() || galaxy.colony(species, slot).pd_units > 0
        }
    }
}

/// Zero the shots of every unit that can no longer fire
fn silence_disabled(roster: &mut EngagementRoster, galaxy: &Galaxy) {
    let option = roster.option();
    for combatant in &mut roster.combatants {
        if combatant.shots_left > 0 && !can_fire(combatant, galaxy, option) {
            combatant.shots_left = 0;
        }
    }
}

/// Fight one round
///
/// Returns false iff no unit had a shot and a hostile target this round,
/// which tells the orchestrator the engagement is over. Any shot taken
/// counts, including one spent on a jump attempt or a bomb drop and one
/// held back by transport avoidance.
pub fn fight_round<D: Dice + ?Sized>(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &mut EngagementRoster,
    dice: &mut D,
    config: &CombatConfig,
) -> bool {
    let option = roster.option();
    let mut combat_occurred = false;

    for combatant in &mut roster.combatants {
        combatant.shots_left = combatant.num_shots;
    }

    loop {
        silence_disabled(roster, galaxy);

        let shooters: Vec<usize> = (0..roster.combatants.len())
            .filter(|&i| roster.combatants[i].shots_left > 0)
            .collect();
        if shooters.is_empty() {
            break;
        }
        let att = shooters[dice.pick(shooters.len())];

        let mut targets: Vec<usize> = (0..roster.combatants.len())
            .filter(|&d| {
                let defender = &roster.combatants[d];
                battle.is_hostile(roster.combatants[att].side, defender.side)
                    && is_targetable(defender, galaxy, option)
            })
            .collect();
        if targets.is_empty() {
            roster.combatants[att].shots_left = 0;
            continue;
        }

        roster.combatants[att].shots_left -= 1;
        combat_occurred = true;

        let special = battle.participants[roster.combatants[att].side].special_target();
        if let Some(class) = special {
            let preferred: Vec<usize> = targets
                .iter()
                .copied()
                .filter(|&d| roster.combatants[d].kind == class)
                .collect();
            if !preferred.is_empty() && dice.percent(SPECIAL_TARGET_BIAS) {
                targets = preferred;
            }
        }

        let def = toughest_of(dice, &targets, roster);
        let on_special = special == Some(roster.combatants[def].kind);

        if try_forced_jump(battle, galaxy, roster, dice, config, att, def) {
            continue;
        }

        let involves_transport = roster.combatants[att].kind == TargetClass::Transports
            || roster.combatants[def].kind == TargetClass::Transports;
        if involves_transport && !on_special && dice.percent(TRANSPORT_AVOIDANCE) {
            continue;
        }

        if option.is_bomb_run() {
            drop_ordnance(battle, galaxy, roster, option, att, def);
            continue;
        }

        fire(battle, galaxy, roster, dice, att, def);
    }

    for combatant in &mut roster.combatants {
        combatant.surprised = false;
    }
    combat_occurred
}

/// Sample a few candidates and keep the most dangerous
fn toughest_of<D: Dice + ?Sized>(dice: &mut D, targets: &[usize], roster: &EngagementRoster) -> usize {
    let mut best = targets[dice.pick(targets.len())];
    for _ in 1..TARGET_SAMPLES {
        let candidate = targets[dice.pick(targets.len())];
        if roster.combatants[candidate].threat() > roster.combatants[best].threat() {
            best = candidate;
        }
    }
    best
}

/// Starbase interdiction in place of a shot; true when the shot was spent on it
fn try_forced_jump<D: Dice + ?Sized>(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &EngagementRoster,
    dice: &mut D,
    config: &CombatConfig,
    att: usize,
    def: usize,
) -> bool {
    let (
        UnitRef::Ship { species: att_species, slot: att_slot },
        UnitRef::Ship { species: def_species, slot: def_slot },
    ) = (roster.combatants[att].unit, roster.combatants[def].unit)
    else {
        return false;
    };

    let attacker = galaxy.ship(att_species, att_slot);
    if !carries_jump_units(attacker) {
        return false;
    }
    let Some(device) = usable_device(attacker, galaxy.ship(def_species, def_slot)) else {
        return false;
    };

    let att_tech = galaxy.species(att_species).tech;
    if !dice.percent(attempt_chance(att_tech.gravitics, att_tech.military)) {
        return false;
    }

    let att_name = battle.unit_name(galaxy, roster.combatants[att].unit);
    let def_name = battle.unit_name(galaxy, roster.combatants[def].unit);
    let landed = resolve_jump(
        dice,
        device,
        galaxy.ship(def_species, def_slot).tonnage,
        att_tech.gravitics,
        galaxy.species(def_species).tech.gravitics,
        battle.location,
        config,
    );

    match landed {
        Some(destination) => {
            let ship = galaxy.ship_mut(def_species, def_slot);
            ship.status = ShipStatus::ForcedJump;
            ship.destination = Some(destination);
            battle.log.headline(format!(
                "{} uses a {} unit on {}, which is hurled out of the battle!",
                att_name,
                device.label(),
                def_name
            ));
        }
        None => {
            battle.log.detail(format!(
                "{} tries a {} unit on {}, but it fails.",
                att_name,
                device.label(),
                def_name
            ));
        }
    }
    true
}

/// Bomb runs only pile up effects; they are applied once the engagement ends
fn drop_ordnance(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &mut EngagementRoster,
    option: EngagementOption,
    att: usize,
    def: usize,
) {
    let attacker_unit = roster.combatants[att].unit;
    let att_name = battle.unit_name(galaxy, attacker_unit);
    let def_name = battle.unit_name(galaxy, roster.combatants[def].unit);

    match option {
        EngagementOption::Bombardment => {
            let damage = roster.combatants[att].weapon_damage;
            roster.combatants[def].bomb_damage += damage;
            battle.log.detail(format!("{} bombards {}.", att_name, def_name));
        }
        EngagementOption::GermWarfare => {
            if let UnitRef::Ship { species, slot } = attacker_unit {
                let bombs = galaxy
                    .ship_mut(species, slot)
                    .cargo
                    .remove(Item::GermWarfare, i64::MAX);
                for _ in 0..bombs {
                    roster.combatants[def].germ_bombs.push(attacker_unit);
                }
                battle
                    .log
                    .detail(format!("{} drops {} germ warfare bombs on {}.", att_name, bombs, def_name));
            }
        }
        EngagementOption::Siege => {
            let by_ship = roster.combatants[att].is_ship();
            let besiegers = &mut roster.combatants[def].besiegers;
            if by_ship && !besiegers.contains(&attacker_unit) {
                besiegers.push(attacker_unit);
            }
            battle.log.detail(format!("{} blockades {}.", att_name, def_name));
        }
        _ => {}
    }
}

/// Ordinary weapons fire
fn fire<D: Dice + ?Sized>(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    roster: &mut EngagementRoster,
    dice: &mut D,
    att: usize,
    def: usize,
) {
    let attacker = roster.combatants[att].clone();
    let defender_unit = roster.combatants[def].unit;
    let att_species = attacker.unit.species();
    let def_species = defender_unit.species();

    let attacker_age = match attacker.unit {
        UnitRef::Ship { species, slot } => Some(galaxy.ship(species, slot).age),
        UnitRef::Colony { .. } => None,
    };
    let chance = hit_chance(
        galaxy.species(att_species).tech.military,
        galaxy.species(def_species).tech.military,
        roster.combatants[def].surprised,
        battle.is_cloaked(galaxy, defender_unit),
        attacker_age,
    );

    let att_name = battle.unit_name(galaxy, attacker.unit);
    let def_name = battle.unit_name(galaxy, defender_unit);

    if !dice.percent(chance) {
        battle.log.detail(format!("{} fires on {} and misses.", att_name, def_name));
        return;
    }
    battle.log.detail(format!("{} fires on {} and hits!", att_name, def_name));

    let damage = vary(dice, attacker.weapon_damage);
    let defender = &mut roster.combatants[def];
    let absorption = absorb(
        damage,
        defender.shield_strength_left,
        defender.shield_strength,
        !defender.surprised,
    );
    defender.shield_strength_left = absorption.shield_left;
    let strength = defender.shield_strength;
    let original_pd = defender.original_pd;

    let percent = percent_decrease(absorption.net_damage, strength);
    let percent = vary(dice, percent).clamp(0, 100);

    match defender_unit {
        UnitRef::Ship { species, slot } => {
            let hijack = battle.hostility[attacker.side][roster.combatants[def].side] == Hostility::Hijack
                && matches!(
                    roster.option(),
                    EngagementOption::DeepSpaceFight | EngagementOption::PlanetAttack
                )
                && attacker.is_ship();

            let ship = galaxy.ship_mut(species, slot);
            let pre_hit_age = ship.age;
            ship.age += (percent / 2) as i32;

            if ship.is_destroyed() {
                if hijack {
                    hijack_ship(battle, galaxy, att_species, species, slot, pre_hit_age, &def_name);
                } else {
                    tracing::debug!("{} destroyed by {}", def_name, att_name);
                    battle.log.headline(format!("{} is destroyed!", def_name));
                }
            } else {
                collateral_loss(battle, galaxy, defender_unit, percent);
            }
        }
        UnitRef::Colony { species, slot } => {
            let colony = galaxy.colony_mut(species, slot);
            let lost = pd_losses(percent, original_pd, absorption.net_damage, colony.pd_units);
            colony.pd_units -= lost;
            let remaining = colony.pd_units;

            battle
                .log
                .detail(format!("{} loses {} planetary defense units.", def_name, lost));
            if remaining == 0 && lost > 0 {
                battle
                    .log
                    .headline(format!("All planetary defenses of {} are destroyed!", def_name));
            }
        }
    }
}

/// The wreck goes to the hijacker as salvage instead of being destroyed
fn hijack_ship(
    battle: &mut Battle,
    galaxy: &mut Galaxy,
    hijacker: SpeciesId,
    victim: SpeciesId,
    slot: usize,
    pre_hit_age: i32,
    name: &str,
) {
    let ship = galaxy.ship_mut(victim, slot);
    let value = ship.recycle_value_at_age(pre_hit_age);
    let ship_name = ship.name.clone();
    ship.age = DESTROYED_AGE;
    battle.hijacked.insert(UnitRef::Ship { species: victim, slot });

    galaxy.species_mut(hijacker).econ_units += value;
    battle.transactions.record(
        battle.location,
        TransactionKind::ShipHijacked { hijacker, victim, ship_name, value },
    );
    battle.log.headline(format!(
        "{} is hijacked by SP {}!",
        name,
        galaxy.species(hijacker).name
    ));
}

/// Hits that leave the hull intact still wreck part of the cargo
fn collateral_loss(battle: &mut Battle, galaxy: &mut Galaxy, unit: UnitRef, percent: i64) {
    let UnitRef::Ship { species, slot } = unit else {
        return;
    };
    let was_cloaked = battle.is_cloaked(galaxy, unit);

    let ship = galaxy.ship_mut(species, slot);
    let cargo: Vec<_> = ship.cargo.iter().filter(|(item, _)| !item.is_installed()).collect();
    let mut lost_distortion = false;
    for (item, qty) in cargo {
        let removed = ship.cargo.remove(item, qty * percent / 100);
        if item == Item::FieldDistortion && removed > 0 {
            lost_distortion = true;
        }
    }

    if lost_distortion && was_cloaked {
        battle.exposed.insert(unit);
        let name = true_name(galaxy, unit);
        battle
            .log
            .headline(format!("Damage to its field distortion units reveals {}!", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::combat::diplomacy::settle_hostilities;
    use crate::combat::options::{BattleOrders, Engagement, HostilityDecl, SpeciesOrders};
    use crate::combat::roster::build_roster;
    use crate::core::types::{Coords, TechLevels};
    use crate::galaxy::{Ship, ShipClass, Species};

    const HERE: Coords = Coords { x: 3, y: 3, z: 3 };
    const VORN: SpeciesId = SpeciesId(1);
    const KESH: SpeciesId = SpeciesId(2);

    fn galaxy_with(vorn_ship: Ship, kesh_fleet: Vec<Ship>) -> Galaxy {
        let mut galaxy = Galaxy::new();
        let mut vorn = Species::new(VORN, "Vorn", TechLevels::uniform(20));
        vorn.fleet.push(vorn_ship);
        galaxy.add_species(vorn);
        // Kesh has no military tech, so only Vorn fires
        let mut kesh = Species::new(KESH, "Kesh", TechLevels::default());
        kesh.fleet = kesh_fleet;
        galaxy.add_species(kesh);
        galaxy
    }

    fn deep_space(galaxy: &Galaxy, orders: Vec<SpeciesOrders>) -> (Battle, EngagementRoster) {
        let orders = BattleOrders { location: HERE, species: orders };
        let mut battle = Battle::assemble(galaxy, &orders, &CombatConfig::default()).unwrap();
        settle_hostilities(&mut battle, galaxy);
        let roster = build_roster(&battle, galaxy, Engagement::deep_space_fight()).unwrap();
        (battle, roster)
    }

    /// A one-shot picketboat raid on Kesh
    fn raid(kesh_fleet: Vec<Ship>, special: Option<TargetClass>) -> (Galaxy, Battle, EngagementRoster) {
        let galaxy = galaxy_with(Ship::warship("Spark", ShipClass::Picketboat, HERE), kesh_fleet);
        let mut vorn = SpeciesOrders::idle(VORN)
            .engage(Engagement::deep_space_fight())
            .declare(HostilityDecl::attack(KESH));
        vorn.special_target = special;
        let kesh = SpeciesOrders::idle(KESH).engage(Engagement::deep_space_fight());
        let (battle, roster) = deep_space(&galaxy, vec![vorn, kesh]);
        assert_eq!(roster.combatants[0].num_shots, 1);
        (galaxy, battle, roster)
    }

    fn talon() -> Ship {
        Ship::warship("Talon", ShipClass::Frigate, HERE)
    }

    fn mule() -> Ship {
        Ship::new("Mule", ShipClass::Transport, 10, HERE)
    }

    #[test]
    fn test_hit_chance_clamps() {
        assert_eq!(hit_chance(0, 20, false, false, None), 2);
        assert_eq!(hit_chance(1000, 1, false, false, None), 98);
        assert_eq!(hit_chance(0, 0, false, false, None), 2);
    }

    #[test]
    fn test_hit_chance_modifiers() {
        assert_eq!(hit_chance(20, 20, false, false, None), 75);
        assert_eq!(hit_chance(20, 20, true, false, None), 98);
        assert_eq!(hit_chance(10, 20, true, false, None), 98);
        assert_eq!(hit_chance(10, 40, false, false, None), 30);
        assert_eq!(hit_chance(10, 40, true, false, None), 60);
        assert_eq!(hit_chance(20, 20, false, true, None), 57);
        // surprise and distortion both apply before the clamp
        assert_eq!(hit_chance(20, 40, true, true, None), 75);
        assert_eq!(hit_chance(20, 20, true, true, None), 98);
        // a ship of age 25 loses half its chance
        assert_eq!(hit_chance(20, 20, false, false, Some(25)), 38);
    }

    #[test]
    fn test_absorb_overflow_and_partial() {
        // full shields swallow everything they can hold
        assert_eq!(
            absorb(2773, 2219, 2219, true),
            Absorption { net_damage: 554, shield_left: 0 }
        );
        // half charged shields take half
        assert_eq!(
            absorb(100, 500, 1000, true),
            Absorption { net_damage: 50, shield_left: 450 }
        );
        // surprised units fight with shields down
        assert_eq!(
            absorb(100, 500, 1000, false),
            Absorption { net_damage: 100, shield_left: 500 }
        );
    }

    #[test]
    fn test_percent_decrease_and_pd_losses() {
        assert_eq!(percent_decrease(554, 2219), 12);
        assert_eq!(percent_decrease(10, 0), 500);
        assert_eq!(pd_losses(10, 400, 30, 400), 40);
        assert_eq!(pd_losses(0, 400, 1, 400), 1);
        assert_eq!(pd_losses(0, 400, 0, 400), 0);
        assert_eq!(pd_losses(100, 400, 50, 7), 7);
    }

    #[test]
    fn test_vary_bounds() {
        let mut high = ScriptedDice::constant(1);
        assert_eq!(vary(&mut high, 100), 125);
        let mut low = ScriptedDice::constant(51);
        assert_eq!(vary(&mut low, 100), 75);
    }

    #[test]
    fn test_special_target_draws_fire() {
        let (mut galaxy, mut battle, mut roster) = raid(vec![talon(), mule()], Some(TargetClass::Transports));
        let config = CombatConfig::default();

        assert!(fight_round(&mut battle, &mut galaxy, &mut roster, &mut ScriptedDice::constant(1), &config));
        assert!(battle.log.contains("fires on SP Kesh TR Mule"));
        assert!(!battle.log.contains("Talon"));
    }

    #[test]
    fn test_special_target_bias_can_fail() {
        let (mut galaxy, mut battle, mut roster) = raid(vec![talon(), mule()], Some(TargetClass::Transports));
        let config = CombatConfig::default();
        // shooter pick, then a bias roll of 76 misses the 75% preference
        let mut dice = ScriptedDice::with_script([1, 76], 1);

        assert!(fight_round(&mut battle, &mut galaxy, &mut roster, &mut dice, &config));
        assert!(battle.log.contains("fires on SP Kesh FF Talon"));
        assert!(!battle.log.contains("Mule"));
    }

    #[test]
    fn test_transports_are_usually_spared() {
        let (mut galaxy, mut battle, mut roster) = raid(vec![mule()], None);
        let config = CombatConfig::default();

        // the shot is spent even though it is held back
        assert!(fight_round(&mut battle, &mut galaxy, &mut roster, &mut ScriptedDice::constant(1), &config));
        assert!(!battle.log.contains("fires on"));
        assert_eq!(galaxy.ship(KESH, 0).age, 0);
        assert_eq!(roster.combatants[0].shots_left, 0);

        // shooter pick, four target samples, then 91 beats the 90% avoidance
        let mut dice = ScriptedDice::with_script([1, 1, 1, 1, 1, 91], 1);
        assert!(fight_round(&mut battle, &mut galaxy, &mut roster, &mut dice, &config));
        assert!(battle.log.contains("fires on SP Kesh TR Mule"));
    }

    #[test]
    fn test_special_target_overrides_transport_avoidance() {
        let (mut galaxy, mut battle, mut roster) = raid(vec![mule()], Some(TargetClass::Transports));
        let config = CombatConfig::default();

        // a roll of 1 would hold the shot back if avoidance were checked
        assert!(fight_round(&mut battle, &mut galaxy, &mut roster, &mut ScriptedDice::constant(1), &config));
        assert!(battle.log.contains("fires on SP Kesh TR Mule"));
    }

    #[test]
    fn test_round_without_targets_is_quiet() {
        let (mut galaxy, mut battle, mut roster) = raid(vec![talon()], None);
        galaxy.ship_mut(KESH, 0).age = DESTROYED_AGE;

        let fought = fight_round(
            &mut battle,
            &mut galaxy,
            &mut roster,
            &mut ScriptedDice::constant(1),
            &CombatConfig::default(),
        );
        assert!(!fought);
        assert!(!battle.log.contains("fires on"));
        for combatant in &roster.combatants {
            assert_eq!(combatant.shots_left, 0);
        }
    }

    #[test]
    fn test_hit_wrecks_cargo_and_reveals_cloaked_ship() {
        let mut ghost = Ship::warship("Ghost", ShipClass::Frigate, HERE);
        ghost.cargo.set(Item::FieldDistortion, 10);
        ghost.cargo.set(Item::RawMaterial, 100);
        let mut galaxy = galaxy_with(Ship::warship("Lance", ShipClass::Frigate, HERE), vec![ghost]);

        // Vorn cannot name a cloaked species, it only fires back
        let orders = vec![
            SpeciesOrders::idle(VORN).engage(Engagement::deep_space_fight()),
            SpeciesOrders::idle(KESH)
                .engage(Engagement::deep_space_fight())
                .declare(HostilityDecl::attack(VORN)),
        ];
        let (mut battle, mut roster) = deep_space(&galaxy, orders);
        let ghost_ref = UnitRef::Ship { species: KESH, slot: 0 };
        assert!(battle.is_cloaked(&galaxy, ghost_ref));

        roster.combatants[0].num_shots = 1;
        let fought = fight_round(
            &mut battle,
            &mut galaxy,
            &mut roster,
            &mut ScriptedDice::constant(1),
            &CombatConfig::default(),
        );
        assert!(fought);

        // 2773 damage, 1188 past the shields: 37%, varied to 46%
        let ship = galaxy.ship(KESH, 0);
        assert_eq!(ship.age, 23);
        assert_eq!(ship.cargo.get(Item::FieldDistortion), 6);
        assert_eq!(ship.cargo.get(Item::RawMaterial), 54);

        assert!(battle.exposed.contains(&ghost_ref));
        assert!(!battle.is_cloaked(&galaxy, ghost_ref));
        assert_eq!(battle.unit_name(&galaxy, ghost_ref), "SP Kesh FF Ghost");
        assert!(battle.log.contains("reveals SP Kesh FF Ghost"));
    }
}
