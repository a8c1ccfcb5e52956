//! Combatant roster for one sub-engagement
//!
//! A roster is rebuilt for every queued engagement and thrown away when it
//! finishes. Only shield levels survive, through the battle context.

use crate::combat::battle::{is_present, Battle};
use crate::combat::options::{Engagement, EngagementOption, TargetClass};
use crate::combat::power::power;
use crate::core::types::{TechLevels, DEEP_SPACE};
use crate::galaxy::ship::STRIKE_CRUISER_TONNAGE;
use crate::galaxy::{Colony, Galaxy, Item, Ship, ShipClass, ShipStatus, UnitRef};

/// Most shots any unit fires per round
pub const MAX_SHOTS: i64 = 5;

/// Offense needed for each extra shot
const OFFENSE_PER_SHOT: i64 = 1500;

/// One unit taking part in a sub-engagement
#[derive(Debug, Clone)]
pub struct Combatant {
    pub unit: UnitRef,
    /// Index of the owning participant in the battle
    pub side: usize,
    pub kind: TargetClass,
    /// Belongs to a species that requested this engagement
    pub attacking: bool,
    pub num_shots: i64,
    pub shots_left: i64,
    pub weapon_damage: i64,
    pub shield_strength: i64,
    pub shield_strength_left: i64,
    /// PD count when the engagement started (colonies only)
    pub original_pd: i64,
    /// Cannot fire at all: no weapons, or a colony without defenses
    pub non_combatant: bool,
    /// Caught with shields down for this round
    pub surprised: bool,
    /// Bombardment damage dropped on this colony so far
    pub bomb_damage: i64,
    /// One entry per germ warfare bomb dropped on this colony, by dropping ship
    pub germ_bombs: Vec<UnitRef>,
    /// Ships that took part in besieging this colony
    pub besiegers: Vec<UnitRef>,
}

impl Combatant {
    pub fn is_ship(&self) -> bool {
        matches!(self.unit, UnitRef::Ship { .. })
    }

    pub fn is_colony(&self) -> bool {
        matches!(self.unit, UnitRef::Colony { .. })
    }

    /// Firepower used to rank targets
    pub fn threat(&self) -> i64 {
        self.num_shots * self.weapon_damage
    }
}

#[derive(Debug, Clone)]
pub struct EngagementRoster {
    pub engagement: Engagement,
    pub combatants: Vec<Combatant>,
}

impl EngagementRoster {
    pub fn option(&self) -> EngagementOption {
        self.engagement.option
    }

    pub fn find(&self, unit: UnitRef) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.unit == unit)
    }
}

/// Offense and defense of a unit before shots are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPower {
    pub offense: i64,
    pub defense: i64,
}

pub fn ship_power(ship: &Ship, tech: &TechLevels, hijacker: bool) -> UnitPower {
    let mut offense = power(ship.tonnage);
    let mut defense = offense;

    if ship.class.is_transport() {
        offense /= 10;
        defense /= 10;
    } else if !ship.class.is_starbase() {
        for (item, qty) in ship.cargo.iter() {
            match item {
                Item::AuxGun(mark) => offense += qty * power(5 * i64::from(mark)),
                Item::AuxShield(mark) => defense += qty * power(5 * i64::from(mark)),
                _ => {}
            }
        }
    }

    let age = i64::from(ship.age.max(0));
    offense -= age * offense / 50;
    defense -= age * defense / 50;

    finish_power(offense, defense, tech, hijacker)
}

/// Planetary defenses fight like a hull of `pd / 200` tons that never ages
pub fn colony_power(colony: &Colony, tech: &TechLevels, hijacker: bool) -> UnitPower {
    let tons = match colony.pd_units {
        pd if pd <= 0 => 0,
        pd => (pd / 200).max(1),
    };
    let offense = power(tons);
    finish_power(offense, offense, tech, hijacker)
}

fn finish_power(mut offense: i64, mut defense: i64, tech: &TechLevels, hijacker: bool) -> UnitPower {
    offense += tech.military * offense / 50;
    defense += tech.life_support * defense / 50;

    // Hijackers hold their fire to keep the prize intact
    if hijacker {
        offense /= 4;
        defense /= 4;
    }

    UnitPower { offense, defense }
}

/// Shots per round for the given offense
pub fn shots_for(offense: i64, military: i64) -> i64 {
    if military <= 0 || offense <= 0 {
        return 0;
    }
    (offense / OFFENSE_PER_SHOT + 1).min(MAX_SHOTS)
}

/// Damage of a single shot
pub fn damage_per_shot(offense: i64, shots: i64) -> i64 {
    if shots <= 0 {
        0
    } else {
        2 * offense / shots
    }
}

/// Firepower of one shot-round of a strike cruiser at military tech 50
pub fn reference_cruiser_output() -> i64 {
    let cruiser = Ship::new(
        "reference",
        ShipClass::StrikeCruiser,
        STRIKE_CRUISER_TONNAGE,
        Default::default(),
    );
    let tech = TechLevels { military: 50, ..TechLevels::default() };
    let offense = ship_power(&cruiser, &tech, false).offense;
    let shots = shots_for(offense, tech.military);
    shots * damage_per_shot(offense, shots)
}

/// Ship may be put on a roster
fn is_eligible(battle: &Battle, galaxy: &Galaxy, side: usize, ship: &Ship) -> bool {
    let species = galaxy.species(battle.species_at(side));
    ship.location == battle.location
        && is_present(ship)
        && !ship.is_destroyed()
        && !species.has_disbanded_colony_at(battle.location, ship.planet)
}

/// Combatant can still be shot at in this engagement
pub fn is_targetable(combatant: &Combatant, galaxy: &Galaxy, option: EngagementOption) -> bool {
    match combatant.unit {
        UnitRef::Ship { species, slot } => {
            if option.is_bomb_run() {
                return false;
            }
            let ship = galaxy.ship(species, slot);
            !ship.is_destroyed() && !ship.status.has_left_battle()
        }
        UnitRef::Colony { species, slot } => {
            option.is_bomb_run() || galaxy.colony(species, slot).pd_units > 0
        }
    }
}

fn ship_kind(class: ShipClass) -> TargetClass {
    if class.is_transport() {
        TargetClass::Transports
    } else if class.is_starbase() {
        TargetClass::Starbases
    } else {
        TargetClass::Warships
    }
}

/// Which of a participant's ships join a deep space fight, and whether it attacks
fn deep_space_role(battle: &Battle, side: usize) -> Option<(bool, ShipFilter)> {
    let participant = &battle.participants[side];
    let engagements = participant.engagements();

    let outsider_assault = !participant.has_colony
        && engagements.iter().any(|e| e.option.is_planet_attack_class());

    if participant.requested_option(EngagementOption::DeepSpaceFight) || outsider_assault {
        Some((true, ShipFilter::All))
    } else if participant.requested_option(EngagementOption::DeepSpaceDefense) {
        Some((false, ShipFilter::All))
    } else if participant.requested_option(EngagementOption::DefenseInPlace) {
        Some((false, ShipFilter::InDeepSpace))
    } else {
        None
    }
}

/// Role of a participant at a planet engagement
fn planet_role(battle: &Battle, side: usize, engagement: Engagement) -> Option<(bool, ShipFilter)> {
    let participant = &battle.participants[side];
    let planet = engagement.planet;

    let attacking = if engagement.option == EngagementOption::PlanetAttack {
        participant
            .engagements()
            .iter()
            .any(|e| e.planet == planet && e.option.is_planet_attack_class())
    } else {
        participant.requested(engagement)
    };

    if attacking {
        Some((true, ShipFilter::All))
    } else if engagement.option.is_bomb_run() {
        // Only the colony itself is exposed to a bomb run
        Some((false, ShipFilter::None))
    } else if participant.requested_at(EngagementOption::PlanetDefense, planet) {
        Some((false, ShipFilter::All))
    } else if participant.requested_option(EngagementOption::DefenseInPlace) {
        Some((false, ShipFilter::AtPlanet(planet)))
    } else {
        Some((false, ShipFilter::None))
    }
}

#[derive(Debug, Clone, Copy)]
enum ShipFilter {
    All,
    InDeepSpace,
    AtPlanet(u8),
    None,
}

impl ShipFilter {
    fn admits(&self, ship: &Ship) -> bool {
        match self {
            ShipFilter::All => true,
            ShipFilter::InDeepSpace => ship.status == ShipStatus::InDeepSpace,
            ShipFilter::AtPlanet(planet) => {
                ship.planet == *planet
                    && matches!(ship.status, ShipStatus::InOrbit | ShipStatus::OnSurface)
            }
            ShipFilter::None => false,
        }
    }
}

/// Assemble the units fighting one engagement
///
/// Returns `None` when nobody would actually fight: defensive options,
/// too few units present, or no hostile pair among them.
pub fn build_roster(battle: &Battle, galaxy: &Galaxy, engagement: Engagement) -> Option<EngagementRoster> {
    let option = engagement.option;
    if option.is_defensive() {
        return None;
    }

    let mut combatants = Vec::new();

    for (side, participant) in battle.participants.iter().enumerate() {
        let role = if engagement.planet == DEEP_SPACE {
            deep_space_role(battle, side)
        } else {
            planet_role(battle, side, engagement)
        };
        let Some((attacking, filter)) = role else {
            continue;
        };

        let species = galaxy.species(participant.species);
        let tech = &species.tech;

        for &slot in &participant.ship_slots {
            let ship = &species.fleet[slot];
            if !filter.admits(ship) || !is_eligible(battle, galaxy, side, ship) {
                continue;
            }
            let unit = UnitRef::Ship { species: species.id, slot };
            let strength = ship_power(ship, tech, participant.hijacker);
            let shots = shots_for(strength.offense, tech.military);

            let num_shots = match option {
                EngagementOption::GermWarfare if attacking => {
                    i64::from(ship.cargo.get(Item::GermWarfare) > 0)
                }
                _ if option.is_bomb_run() && !attacking => 0,
                _ => shots,
            };

            combatants.push(Combatant {
                unit,
                side,
                kind: ship_kind(ship.class),
                attacking,
                num_shots,
                shots_left: num_shots,
                weapon_damage: damage_per_shot(strength.offense, shots),
                shield_strength: strength.defense,
                shield_strength_left: strength.defense * battle.shield_percent(unit) / 100,
                original_pd: 0,
                non_combatant: shots == 0,
                surprised: false,
                bomb_damage: 0,
                germ_bombs: Vec::new(),
                besiegers: Vec::new(),
            });
        }

        if engagement.planet == DEEP_SPACE {
            continue;
        }
        for &slot in &participant.colony_slots {
            let colony = &species.colonies[slot];
            if colony.planet != engagement.planet {
                continue;
            }
            let unit = UnitRef::Colony { species: species.id, slot };
            let strength = colony_power(colony, tech, participant.hijacker);
            let shots = if option.is_bomb_run() {
                0
            } else {
                shots_for(strength.offense, tech.military)
            };

            combatants.push(Combatant {
                unit,
                side,
                kind: TargetClass::PlanetaryDefenses,
                attacking,
                num_shots: shots,
                shots_left: shots,
                weapon_damage: damage_per_shot(strength.offense, shots),
                shield_strength: strength.defense,
                shield_strength_left: strength.defense * battle.shield_percent(unit) / 100,
                original_pd: colony.pd_units,
                non_combatant: colony.pd_units == 0,
                surprised: false,
                bomb_damage: 0,
                germ_bombs: Vec::new(),
                besiegers: Vec::new(),
            });
        }
    }

    let roster = EngagementRoster { engagement, combatants };
    if has_minimum_presence(&roster) && has_hostile_pair(battle, galaxy, &roster) {
        Some(roster)
    } else {
        None
    }
}

fn has_minimum_presence(roster: &EngagementRoster) -> bool {
    let attacking_ships = roster.combatants.iter().any(|c| c.attacking && c.is_ship());
    match roster.option() {
        EngagementOption::DeepSpaceFight => roster.combatants.iter().any(|c| c.attacking),
        EngagementOption::PlanetAttack | EngagementOption::Bombardment => {
            attacking_ships
                || roster.combatants.iter().any(|c| c.is_colony() && c.original_pd > 0)
        }
        EngagementOption::GermWarfare | EngagementOption::Siege => attacking_ships,
        _ => false,
    }
}

/// Some attacker has a hostile, targetable unit to shoot at
fn has_hostile_pair(battle: &Battle, galaxy: &Galaxy, roster: &EngagementRoster) -> bool {
    let option = roster.option();
    roster.combatants.iter().filter(|a| a.attacking).any(|a| {
        roster.combatants.iter().any(|d| {
            battle.is_mutually_hostile(a.side, d.side) && is_targetable(d, galaxy, option)
        })
    })
}
