//! Combat orders handed to the engine by the order processor

use serde::{Deserialize, Serialize};

use crate::core::types::{Coords, PlanetNumber, SpeciesId, DEEP_SPACE};

/// What a species wants to do (or defend) at a battle location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementOption {
    /// Ships defend wherever they currently are
    DefenseInPlace,
    /// All ships move to deep space to meet attackers there
    DeepSpaceDefense,
    /// All ships defend one planet
    PlanetDefense,
    /// Attack hostile ships in deep space
    DeepSpaceFight,
    /// Attack hostile ships and planetary defenses at one planet
    PlanetAttack,
    /// Bomb a hostile colony's economy
    Bombardment,
    /// Drop germ warfare bombs on a hostile colony
    GermWarfare,
    /// Blockade a hostile colony
    Siege,
}

impl EngagementOption {
    /// Options that assault a planet and need a planet attack first
    pub fn is_planet_attack_class(&self) -> bool {
        matches!(
            self,
            EngagementOption::PlanetAttack
                | EngagementOption::Bombardment
                | EngagementOption::GermWarfare
                | EngagementOption::Siege
        )
    }

    /// Options that strike a colony itself rather than fighting its defenders
    pub fn is_bomb_run(&self) -> bool {
        matches!(
            self,
            EngagementOption::Bombardment | EngagementOption::GermWarfare | EngagementOption::Siege
        )
    }

    pub fn is_defensive(&self) -> bool {
        matches!(
            self,
            EngagementOption::DefenseInPlace
                | EngagementOption::DeepSpaceDefense
                | EngagementOption::PlanetDefense
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            EngagementOption::DefenseInPlace => "defense in place",
            EngagementOption::DeepSpaceDefense => "deep space defense",
            EngagementOption::PlanetDefense => "planet defense",
            EngagementOption::DeepSpaceFight => "deep space fight",
            EngagementOption::PlanetAttack => "planet attack",
            EngagementOption::Bombardment => "bombardment",
            EngagementOption::GermWarfare => "germ warfare",
            EngagementOption::Siege => "siege",
        }
    }
}

/// One requested engagement: an option and the planet it applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Engagement {
    pub option: EngagementOption,
    #[serde(default)]
    pub planet: PlanetNumber,
}

impl Engagement {
    pub fn new(option: EngagementOption, planet: PlanetNumber) -> Self {
        Self { option, planet }
    }

    pub fn deep_space_fight() -> Self {
        Self::new(EngagementOption::DeepSpaceFight, DEEP_SPACE)
    }

    pub fn deep_space_defense() -> Self {
        Self::new(EngagementOption::DeepSpaceDefense, DEEP_SPACE)
    }

    pub fn defense_in_place() -> Self {
        Self::new(EngagementOption::DefenseInPlace, DEEP_SPACE)
    }

    pub fn planet_attack(planet: PlanetNumber) -> Self {
        Self::new(EngagementOption::PlanetAttack, planet)
    }
}

impl std::fmt::Display for Engagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.planet == DEEP_SPACE {
            write!(f, "{}", self.option.describe())
        } else {
            write!(f, "{} on planet #{}", self.option.describe(), self.planet)
        }
    }
}

/// Class of unit a species prefers to shoot at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetClass {
    Warships,
    Transports,
    Starbases,
    PlanetaryDefenses,
}

/// How one species treats another in this battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hostility {
    #[default]
    None,
    Attack,
    /// Capture and recycle ships instead of destroying them
    Hijack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostilityTarget {
    Species(SpeciesId),
    /// Every declared enemy that is present
    AllEnemies,
}

/// A raw `ATTACK`/`HIJACK` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostilityDecl {
    pub mode: Hostility,
    pub target: HostilityTarget,
}

impl HostilityDecl {
    pub fn attack(target: SpeciesId) -> Self {
        Self { mode: Hostility::Attack, target: HostilityTarget::Species(target) }
    }

    pub fn hijack(target: SpeciesId) -> Self {
        Self { mode: Hostility::Hijack, target: HostilityTarget::Species(target) }
    }

    pub fn attack_enemies() -> Self {
        Self { mode: Hostility::Attack, target: HostilityTarget::AllEnemies }
    }
}

/// Withdrawal thresholds; unset fields fall back to the config defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalOrders {
    pub warship_age: Option<i32>,
    pub transport_age: Option<i32>,
    pub fleet_percent: Option<u32>,
}

/// Everything one species ordered for one battle location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesOrders {
    pub species: SpeciesId,
    #[serde(default)]
    pub engagements: Vec<Engagement>,
    #[serde(default)]
    pub hostilities: Vec<HostilityDecl>,
    #[serde(default)]
    pub special_target: Option<TargetClass>,
    #[serde(default)]
    pub withdrawal: WithdrawalOrders,
    #[serde(default)]
    pub haven: Option<Coords>,
    #[serde(default)]
    pub ambush_funds: i64,
}

impl SpeciesOrders {
    /// A species present with no orders at all
    pub fn idle(species: SpeciesId) -> Self {
        Self {
            species,
            engagements: Vec::new(),
            hostilities: Vec::new(),
            special_target: None,
            withdrawal: WithdrawalOrders::default(),
            haven: None,
            ambush_funds: 0,
        }
    }

    pub fn engage(mut self, engagement: Engagement) -> Self {
        self.engagements.push(engagement);
        self
    }

    pub fn declare(mut self, decl: HostilityDecl) -> Self {
        self.hostilities.push(decl);
        self
    }
}

/// Orders for one battle location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleOrders {
    pub location: Coords,
    pub species: Vec<SpeciesOrders>,
}

/// Consolidate every species' requests into one ordered, de-duplicated queue
///
/// A deep space fight is queued ahead of any deep space defense, and a
/// planet attack ahead of any bombardment, germ warfare or siege on the
/// same planet. Species with no colony in the system (`outsiders`) must
/// also win a deep space fight before they can assault a planet.
pub fn build_engagement_queue<'a>(
    requests: impl IntoIterator<Item = (&'a [Engagement], bool)>,
) -> Vec<Engagement> {
    fn push(queue: &mut Vec<Engagement>, engagement: Engagement) {
        if !queue.contains(&engagement) {
            queue.push(engagement);
        }
    }

    let mut queue: Vec<Engagement> = Vec::new();

    for (engagements, outsider) in requests {
        for &engagement in engagements {
            match engagement.option {
                EngagementOption::DeepSpaceDefense => {
                    push(&mut queue, Engagement::deep_space_fight());
                }
                EngagementOption::PlanetAttack if outsider => {
                    push(&mut queue, Engagement::deep_space_fight());
                }
                EngagementOption::Bombardment
                | EngagementOption::GermWarfare
                | EngagementOption::Siege => {
                    if outsider {
                        push(&mut queue, Engagement::deep_space_fight());
                    }
                    push(&mut queue, Engagement::planet_attack(engagement.planet));
                }
                _ => {}
            }
            push(&mut queue, engagement);
        }
    }

    queue
}
