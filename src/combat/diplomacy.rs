//! Who fights whom
//!
//! Turns raw hostility declarations into the battle's hostility matrix,
//! spots betrayals, decides who can be caught by surprise and finally makes
//! hostility mutual.

use crate::combat::battle::{Battle, Betrayal, SurpriseState};
use crate::combat::options::{Hostility, HostilityTarget};
use crate::core::types::SpeciesId;
use crate::galaxy::Galaxy;

/// Fill the hostility matrix from every participant's declarations
///
/// Cloaked species cannot be named, so declarations never reach them
/// directly. The strongest declaration wins (hijack over attack).
pub fn normalize_hostilities(battle: &mut Battle, galaxy: &Galaxy) {
    let n = battle.participants.len();

    for a in 0..n {
        let species = galaxy.species(battle.participants[a].species);
        let decls = battle.participants[a].orders.hostilities.clone();

        for decl in decls {
            let targets: Vec<usize> = match decl.target {
                HostilityTarget::Species(id) => battle.index_of(id).into_iter().collect(),
                HostilityTarget::AllEnemies => (0..n)
                    .filter(|&b| species.is_enemy(battle.participants[b].species))
                    .collect(),
            };

            for b in targets {
                if b == a || battle.participants[b].distorted {
                    continue;
                }
                battle.hostility[a][b] = battle.hostility[a][b].max(decl.mode);
            }
            if decl.mode == Hostility::Hijack {
                battle.participants[a].hijacker = true;
            }
        }
    }
}

/// Record every hostile pair that breaks an alliance
///
/// A attacking B is a betrayal when A lists B as an ally, or when a third
/// species is allied with and in contact with both of them.
pub fn detect_betrayals(battle: &mut Battle, galaxy: &Galaxy) {
    let n = battle.participants.len();

    for a in 0..n {
        for b in 0..n {
            if !battle.is_hostile(a, b) {
                continue;
            }
            let betrayer = battle.participants[a].species;
            let victim = battle.participants[b].species;

            let witnesses: Vec<SpeciesId> = galaxy
                .species
                .values()
                .filter(|c| c.id != betrayer && c.id != victim)
                .filter(|c| {
                    c.is_ally(betrayer)
                        && c.in_contact(betrayer)
                        && c.is_ally(victim)
                        && c.in_contact(victim)
                })
                .map(|c| c.id)
                .collect();

            if galaxy.species(betrayer).is_ally(victim) || !witnesses.is_empty() {
                tracing::info!("SP {} betrays SP {} at {}", betrayer, victim, battle.location);
                battle.log.headline(format!(
                    "SP {} attacks its ally SP {}!",
                    galaxy.species(betrayer).name,
                    galaxy.species(victim).name
                ));
                battle.betrayals.push(Betrayal { betrayer, victim, witnesses });
            }
        }
    }
}

/// Make every betrayal permanent
///
/// Betrayer and victim become declared enemies, and every common ally that
/// saw it turns on the betrayer.
pub fn apply_escalations(galaxy: &mut Galaxy, betrayals: &[Betrayal]) {
    for betrayal in betrayals {
        if let Ok(betrayer) = galaxy.get_mut(betrayal.betrayer) {
            betrayer.declare_enemy(betrayal.victim);
        }
        if let Ok(victim) = galaxy.get_mut(betrayal.victim) {
            victim.declare_enemy(betrayal.betrayer);
        }
        for &witness in &betrayal.witnesses {
            if let Ok(witness) = galaxy.get_mut(witness) {
                witness.declare_enemy(betrayal.betrayer);
            }
        }
    }
}

/// Decide which participants can be caught with their shields down
///
/// Must run before [`enforce_reciprocity`], while the matrix still holds
/// only declared attacks.
pub fn determine_surprise(battle: &mut Battle, galaxy: &Galaxy) {
    let n = battle.participants.len();

    for b in 0..n {
        let state = if battle.participants[b].issued_orders {
            SurpriseState::NotEligible
        } else {
            let victim = galaxy.species(battle.participants[b].species);
            let attackers: Vec<usize> = (0..n).filter(|&a| battle.is_hostile(a, b)).collect();

            if attackers.is_empty() {
                SurpriseState::Unmobilized
            } else if attackers.iter().all(|&a| {
                battle.participants[a].distorted
                    || victim.is_ally(battle.participants[a].species)
            }) {
                SurpriseState::Eligible
            } else {
                SurpriseState::NotEligible
            }
        };
        battle.participants[b].surprise = state;
    }
}

/// Anyone attacked fights back
pub fn enforce_reciprocity(battle: &mut Battle) {
    let n = battle.participants.len();
    for a in 0..n {
        for b in 0..n {
            if a != b
                && battle.hostility[a][b] != Hostility::None
                && battle.hostility[b][a] == Hostility::None
            {
                battle.hostility[b][a] = Hostility::Attack;
            }
        }
    }
}

/// Run the whole diplomacy pass in order
pub fn settle_hostilities(battle: &mut Battle, galaxy: &Galaxy) {
    normalize_hostilities(battle, galaxy);
    detect_betrayals(battle, galaxy);
    determine_surprise(battle, galaxy);
    enforce_reciprocity(battle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::options::{BattleOrders, Engagement, HostilityDecl, SpeciesOrders};
    use crate::core::config::CombatConfig;
    use crate::core::types::{Coords, TechLevels};
    use crate::galaxy::{Item, Ship, ShipClass, Species};

    const HERE: Coords = Coords { x: 4, y: 4, z: 4 };

    fn galaxy(ids: &[u16]) -> Galaxy {
        let mut galaxy = Galaxy::new();
        for &id in ids {
            let mut species = Species::new(SpeciesId(id), format!("S{}", id), TechLevels::uniform(10));
            species.fleet.push(Ship::warship("Hull", ShipClass::Frigate, HERE));
            galaxy.add_species(species);
        }
        galaxy
    }

    fn battle(galaxy: &Galaxy, orders: Vec<SpeciesOrders>) -> Battle {
        let orders = BattleOrders { location: HERE, species: orders };
        Battle::assemble(galaxy, &orders, &CombatConfig::default()).unwrap()
    }

    #[test]
    fn test_hijack_beats_attack() {
        let galaxy = galaxy(&[1, 2]);
        let orders = SpeciesOrders::idle(SpeciesId(1))
            .declare(HostilityDecl::attack(SpeciesId(2)))
            .declare(HostilityDecl::hijack(SpeciesId(2)));
        let mut battle = battle(&galaxy, vec![orders]);

        normalize_hostilities(&mut battle, &galaxy);
        assert_eq!(battle.hostility[0][1], Hostility::Hijack);
        assert!(battle.participants[0].hijacker);
    }

    #[test]
    fn test_all_enemies_skips_cloaked_species() {
        let mut galaxy = galaxy(&[1, 2, 3]);
        galaxy.species_mut(SpeciesId(1)).enemies.extend([SpeciesId(2), SpeciesId(3)]);
        galaxy.ship_mut(SpeciesId(3), 0).cargo.set(Item::FieldDistortion, 10);

        let orders = SpeciesOrders::idle(SpeciesId(1)).declare(HostilityDecl::attack_enemies());
        let mut battle = battle(&galaxy, vec![orders]);
        normalize_hostilities(&mut battle, &galaxy);

        assert_eq!(battle.hostility[0][1], Hostility::Attack);
        assert_eq!(battle.hostility[0][2], Hostility::None);
    }

    #[test]
    fn test_reciprocity_keeps_hijack() {
        let galaxy = galaxy(&[1, 2]);
        let mut battle = battle(&galaxy, vec![]);
        battle.hostility[0][1] = Hostility::Hijack;
        battle.hostility[1][0] = Hostility::Hijack;
        enforce_reciprocity(&mut battle);
        assert_eq!(battle.hostility[1][0], Hostility::Hijack);

        battle.hostility[1][0] = Hostility::None;
        enforce_reciprocity(&mut battle);
        assert_eq!(battle.hostility[1][0], Hostility::Attack);
    }

    #[test]
    fn test_betrayal_through_common_ally() {
        let mut galaxy = galaxy(&[1, 2, 3]);
        {
            let witness = galaxy.species_mut(SpeciesId(3));
            witness.allies.extend([SpeciesId(1), SpeciesId(2)]);
            witness.contacts.extend([SpeciesId(1), SpeciesId(2)]);
        }
        let orders = SpeciesOrders::idle(SpeciesId(1))
            .engage(Engagement::deep_space_fight())
            .declare(HostilityDecl::attack(SpeciesId(2)));
        let mut battle = battle(&galaxy, vec![orders]);

        settle_hostilities(&mut battle, &galaxy);
        assert_eq!(
            battle.betrayals,
            vec![Betrayal {
                betrayer: SpeciesId(1),
                victim: SpeciesId(2),
                witnesses: vec![SpeciesId(3)],
            }]
        );

        apply_escalations(&mut galaxy, &battle.betrayals);
        assert!(galaxy.species(SpeciesId(1)).is_enemy(SpeciesId(2)));
        assert!(galaxy.species(SpeciesId(2)).is_enemy(SpeciesId(1)));

        // the common ally turns on the betrayer but keeps faith with the victim
        let witness = galaxy.species(SpeciesId(3));
        assert!(witness.is_enemy(SpeciesId(1)));
        assert!(!witness.is_ally(SpeciesId(1)));
        assert!(witness.is_ally(SpeciesId(2)));
        assert!(!witness.is_enemy(SpeciesId(2)));
    }

    #[test]
    fn test_every_common_ally_witnesses() {
        let mut galaxy = galaxy(&[1, 2, 3, 4]);
        for id in [3, 4] {
            let witness = galaxy.species_mut(SpeciesId(id));
            witness.allies.extend([SpeciesId(1), SpeciesId(2)]);
            witness.contacts.extend([SpeciesId(1), SpeciesId(2)]);
        }
        let orders = SpeciesOrders::idle(SpeciesId(1)).declare(HostilityDecl::attack(SpeciesId(2)));
        let mut battle = battle(&galaxy, vec![orders]);

        settle_hostilities(&mut battle, &galaxy);
        assert_eq!(battle.betrayals[0].witnesses, vec![SpeciesId(3), SpeciesId(4)]);

        apply_escalations(&mut galaxy, &battle.betrayals);
        assert!(galaxy.species(SpeciesId(3)).is_enemy(SpeciesId(1)));
        assert!(galaxy.species(SpeciesId(4)).is_enemy(SpeciesId(1)));
    }

    #[test]
    fn test_direct_ally_attack_is_betrayal() {
        let mut galaxy = galaxy(&[1, 2]);
        galaxy.species_mut(SpeciesId(1)).allies.insert(SpeciesId(2));
        let orders = SpeciesOrders::idle(SpeciesId(1)).declare(HostilityDecl::attack(SpeciesId(2)));
        let mut battle = battle(&galaxy, vec![orders]);

        settle_hostilities(&mut battle, &galaxy);
        assert_eq!(battle.betrayals.len(), 1);
        assert!(battle.betrayals[0].witnesses.is_empty());
    }

    #[test]
    fn test_surprise_states() {
        let mut galaxy = galaxy(&[1, 2, 3, 4]);
        // 2 trusts 1, so an attack from 1 catches it off guard
        galaxy.species_mut(SpeciesId(2)).allies.insert(SpeciesId(1));

        let orders = vec![
            SpeciesOrders::idle(SpeciesId(1))
                .engage(Engagement::deep_space_fight())
                .declare(HostilityDecl::attack(SpeciesId(2)))
                .declare(HostilityDecl::attack(SpeciesId(3))),
        ];
        let mut battle = battle(&galaxy, orders);
        settle_hostilities(&mut battle, &galaxy);

        let state = |id: u16| battle.participants[battle.index_of(SpeciesId(id)).unwrap()].surprise;
        assert_eq!(state(1), SurpriseState::NotEligible);
        assert_eq!(state(2), SurpriseState::Eligible);
        assert_eq!(state(3), SurpriseState::NotEligible);
        assert_eq!(state(4), SurpriseState::Unmobilized);
    }
}
