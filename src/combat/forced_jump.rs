//! Forced jumps: starbase interdiction that throws an enemy ship out of the battle

use crate::combat::dice::Dice;
use crate::core::config::CombatConfig;
use crate::core::types::Coords;
use crate::galaxy::{Item, Ship};

/// Jump device a starbase brings to bear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpDevice {
    /// Sends the target a short distance from the battle
    Directed { units: i64 },
    /// Sends the target anywhere in the galaxy
    Misjump { units: i64 },
}

impl JumpDevice {
    pub fn units(&self) -> i64 {
        match self {
            JumpDevice::Directed { units } | JumpDevice::Misjump { units } => *units,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JumpDevice::Directed { .. } => "forced jump",
            JumpDevice::Misjump { .. } => "forced misjump",
        }
    }
}

/// Attacker carries jump units at all
pub fn carries_jump_units(ship: &Ship) -> bool {
    ship.cargo.get(Item::ForcedJump) > 0 || ship.cargo.get(Item::ForcedMisjump) > 0
}

/// Device the attacker can use on this defender, if any
///
/// Only starbases jump, only non-starbases get jumped, and the device needs
/// at least one unit per ton of target. Directed units are preferred.
pub fn usable_device(attacker: &Ship, defender: &Ship) -> Option<JumpDevice> {
    if !attacker.class.is_starbase() || defender.class.is_starbase() {
        return None;
    }
    let directed = attacker.cargo.get(Item::ForcedJump);
    let misjump = attacker.cargo.get(Item::ForcedMisjump);

    if directed > 0 && directed >= defender.tonnage {
        Some(JumpDevice::Directed { units: directed })
    } else if misjump > 0 && misjump >= defender.tonnage {
        Some(JumpDevice::Misjump { units: misjump })
    } else {
        None
    }
}

/// Percent chance that the jump works
pub fn jump_chance(units: i64, tonnage: i64, attacker_gv: i64, defender_gv: i64) -> i64 {
    2 * ((units - tonnage) + (attacker_gv - defender_gv))
}

/// Percent chance that an armed starbase tries a jump instead of firing
pub fn attempt_chance(attacker_gv: i64, attacker_ml: i64) -> i64 {
    let total = attacker_gv + attacker_ml;
    if total <= 0 {
        0
    } else {
        100 * attacker_gv / total
    }
}

/// Roll a jump; on success returns where the defender lands
pub fn resolve_jump<D: Dice + ?Sized>(
    dice: &mut D,
    device: JumpDevice,
    defender_tonnage: i64,
    attacker_gv: i64,
    defender_gv: i64,
    location: Coords,
    config: &CombatConfig,
) -> Option<Coords> {
    let chance = jump_chance(device.units(), defender_tonnage, attacker_gv, defender_gv);
    if !dice.percent(chance) {
        return None;
    }

    let destination = match device {
        JumpDevice::Misjump { .. } => {
            let radius = config.galaxy_radius.max(0) as u32;
            let mut axis = || dice.rnd(radius + 1) as i32 - 1;
            Coords::new(axis(), axis(), axis())
        }
        JumpDevice::Directed { .. } => {
            let scatter = config.forced_jump_scatter.max(0);
            let span = (2 * scatter + 1) as u32;
            let mut shift = |at: i32| (at + dice.rnd(span) as i32 - 1 - scatter).max(0);
            Coords::new(shift(location.x), shift(location.y), shift(location.z))
        }
    };
    Some(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::galaxy::ShipClass;

    fn starbase(fj: i64, fm: i64) -> Ship {
        let mut ship = Ship::new("Gate", ShipClass::Starbase, 40, Coords::new(5, 5, 5));
        ship.cargo.set(Item::ForcedJump, fj);
        ship.cargo.set(Item::ForcedMisjump, fm);
        ship
    }

    #[test]
    fn test_chance_example() {
        assert_eq!(jump_chance(12, 10, 5, 3), 8);

        let config = CombatConfig::default();
        let here = Coords::new(5, 5, 5);
        let device = JumpDevice::Directed { units: 12 };

        let mut lucky = ScriptedDice::with_script([5], 3);
        assert_eq!(
            resolve_jump(&mut lucky, device, 10, 5, 3, here, &config),
            Some(Coords::new(5, 5, 5))
        );

        let mut unlucky = ScriptedDice::with_script([9], 3);
        assert_eq!(resolve_jump(&mut unlucky, device, 10, 5, 3, here, &config), None);
    }

    #[test]
    fn test_device_eligibility() {
        let target = Ship::warship("Prey", ShipClass::Frigate, Coords::new(5, 5, 5));

        assert_eq!(usable_device(&starbase(12, 0), &target), Some(JumpDevice::Directed { units: 12 }));
        assert_eq!(usable_device(&starbase(4, 20), &target), Some(JumpDevice::Misjump { units: 20 }));
        assert_eq!(usable_device(&starbase(4, 4), &target), None);
        assert_eq!(usable_device(&starbase(12, 0), &starbase(0, 0)), None);

        let mut warship = starbase(12, 0);
        warship.class = ShipClass::Battleship;
        assert_eq!(usable_device(&warship, &target), None);
    }

    #[test]
    fn test_directed_jump_floors_at_zero() {
        let config = CombatConfig::default();
        let mut dice = ScriptedDice::with_script([1, 1, 1, 5], 1);
        let landed = resolve_jump(
            &mut dice,
            JumpDevice::Directed { units: 100 },
            10,
            0,
            0,
            Coords::new(1, 0, 9),
            &config,
        );
        // offsets of -2, -2, +2
        assert_eq!(landed, Some(Coords::new(0, 0, 11)));
    }

    #[test]
    fn test_misjump_stays_inside_galaxy() {
        let config = CombatConfig { galaxy_radius: 6, ..CombatConfig::default() };
        let mut dice = ScriptedDice::with_script([1, 1, 7, 4], 1);
        let landed = resolve_jump(
            &mut dice,
            JumpDevice::Misjump { units: 100 },
            10,
            0,
            0,
            Coords::new(3, 3, 3),
            &config,
        );
        assert_eq!(landed, Some(Coords::new(0, 6, 3)));
    }

    #[test]
    fn test_attempt_chance() {
        assert_eq!(attempt_chance(10, 30), 25);
        assert_eq!(attempt_chance(0, 0), 0);
        assert!(carries_jump_units(&starbase(0, 1)));
        assert!(!carries_jump_units(&starbase(0, 0)));
    }
}
