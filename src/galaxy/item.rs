//! Items carried by ships and stored on colonies

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Item {
    RawMaterial,
    PlanetaryDefense,
    Colonists,
    MiningUnits,
    ManufacturingUnits,
    FieldDistortion,
    ForcedJump,
    ForcedMisjump,
    GermWarfare,
    /// Auxiliary shield generator, mark 1..=9
    AuxShield(u8),
    /// Auxiliary gun, mark 1..=9
    AuxGun(u8),
}

impl Item {
    /// Construction cost of one unit
    pub fn unit_cost(&self) -> i64 {
        match self {
            Item::RawMaterial
            | Item::PlanetaryDefense
            | Item::Colonists
            | Item::MiningUnits
            | Item::ManufacturingUnits => 1,
            Item::FieldDistortion => 50,
            Item::ForcedMisjump => 100,
            Item::ForcedJump => 125,
            Item::GermWarfare => 1000,
            Item::AuxShield(mark) | Item::AuxGun(mark) => 250 * i64::from(*mark),
        }
    }

    /// Installed equipment is part of the hull and never lost as cargo
    pub fn is_installed(&self) -> bool {
        matches!(self, Item::AuxShield(_) | Item::AuxGun(_))
    }

    pub fn abbr(&self) -> String {
        match self {
            Item::RawMaterial => "RM".into(),
            Item::PlanetaryDefense => "PD".into(),
            Item::Colonists => "CU".into(),
            Item::MiningUnits => "IU".into(),
            Item::ManufacturingUnits => "AU".into(),
            Item::FieldDistortion => "FD".into(),
            Item::ForcedJump => "FJ".into(),
            Item::ForcedMisjump => "FM".into(),
            Item::GermWarfare => "GW".into(),
            Item::AuxShield(mark) => format!("SG{}", mark),
            Item::AuxGun(mark) => format!("GU{}", mark),
        }
    }
}

/// Item quantities, serialized as `[item, quantity]` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Item, i64)>", into = "Vec<(Item, i64)>")]
pub struct Inventory {
    items: BTreeMap<Item, i64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: Item) -> i64 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn set(&mut self, item: Item, quantity: i64) {
        if quantity > 0 {
            self.items.insert(item, quantity);
        } else {
            self.items.remove(&item);
        }
    }

    pub fn add(&mut self, item: Item, quantity: i64) {
        self.set(item, self.get(item) + quantity);
    }

    /// Remove up to `quantity`, returns the amount actually removed
    pub fn remove(&mut self, item: Item, quantity: i64) -> i64 {
        let current = self.get(item);
        let removed = quantity.clamp(0, current);
        self.set(item, current - removed);
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, i64)> + '_ {
        self.items.iter().map(|(item, qty)| (*item, *qty))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<(Item, i64)>> for Inventory {
    fn from(pairs: Vec<(Item, i64)>) -> Self {
        let mut inventory = Inventory::new();
        for (item, qty) in pairs {
            inventory.add(item, qty);
        }
        inventory
    }
}

impl From<Inventory> for Vec<(Item, i64)> {
    fn from(inventory: Inventory) -> Self {
        inventory.items.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_is_bounded() {
        let mut inv = Inventory::from(vec![(Item::GermWarfare, 3)]);
        assert_eq!(inv.remove(Item::GermWarfare, 5), 3);
        assert_eq!(inv.get(Item::GermWarfare), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_aux_costs_scale_with_mark() {
        assert_eq!(Item::AuxGun(1).unit_cost(), 250);
        assert_eq!(Item::AuxShield(4).unit_cost(), 1000);
        assert!(Item::AuxGun(2).is_installed());
        assert!(!Item::FieldDistortion.is_installed());
    }

    #[test]
    fn test_inventory_serializes_as_pairs() {
        let inv = Inventory::from(vec![(Item::AuxGun(3), 2), (Item::RawMaterial, 10)]);
        let json = serde_json::to_string(&inv).unwrap();
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(Item::AuxGun(3)), 2);
        assert_eq!(back.get(Item::RawMaterial), 10);
    }
}
