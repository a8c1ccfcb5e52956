//! Inter-species transactions produced by combat
//!
//! The economic turn consumes these after battles are resolved.

use serde::{Deserialize, Serialize};

use crate::core::types::{Coords, PlanetNumber, SpeciesId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub location: Coords,
    pub kind: TransactionKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A ship was taken apart by a hijacker instead of being destroyed
    ShipHijacked {
        hijacker: SpeciesId,
        victim: SpeciesId,
        ship_name: String,
        value: i64,
    },
    /// Economic units looted from a colony wiped out by germ warfare
    GermWarfareLoot {
        attacker: SpeciesId,
        victim: SpeciesId,
        planet: PlanetNumber,
        colony_name: String,
        value: i64,
    },
    /// A besieging ship took part in a siege of a colony
    Besieged {
        besieger: SpeciesId,
        besieged: SpeciesId,
        ship_name: String,
        colony_name: String,
    },
}

/// Transactions recorded during one turn's battles
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    pub entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location: Coords, kind: TransactionKind) {
        self.entries.push(Transaction { location, kind });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
