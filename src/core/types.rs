//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for species
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub u16);

impl std::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Star system coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Planet number within a star system. Zero means deep space.
pub type PlanetNumber = u8;

pub const DEEP_SPACE: PlanetNumber = 0;

/// Tech levels of one species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechLevels {
    pub mining: i64,
    pub manufacturing: i64,
    pub military: i64,
    pub gravitics: i64,
    pub life_support: i64,
    pub biology: i64,
}

impl TechLevels {
    /// Same level in every field
    pub fn uniform(level: i64) -> Self {
        Self {
            mining: level,
            manufacturing: level,
            military: level,
            gravitics: level,
            life_support: level,
            biology: level,
        }
    }
}
