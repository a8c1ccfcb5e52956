//! Scenario files for the battle simulator
//!
//! A scenario is a galaxy snapshot plus the battle orders of one turn,
//! stored as JSON.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::combat::dice::Dice;
use crate::combat::options::BattleOrders;
use crate::combat::orchestrator::{resolve_battles, BattleOutcome};
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::galaxy::Galaxy;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub galaxy: Galaxy,
    pub battles: Vec<BattleOrders>,
    /// Seed used when the command line does not give one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve every battle in order, consuming the scenario
    pub fn run<D: Dice + ?Sized>(mut self, config: &CombatConfig, dice: &mut D) -> Result<ScenarioOutput> {
        let start = Instant::now();
        let outcomes = resolve_battles(&mut self.galaxy, &self.battles, config, dice)?;
        Ok(ScenarioOutput::new(self.galaxy, outcomes, start.elapsed()))
    }
}

/// Galaxy after the turn's battles, with per-battle results
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub galaxy: Galaxy,
    pub outcomes: Vec<BattleOutcome>,
    pub statistics: ScenarioStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioStats {
    pub battles: u32,
    pub battles_fought: u32,
    pub engagements: u32,
    pub ships_destroyed: u32,
    pub ships_hijacked: u32,
    pub ships_withdrawn: u32,
    pub ships_jumped: u32,
    pub transactions: u32,
    pub resolution_time_ms: u64,
}

impl ScenarioOutput {
    pub fn new(galaxy: Galaxy, outcomes: Vec<BattleOutcome>, elapsed: Duration) -> Self {
        let count = |f: fn(&BattleOutcome) -> usize| outcomes.iter().map(f).sum::<usize>() as u32;

        let statistics = ScenarioStats {
            battles: outcomes.len() as u32,
            battles_fought: outcomes.iter().filter(|o| o.fought()).count() as u32,
            engagements: count(|o| o.engagements.len()),
            ships_destroyed: count(|o| o.destroyed.len()),
            ships_hijacked: count(|o| o.hijacked.len()),
            ships_withdrawn: count(|o| o.withdrawn.len()),
            ships_jumped: count(|o| o.forced_jumped.len()),
            transactions: count(|o| o.transactions.len()),
            resolution_time_ms: elapsed.as_millis() as u64,
        };

        Self { galaxy, outcomes, statistics }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Resolved {} battles ({} with combat) in {}ms\n{} engagements, {} ships destroyed, {} hijacked, {} withdrew, {} jumped, {} transactions",
            self.statistics.battles,
            self.statistics.battles_fought,
            self.statistics.resolution_time_ms,
            self.statistics.engagements,
            self.statistics.ships_destroyed,
            self.statistics.ships_hijacked,
            self.statistics.ships_withdrawn,
            self.statistics.ships_jumped,
            self.statistics.transactions,
        );
        for outcome in self.outcomes.iter().filter(|o| o.fought()) {
            out.push_str(&format!(
                "\n  {}: {} engagements, {} destroyed",
                outcome.location,
                outcome.engagements.len(),
                outcome.destroyed.len()
            ));
        }
        out
    }
}
