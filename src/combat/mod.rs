//! Battle resolution
//!
//! Everything between "these species met here with these orders" and
//! "this is what happened to their fleets and colonies".

pub mod ambush;
pub mod battle;
pub mod bombardment;
pub mod dice;
pub mod diplomacy;
pub mod forced_jump;
pub mod germ_warfare;
pub mod log;
pub mod options;
pub mod orchestrator;
pub mod power;
pub mod roster;
pub mod round;
pub mod shields;
pub mod siege;
pub mod transaction;
pub mod withdrawal;

pub use battle::{Battle, Betrayal, SurpriseState};
pub use dice::{Dice, ScriptedDice};
pub use log::{write_species_logs, CombatLog, LogChannel};
pub use options::{
    BattleOrders, Engagement, EngagementOption, Hostility, HostilityDecl, HostilityTarget,
    SpeciesOrders, TargetClass, WithdrawalOrders,
};
pub use orchestrator::{resolve_battle, resolve_battles, BattleOutcome};
pub use transaction::{Transaction, TransactionKind, TransactionLog};
