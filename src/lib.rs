//! Fleet Combat - battle resolution core for a turn-based space empire game

pub mod combat;
pub mod core;
pub mod galaxy;
pub mod scenario;
