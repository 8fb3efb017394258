pub mod accounts;
pub mod config;
pub mod engine;
pub mod game;
pub mod identifiers;
pub mod leaderboard;
pub mod logger;

pub use identifiers::*;
