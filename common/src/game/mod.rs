mod grid;
mod npc;
mod player;
mod session_rng;
mod settings;
mod snake;
mod spawner;
mod state;
mod types;

pub use grid::Grid;
pub use npc::{NpcController, NpcState};
pub use player::PlayerController;
pub use session_rng::SessionRng;
pub use settings::{Difficulty, GameSettings};
pub use snake::Snake;
pub use spawner::{spawn_free_cell, SpawnError};
pub use state::{
    GameState, FOOD_REWARD, NPC_RESPAWN_DELAY, WEAPON_CAPACITY, WEAPON_MIN_ELAPSED,
    WEAPON_PENALTY, WEAPON_SPAWN_CHANCE,
};
pub use types::{Direction, GameEndReason, Point, RunPhase, TickResult};
