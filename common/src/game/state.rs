use std::collections::HashSet;
use std::time::Duration;

use crate::log;

use super::grid::Grid;
use super::npc::{NpcController, NpcState};
use super::player::PlayerController;
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::spawner::{spawn_free_cell, SpawnError};
use super::types::{Direction, GameEndReason, Point, RunPhase, TickResult};

pub const FOOD_REWARD: u32 = 10;
pub const WEAPON_PENALTY: u32 = 20;
pub const WEAPON_CAPACITY: usize = 1;
pub const WEAPON_SPAWN_CHANCE: f32 = 0.1;
pub const WEAPON_MIN_ELAPSED: Duration = Duration::from_secs(15);
pub const NPC_RESPAWN_DELAY: Duration = Duration::from_secs(5);

const PLAYER_HEADING: Direction = Direction::Right;
const NPC_HEADING: Direction = Direction::Left;

/// One run's worth of simulation state. All mutation goes through
/// `start`, `set_player_intent`, `set_npc_enabled` and `tick`; the
/// caller owns pacing and rendering.
pub struct GameState {
    grid: Grid,
    food_count: usize,
    npc_enabled: bool,
    tick_interval: Duration,
    phase: RunPhase,
    end_reason: Option<GameEndReason>,
    player: Snake,
    player_ctrl: PlayerController,
    npc: NpcState,
    foods: Vec<Point>,
    weapons: Vec<Point>,
    score: u32,
    ticks: u64,
}

impl GameState {
    pub fn new(settings: &GameSettings) -> Self {
        let grid = Grid::new(settings.field_width, settings.field_height);
        Self {
            grid,
            food_count: settings.food_count,
            npc_enabled: settings.npc_enabled,
            tick_interval: settings.tick_interval(),
            phase: RunPhase::Idle,
            end_reason: None,
            player: Snake::spawn(Self::player_spawn_point(grid), PLAYER_HEADING),
            player_ctrl: PlayerController::new(PLAYER_HEADING),
            npc: NpcState::Banished { respawn_at: None },
            foods: Vec::new(),
            weapons: Vec::new(),
            score: 0,
            ticks: 0,
        }
    }

    fn player_spawn_point(grid: Grid) -> Point {
        Point::new(grid.width / 2, grid.height / 2)
    }

    fn npc_spawn_point(grid: Grid) -> Point {
        Point::new(grid.width * 3 / 4, grid.height * 3 / 4)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Virtual clock: ticks times the tick interval. Every time gate in
    /// the simulation compares against this, never against wall time.
    pub fn elapsed(&self) -> Duration {
        self.tick_interval * self.ticks as u32
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    pub fn npc(&self) -> &NpcState {
        &self.npc
    }

    pub fn npc_enabled(&self) -> bool {
        self.npc_enabled
    }

    pub fn foods(&self) -> &[Point] {
        &self.foods
    }

    pub fn weapons(&self) -> &[Point] {
        &self.weapons
    }

    /// Starts a fresh run. Always permitted, also from `Ended`; resets
    /// every entity and refills the food set.
    pub fn start(&mut self, rng: &mut SessionRng) -> Result<(), SpawnError> {
        self.player = Snake::spawn(Self::player_spawn_point(self.grid), PLAYER_HEADING);
        self.player_ctrl = PlayerController::new(PLAYER_HEADING);
        self.npc = if self.npc_enabled {
            NpcState::Alive {
                snake: Snake::spawn(Self::npc_spawn_point(self.grid), NPC_HEADING),
                direction: NPC_HEADING,
            }
        } else {
            NpcState::Banished { respawn_at: None }
        };
        self.foods.clear();
        self.weapons.clear();
        self.score = 0;
        self.ticks = 0;
        self.end_reason = None;
        self.phase = RunPhase::Running;

        while self.foods.len() < self.food_count {
            self.spawn_food(rng)?;
        }
        Ok(())
    }

    pub fn set_player_intent(&mut self, direction: Direction) {
        if self.phase == RunPhase::Running {
            self.player_ctrl.set_intent(direction);
        }
    }

    /// Disabling clears the rival from the field and cancels any pending
    /// comeback. Enabling takes effect at the next start.
    pub fn set_npc_enabled(&mut self, enabled: bool) {
        self.npc_enabled = enabled;
        if !enabled {
            self.npc = NpcState::Banished { respawn_at: None };
        }
    }

    /// One simulation step. Order is load-bearing: player movement and
    /// pickups resolve first, then the weapon spawn roll, then the rival.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickResult {
        match self.phase {
            RunPhase::Running => {}
            RunPhase::Idle => return TickResult::Continue,
            RunPhase::Ended { final_score } => {
                let reason = self
                    .end_reason
                    .expect("Ended run always has an end reason");
                return TickResult::GameOver { final_score, reason };
            }
        }

        self.ticks += 1;

        if let Err(reason) = self.step_player(rng) {
            return self.end_run(reason);
        }
        if let Err(reason) = self.roll_weapon_spawn(rng) {
            return self.end_run(reason);
        }
        if self.npc_enabled
            && let Err(reason) = self.step_npc(rng)
        {
            return self.end_run(reason);
        }

        TickResult::Continue
    }

    fn step_player(&mut self, rng: &mut SessionRng) -> Result<(), GameEndReason> {
        let direction = self.player_ctrl.step_intent();
        let next_head = self.player.head().step(direction);

        if !self.grid.in_bounds(next_head) {
            return Err(GameEndReason::WallCollision);
        }
        if self.player.contains(next_head) {
            return Err(GameEndReason::SelfCollision);
        }
        if let Some(npc_snake) = self.npc.snake()
            && npc_snake.contains(next_head)
        {
            return Err(GameEndReason::NpcCollision);
        }

        // Weapon resolves before food, so banishing the rival and growing
        // can both happen on the same tick.
        if self.remove_weapon_at(next_head) && self.npc_enabled {
            self.banish_npc();
        }

        let ate_food = self.remove_food_at(next_head);
        self.player.advance(next_head, ate_food);

        if ate_food {
            self.score += FOOD_REWARD;
            log!(
                "Player ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            self.spawn_food(rng)
                .map_err(|_| GameEndReason::BoardFull)?;
        }
        Ok(())
    }

    fn banish_npc(&mut self) {
        // A new banishment supersedes any timer still pending.
        self.npc = NpcState::Banished {
            respawn_at: Some(self.elapsed() + NPC_RESPAWN_DELAY),
        };
        log!("Rival banished for {:?}", NPC_RESPAWN_DELAY);
    }

    fn roll_weapon_spawn(&mut self, rng: &mut SessionRng) -> Result<(), GameEndReason> {
        if !self.npc_enabled
            || self.weapons.len() >= WEAPON_CAPACITY
            || self.elapsed() <= WEAPON_MIN_ELAPSED
            || !rng.roll(WEAPON_SPAWN_CHANCE)
        {
            return Ok(());
        }

        let cell = spawn_free_cell(self.grid, &self.occupied_cells(), rng)
            .map_err(|_| GameEndReason::BoardFull)?;
        self.weapons.push(cell);
        log!("Weapon spawned at ({}, {})", cell.x, cell.y);
        Ok(())
    }

    fn step_npc(&mut self, rng: &mut SessionRng) -> Result<(), GameEndReason> {
        // A rival due for its comeback re-enters the field this tick and
        // starts moving on the next one.
        if let NpcState::Banished { respawn_at } = self.npc {
            if let Some(at) = respawn_at
                && self.elapsed() >= at
            {
                self.npc = NpcState::Alive {
                    snake: Snake::spawn(Self::npc_spawn_point(self.grid), NPC_HEADING),
                    direction: NPC_HEADING,
                };
                log!("Rival is back on the field");
            }
            return Ok(());
        }

        let NpcState::Alive {
            ref snake,
            direction,
        } = self.npc
        else {
            return Ok(());
        };

        let Some(chosen) = NpcController::choose_direction(snake, direction, &self.foods, self.grid)
        else {
            // Nothing to chase; hold position for a tick.
            return Ok(());
        };
        let next_head = snake.head().step(chosen);

        if let NpcState::Alive {
            ref mut direction, ..
        } = self.npc
        {
            *direction = chosen;
        }

        // Blocked rival freezes in place rather than walking off the grid
        // or through itself; there is no rival-death path.
        if !self.grid.in_bounds(next_head) {
            return Ok(());
        }
        if let Some(snake) = self.npc.snake()
            && snake.contains(next_head)
        {
            return Ok(());
        }

        // The rival does not avoid the player; contact kills the player.
        if self.player.contains(next_head) {
            return Err(GameEndReason::NpcCollision);
        }

        if self.remove_weapon_at(next_head) {
            self.score = self.score.saturating_sub(WEAPON_PENALTY);
            log!("Rival destroyed a weapon. Score: {}", self.score);
        }
        let ate_food = self.remove_food_at(next_head);

        if let NpcState::Alive { ref mut snake, .. } = self.npc {
            snake.advance(next_head, ate_food);
        }

        if ate_food {
            self.spawn_food(rng)
                .map_err(|_| GameEndReason::BoardFull)?;
        }
        Ok(())
    }

    fn spawn_food(&mut self, rng: &mut SessionRng) -> Result<(), SpawnError> {
        let cell = spawn_free_cell(self.grid, &self.occupied_cells(), rng)?;
        self.foods.push(cell);
        Ok(())
    }

    fn occupied_cells(&self) -> HashSet<Point> {
        let mut occupied: HashSet<Point> = self.player.segments().collect();
        if let Some(snake) = self.npc.snake() {
            occupied.extend(snake.segments());
        }
        occupied.extend(self.foods.iter().copied());
        occupied.extend(self.weapons.iter().copied());
        occupied
    }

    fn remove_food_at(&mut self, point: Point) -> bool {
        if let Some(index) = self.foods.iter().position(|&food| food == point) {
            self.foods.remove(index);
            true
        } else {
            false
        }
    }

    fn remove_weapon_at(&mut self, point: Point) -> bool {
        if let Some(index) = self.weapons.iter().position(|&weapon| weapon == point) {
            self.weapons.remove(index);
            true
        } else {
            false
        }
    }

    fn end_run(&mut self, reason: GameEndReason) -> TickResult {
        self.phase = RunPhase::Ended {
            final_score: self.score,
        };
        self.end_reason = Some(reason);
        log!("Game over: {:?}. Final score: {}", reason, self.score);
        TickResult::GameOver {
            final_score: self.score,
            reason,
        }
    }
}
