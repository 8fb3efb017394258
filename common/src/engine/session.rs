use tokio::sync::mpsc;
use tokio::time::interval;

use crate::game::{
    Difficulty, Direction, GameEndReason, GameSettings, GameState, Grid, Point, RunPhase,
    SessionRng, SpawnError, TickResult,
};
use crate::log;

/// Commands the session accepts while a game is running. Direction intents
/// are debounced by the player controller (depth-1 buffer), so flooding
/// the channel between ticks only keeps the latest valid turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Start,
    ToggleNpc,
    Quit,
}

/// Everything a frontend needs to draw one tick.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    pub grid: Grid,
    pub phase: RunPhase,
    pub player: Vec<Point>,
    pub npc: Vec<Point>,
    pub npc_alive: bool,
    pub npc_enabled: bool,
    pub foods: Vec<Point>,
    pub weapons: Vec<Point>,
    pub score: u32,
    pub tick: u64,
}

/// Per-tick output sink. Implementations draw; the engine never knows how.
pub trait RenderSink: Send + 'static {
    fn present(&mut self, frame: &RenderFrame);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub final_score: u32,
    pub reason: GameEndReason,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub ticks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver(SessionOutcome),
    Aborted,
}

pub struct GameSession {
    state: GameState,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(settings: &GameSettings, seed: u64) -> Self {
        Self {
            state: GameState::new(settings),
            rng: SessionRng::new(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn start(&mut self) -> Result<(), SpawnError> {
        self.state.start(&mut self.rng)
    }

    pub fn tick(&mut self) -> TickResult {
        self.state.tick(&mut self.rng)
    }

    pub fn frame(&self) -> RenderFrame {
        let state = &self.state;
        let (npc, npc_alive) = match state.npc().snake() {
            Some(snake) => (snake.segments().collect(), true),
            None => (Vec::new(), false),
        };
        RenderFrame {
            grid: state.grid(),
            phase: state.phase(),
            player: state.player().segments().collect(),
            npc,
            npc_alive,
            npc_enabled: state.npc_enabled(),
            foods: state.foods().to_vec(),
            weapons: state.weapons().to_vec(),
            score: state.score(),
            tick: state.ticks(),
        }
    }
}

/// Runs one game to completion. Ticks fire on the difficulty's interval;
/// commands are folded in between ticks. A tick always runs to completion
/// before the next command or tick is looked at, so the per-tick
/// resolution order is never interleaved.
pub async fn run_game<S: RenderSink>(
    settings: GameSettings,
    seed: u64,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    mut sink: S,
) -> Result<SessionEnd, SpawnError> {
    let difficulty = settings.difficulty;
    let tick_interval = settings.tick_interval();
    let mut session = GameSession::new(&settings, seed);
    session.start()?;
    log!("Game started (seed {})", seed);
    sink.present(&session.frame());

    let mut ticker = interval(tick_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = session.tick();
                sink.present(&session.frame());

                if let TickResult::GameOver { final_score, reason } = result {
                    return Ok(SessionEnd::GameOver(SessionOutcome {
                        final_score,
                        reason,
                        difficulty,
                        seed,
                        ticks: session.state().ticks(),
                    }));
                }
            }
            command = commands.recv() => {
                match command {
                    Some(SessionCommand::Turn(direction)) => {
                        session.state.set_player_intent(direction);
                    }
                    Some(SessionCommand::ToggleNpc) => {
                        let enabled = !session.state.npc_enabled();
                        session.state.set_npc_enabled(enabled);
                        log!("Rival feature now {}", if enabled { "on" } else { "off" });
                    }
                    Some(SessionCommand::Start) => {}
                    Some(SessionCommand::Quit) | None => {
                        return Ok(SessionEnd::Aborted);
                    }
                }
            }
        }
    }
}
