mod session;

pub use session::{
    run_game, GameSession, RenderFrame, RenderSink, SessionCommand, SessionEnd, SessionOutcome,
};
