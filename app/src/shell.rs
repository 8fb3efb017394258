use tokio::sync::mpsc;

use common::accounts::AccountStore;
use common::config::FileContentConfigProvider;
use common::engine::{run_game, SessionCommand, SessionEnd, SessionOutcome};
use common::game::GameSettings;
use common::leaderboard::LeaderboardStore;
use common::{log, Username, GUEST_NAME};

use crate::config::AppConfig;
use crate::input::ShellCommand;
use crate::render::TerminalRenderer;

/// Menu layer around the game session: authentication, difficulty
/// selection, leaderboard display and score recording. One game runs at
/// a time; between games this loop owns the command stream.
pub struct Shell {
    settings: GameSettings,
    accounts: AccountStore<FileContentConfigProvider>,
    leaderboard: LeaderboardStore<FileContentConfigProvider>,
    current_user: Option<Username>,
    // Guest best is per-process only, by design.
    guest_high_score: u32,
}

impl Shell {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let accounts = AccountStore::open(&config.accounts_file)?;
        let leaderboard = LeaderboardStore::open(&config.leaderboard_file)
            .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;
        Ok(Self {
            settings: config.game.clone(),
            accounts,
            leaderboard,
            current_user: None,
            guest_high_score: 0,
        })
    }

    pub async fn run(&mut self, commands: &mut mpsc::UnboundedReceiver<ShellCommand>) {
        self.print_help();
        self.print_status();

        while let Some(command) = commands.recv().await {
            match command {
                ShellCommand::Session(SessionCommand::Start) => {
                    if self.play(commands).await {
                        break;
                    }
                    self.print_status();
                }
                ShellCommand::Session(SessionCommand::Quit) => break,
                ShellCommand::Session(SessionCommand::ToggleNpc) => {
                    self.settings.npc_enabled = !self.settings.npc_enabled;
                    log!(
                        "NPC rival {} for the next game",
                        if self.settings.npc_enabled {
                            "enabled"
                        } else {
                            "disabled"
                        }
                    );
                }
                ShellCommand::Session(SessionCommand::Turn(_)) => {
                    log!("No game running. Type 'start' to play.");
                }
                ShellCommand::Login { username, password } => self.login(&username, &password),
                ShellCommand::Register { username, password } => {
                    self.register(&username, &password)
                }
                ShellCommand::Logout => {
                    self.current_user = None;
                    log!("Logged out. Playing as {}.", GUEST_NAME);
                }
                ShellCommand::SetDifficulty(level) => {
                    self.settings.difficulty = level;
                    log!("Difficulty set to {}", level);
                    self.print_status();
                }
                ShellCommand::ShowTop => self.show_top(),
                ShellCommand::Help => self.print_help(),
            }
        }
    }

    /// Runs one game, forwarding session commands while it lasts.
    /// Returns true when the player asked to quit the program.
    async fn play(&mut self, commands: &mut mpsc::UnboundedReceiver<ShellCommand>) -> bool {
        let (session_tx, session_rx) = mpsc::unbounded_channel();
        let seed: u64 = rand::random();
        let renderer = TerminalRenderer::new(true);
        let settings = self.settings.clone();

        let mut game_handle = tokio::spawn(run_game(settings, seed, session_rx, renderer));

        loop {
            tokio::select! {
                result = &mut game_handle => {
                    match result {
                        Ok(Ok(SessionEnd::GameOver(outcome))) => {
                            self.handle_game_over(&outcome);
                            return false;
                        }
                        Ok(Ok(SessionEnd::Aborted)) => return true,
                        Ok(Err(e)) => {
                            log!("Could not run the game: {}", e);
                            return false;
                        }
                        Err(e) => {
                            log!("Game task failed: {}", e);
                            return false;
                        }
                    }
                }
                command = commands.recv() => {
                    match command {
                        Some(ShellCommand::Session(session_command)) => {
                            let _ = session_tx.send(session_command);
                        }
                        Some(_) => log!("Finish the run first (or 'quit')."),
                        None => {
                            let _ = session_tx.send(SessionCommand::Quit);
                        }
                    }
                }
            }
        }
    }

    fn handle_game_over(&mut self, outcome: &SessionOutcome) {
        let name = match &self.current_user {
            Some(user) => user.to_string(),
            None => GUEST_NAME.to_string(),
        };
        log!(
            "{} finished with {} points ({:?}, {} ticks)",
            name,
            outcome.final_score,
            outcome.reason,
            outcome.ticks
        );

        match &self.current_user {
            Some(user) => {
                match self
                    .accounts
                    .record_high_score(user, outcome.difficulty, outcome.final_score)
                {
                    Ok(true) => log!(
                        "New personal best on {}: {}",
                        outcome.difficulty,
                        outcome.final_score
                    ),
                    Ok(false) => {}
                    Err(e) => log!("Could not save high score: {}", e),
                }
            }
            None => {
                if outcome.final_score > self.guest_high_score {
                    self.guest_high_score = outcome.final_score;
                }
            }
        }

        if let Err(e) = self
            .leaderboard
            .record(outcome.difficulty, &name, outcome.final_score)
        {
            log!("Could not update leaderboard: {}", e);
        }
        self.show_top();
    }

    fn login(&mut self, username: &str, password: &str) {
        match self.accounts.authenticate(username, password) {
            Ok(user) => {
                log!(
                    "Welcome back, {}! High score on {}: {}",
                    user,
                    self.settings.difficulty,
                    self.accounts.high_score(&user, self.settings.difficulty)
                );
                self.current_user = Some(user);
            }
            Err(e) => log!("{}", e),
        }
    }

    fn register(&mut self, username: &str, password: &str) {
        match self.accounts.register(username, password) {
            Ok(user) => log!("Registered {}. Log in to play for the record.", user),
            Err(e) => log!("{}", e),
        }
    }

    fn show_top(&self) {
        let entries = self.leaderboard.top(self.settings.difficulty);
        if entries.is_empty() {
            log!("Leaderboard ({}): no scores yet", self.settings.difficulty);
            return;
        }
        log!("Leaderboard ({}):", self.settings.difficulty);
        for (rank, entry) in entries.iter().enumerate() {
            log!("  {}. {:03}  {}", rank + 1, entry.score, entry.name);
        }
    }

    fn print_status(&self) {
        let name = match &self.current_user {
            Some(user) => user.to_string(),
            None => GUEST_NAME.to_string(),
        };
        let high_score = match &self.current_user {
            Some(user) => self.accounts.high_score(user, self.settings.difficulty),
            None => self.guest_high_score,
        };
        log!(
            "Player {} | difficulty {} | NPC {} | high score {:03}",
            name,
            self.settings.difficulty,
            if self.settings.npc_enabled { "on" } else { "off" },
            high_score
        );
    }

    fn print_help(&self) {
        log!("Commands: start | w/a/s/d | npc | difficulty <relaxed|classic|frenzy>");
        log!("          login <user> <pass> | register <user> <pass> | logout");
        log!("          top | help | quit");
    }
}
