use common::engine::SessionCommand;
use common::game::{Difficulty, Direction};
use common::log;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

/// Everything the player can type. Session commands pass through to a
/// running game; the rest is handled by the shell between runs.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellCommand {
    Session(SessionCommand),
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,
    SetDifficulty(Difficulty),
    ShowTop,
    Help,
}

pub fn parse_command(line: &str) -> Option<ShellCommand> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_lowercase();

    let command = match head.as_str() {
        "w" | "up" => ShellCommand::Session(SessionCommand::Turn(Direction::Up)),
        "s" | "down" => ShellCommand::Session(SessionCommand::Turn(Direction::Down)),
        "a" | "left" => ShellCommand::Session(SessionCommand::Turn(Direction::Left)),
        "d" | "right" => ShellCommand::Session(SessionCommand::Turn(Direction::Right)),
        "start" => ShellCommand::Session(SessionCommand::Start),
        "npc" => ShellCommand::Session(SessionCommand::ToggleNpc),
        "quit" | "exit" => ShellCommand::Session(SessionCommand::Quit),
        "login" => ShellCommand::Login {
            username: parts.next()?.to_string(),
            password: parts.next()?.to_string(),
        },
        "register" => ShellCommand::Register {
            username: parts.next()?.to_string(),
            password: parts.next()?.to_string(),
        },
        "logout" => ShellCommand::Logout,
        "top" | "leaderboard" => ShellCommand::ShowTop,
        "difficulty" => {
            let level = match parts.next()? {
                "relaxed" => Difficulty::Relaxed,
                "classic" => Difficulty::Classic,
                "frenzy" => Difficulty::Frenzy,
                _ => return None,
            };
            ShellCommand::SetDifficulty(level)
        }
        "help" => ShellCommand::Help,
        _ => return None,
    };
    Some(command)
}

/// Reads stdin line by line and feeds parsed commands into the returned
/// channel. The task ends when stdin closes or the receiver is dropped.
pub fn spawn_input_task() -> mpsc::UnboundedReceiver<ShellCommand> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match parse_command(trimmed) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None => log!("Unrecognized command: {} (try 'help')", trimmed),
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_parse_from_wasd_and_words() {
        assert_eq!(
            parse_command("w"),
            Some(ShellCommand::Session(SessionCommand::Turn(Direction::Up)))
        );
        assert_eq!(
            parse_command("LEFT"),
            Some(ShellCommand::Session(SessionCommand::Turn(Direction::Left)))
        );
    }

    #[test]
    fn test_auth_commands_need_both_fields() {
        assert_eq!(
            parse_command("login viper hunter2"),
            Some(ShellCommand::Login {
                username: "viper".to_string(),
                password: "hunter2".to_string(),
            })
        );
        assert_eq!(parse_command("login viper"), None);
        assert_eq!(parse_command("register"), None);
    }

    #[test]
    fn test_difficulty_levels_parse() {
        assert_eq!(
            parse_command("difficulty frenzy"),
            Some(ShellCommand::SetDifficulty(Difficulty::Frenzy))
        );
        assert_eq!(parse_command("difficulty impossible"), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_command("flarp"), None);
        assert_eq!(parse_command(""), None);
    }
}
