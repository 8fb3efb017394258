use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

/// Difficulty selects the tick interval, nothing else: the simulation is
/// identical at every level, the world just moves faster. The interval in
/// milliseconds doubles as the partition key for high scores and
/// leaderboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Relaxed,
    Classic,
    Frenzy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Relaxed, Difficulty::Classic, Difficulty::Frenzy];

    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Relaxed => Duration::from_millis(100),
            Difficulty::Classic => Duration::from_millis(65),
            Difficulty::Frenzy => Duration::from_millis(40),
        }
    }

    /// Storage key shared by the high-score map and the leaderboard.
    pub fn storage_key(&self) -> u32 {
        self.tick_interval().as_millis() as u32
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Relaxed => "relaxed",
            Difficulty::Classic => "classic",
            Difficulty::Frenzy => "frenzy",
        };
        write!(f, "{}", label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub field_width: i32,
    pub field_height: i32,
    pub food_count: usize,
    pub npc_enabled: bool,
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 30,
            field_height: 30,
            food_count: 5,
            npc_enabled: true,
            difficulty: Difficulty::Classic,
        }
    }
}

impl GameSettings {
    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 10 || self.field_width > 100 {
            return Err("Field width must be between 10 and 100".to_string());
        }
        if self.field_height < 10 || self.field_height > 100 {
            return Err("Field height must be between 10 and 100".to_string());
        }
        if self.food_count < 1 || self.food_count > 50 {
            return Err("Food count must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_field_is_rejected() {
        let narrow = GameSettings {
            field_width: 9,
            ..GameSettings::default()
        };
        assert!(narrow.validate().is_err());

        let tall = GameSettings {
            field_height: 101,
            ..GameSettings::default()
        };
        assert!(tall.validate().is_err());
    }

    #[test]
    fn test_out_of_range_food_count_is_rejected() {
        let starved = GameSettings {
            food_count: 0,
            ..GameSettings::default()
        };
        assert!(starved.validate().is_err());

        let flooded = GameSettings {
            food_count: 51,
            ..GameSettings::default()
        };
        assert!(flooded.validate().is_err());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: Vec<u32> = Difficulty::ALL.iter().map(|d| d.storage_key()).collect();
        assert_eq!(keys, vec![100, 65, 40]);
    }
}
