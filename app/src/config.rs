use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::game::GameSettings;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_arcade_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, AppConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(&get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub game: GameSettings,
    pub accounts_file: String,
    pub leaderboard_file: String,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.accounts_file.trim().is_empty() {
            return Err("Accounts file path must not be empty".to_string());
        }
        if self.leaderboard_file.trim().is_empty() {
            return Err("Leaderboard file path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            accounts_file: "snake_arcade_users.yaml".to_string(),
            leaderboard_file: "snake_arcade_leaderboard.yaml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_snake_arcade_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let default_config = AppConfig::default();
        let serializer = YamlConfigSerializer::new();

        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: AppConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let default_config = AppConfig::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path);

        let serialized = serializer.serialize(&default_config).unwrap();
        content_provider.set_config_content(&serialized).unwrap();

        let read_back = content_provider.get_config_content().unwrap().unwrap();
        let deserialized: AppConfig = serializer.deserialize(&read_back).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_missing_config_file_yields_default() {
        let manager = get_config_manager(Some("this_file_does_not_exist.yaml"));
        let loaded = manager.get_config().unwrap();
        assert_eq!(AppConfig::default(), loaded);
    }

    #[test]
    fn test_blank_store_path_is_rejected() {
        let config = AppConfig {
            accounts_file: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
