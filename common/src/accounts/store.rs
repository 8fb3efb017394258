use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::game::Difficulty;
use crate::identifiers::Username;

#[derive(Debug)]
pub enum AccountError {
    EmptyField,
    DuplicateUser,
    InvalidCredentials,
    Storage(String),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::EmptyField => write!(f, "Please fill all fields"),
            AccountError::DuplicateUser => write!(f, "User already exists"),
            AccountError::InvalidCredentials => write!(f, "Invalid credentials"),
            AccountError::Storage(e) => write!(f, "Account storage error: {}", e),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<String> for AccountError {
    fn from(e: String) -> Self {
        AccountError::Storage(e)
    }
}

/// Persisted per-user record. Passwords are stored as hex sha-256
/// digests, high scores as a map keyed by difficulty storage key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password_hash: String,
    #[serde(default)]
    pub high_scores: HashMap<u32, u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct AccountsData {
    #[serde(default)]
    users: HashMap<String, UserRecord>,
}

/// Username/password store with per-difficulty high scores. The whole
/// file is rewritten on every change; last write wins.
pub struct AccountStore<P: ConfigContentProvider> {
    provider: P,
    serializer: YamlConfigSerializer,
    data: AccountsData,
}

impl AccountStore<FileContentConfigProvider> {
    pub fn open(file_path: &str) -> Result<Self, AccountError> {
        Self::with_provider(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<P: ConfigContentProvider> AccountStore<P> {
    pub fn with_provider(provider: P) -> Result<Self, AccountError> {
        let serializer = YamlConfigSerializer::new();
        let data = match provider.get_config_content()? {
            Some(content) => serializer.deserialize(&content)?,
            None => AccountsData::default(),
        };
        Ok(Self {
            provider,
            serializer,
            data,
        })
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<Username, AccountError> {
        let username = Username::parse(username).ok_or(AccountError::EmptyField)?;
        if password.trim().is_empty() {
            return Err(AccountError::EmptyField);
        }

        match self.data.users.entry(username.as_str().to_string()) {
            Entry::Occupied(_) => return Err(AccountError::DuplicateUser),
            Entry::Vacant(slot) => {
                slot.insert(UserRecord {
                    password_hash: hash_password(password.trim()),
                    high_scores: HashMap::new(),
                });
            }
        }
        self.persist()?;
        Ok(username)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<Username, AccountError> {
        let username = Username::parse(username).ok_or(AccountError::InvalidCredentials)?;
        let record = self
            .data
            .users
            .get(username.as_str())
            .ok_or(AccountError::InvalidCredentials)?;

        if record.password_hash == hash_password(password.trim()) {
            Ok(username)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    pub fn high_score(&self, username: &Username, difficulty: Difficulty) -> u32 {
        self.data
            .users
            .get(username.as_str())
            .and_then(|record| record.high_scores.get(&difficulty.storage_key()))
            .copied()
            .unwrap_or(0)
    }

    /// Records `score` if it beats the stored high score. Returns whether
    /// the record was raised.
    pub fn record_high_score(
        &mut self,
        username: &Username,
        difficulty: Difficulty,
        score: u32,
    ) -> Result<bool, AccountError> {
        let Some(record) = self.data.users.get_mut(username.as_str()) else {
            return Ok(false);
        };

        let entry = record.high_scores.entry(difficulty.storage_key()).or_insert(0);
        if score <= *entry {
            return Ok(false);
        }
        *entry = score;
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), AccountError> {
        let content = self.serializer.serialize(&self.data)?;
        self.provider.set_config_content(&content)?;
        Ok(())
    }
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory stand-in for the file provider.
    #[derive(Clone, Default)]
    struct MemoryContentProvider {
        content: Rc<RefCell<Option<String>>>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn empty_store() -> AccountStore<MemoryContentProvider> {
        AccountStore::with_provider(MemoryContentProvider::default()).unwrap()
    }

    #[test]
    fn test_register_and_authenticate() {
        let mut store = empty_store();
        store.register("Viper", "hunter2").unwrap();

        assert!(store.authenticate("viper", "hunter2").is_ok());
        assert!(matches!(
            store.authenticate("viper", "wrong"),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_usernames_are_case_insensitive() {
        let mut store = empty_store();
        store.register("Viper", "hunter2").unwrap();

        assert!(store.authenticate("VIPER", "hunter2").is_ok());
        assert!(matches!(
            store.register("vIpEr", "other"),
            Err(AccountError::DuplicateUser)
        ));
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let mut store = empty_store();
        assert!(matches!(
            store.register("  ", "hunter2"),
            Err(AccountError::EmptyField)
        ));
        assert!(matches!(
            store.register("viper", "   "),
            Err(AccountError::EmptyField)
        ));
    }

    #[test]
    fn test_password_is_stored_as_digest() {
        let provider = MemoryContentProvider::default();
        let mut store = AccountStore::with_provider(provider.clone()).unwrap();
        store.register("viper", "hunter2").unwrap();

        let content = provider.get_config_content().unwrap().unwrap();
        assert!(!content.contains("hunter2"));
        assert!(content.contains(&hash_password("hunter2")));
    }

    #[test]
    fn test_high_score_only_raises() {
        let mut store = empty_store();
        let user = store.register("viper", "hunter2").unwrap();

        assert!(store
            .record_high_score(&user, Difficulty::Classic, 50)
            .unwrap());
        assert!(!store
            .record_high_score(&user, Difficulty::Classic, 30)
            .unwrap());
        assert_eq!(store.high_score(&user, Difficulty::Classic), 50);
        // Other difficulties keep their own slot.
        assert_eq!(store.high_score(&user, Difficulty::Frenzy), 0);
    }

    #[test]
    fn test_data_survives_reload() {
        let provider = MemoryContentProvider::default();
        let mut store = AccountStore::with_provider(provider.clone()).unwrap();
        let user = store.register("viper", "hunter2").unwrap();
        store
            .record_high_score(&user, Difficulty::Frenzy, 120)
            .unwrap();

        let reloaded = AccountStore::with_provider(provider).unwrap();
        assert!(reloaded.authenticate("viper", "hunter2").is_ok());
        assert_eq!(reloaded.high_score(&user, Difficulty::Frenzy), 120);
    }
}
