use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use crate::game::Difficulty;

pub const LEADERBOARD_CAPACITY: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct LeaderboardData {
    #[serde(default)]
    boards: HashMap<u32, Vec<LeaderboardEntry>>,
}

/// Top-5 table per difficulty. Entries are kept sorted descending by
/// score; the sort is stable, so equal scores stay in insertion order.
pub struct LeaderboardStore<P: ConfigContentProvider> {
    provider: P,
    serializer: YamlConfigSerializer,
    data: LeaderboardData,
}

impl LeaderboardStore<FileContentConfigProvider> {
    pub fn open(file_path: &str) -> Result<Self, String> {
        Self::with_provider(FileContentConfigProvider::new(file_path.to_string()))
    }
}

impl<P: ConfigContentProvider> LeaderboardStore<P> {
    pub fn with_provider(provider: P) -> Result<Self, String> {
        let serializer = YamlConfigSerializer::new();
        let data = match provider.get_config_content()? {
            Some(content) => serializer.deserialize(&content)?,
            None => LeaderboardData::default(),
        };
        Ok(Self {
            provider,
            serializer,
            data,
        })
    }

    pub fn record(&mut self, difficulty: Difficulty, name: &str, score: u32) -> Result<(), String> {
        let board = self
            .data
            .boards
            .entry(difficulty.storage_key())
            .or_default();
        board.push(LeaderboardEntry {
            name: name.to_string(),
            score,
        });
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board.truncate(LEADERBOARD_CAPACITY);
        self.persist()
    }

    pub fn top(&self, difficulty: Difficulty) -> &[LeaderboardEntry] {
        self.data
            .boards
            .get(&difficulty.storage_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn persist(&self) -> Result<(), String> {
        let content = self.serializer.serialize(&self.data)?;
        self.provider.set_config_content(&content)
    }
}
