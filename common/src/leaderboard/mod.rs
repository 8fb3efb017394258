mod store;

pub use store::{LeaderboardEntry, LeaderboardStore, LEADERBOARD_CAPACITY};
