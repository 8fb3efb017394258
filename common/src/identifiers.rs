use std::fmt;

/// Account key. Normalized to trimmed lowercase so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Returns `None` when the input is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name shown on the leaderboard for runs without a logged-in account.
pub const GUEST_NAME: &str = "GUEST";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_normalized() {
        let name = Username::parse("  NeonViper  ").unwrap();
        assert_eq!(name.as_str(), "neonviper");
    }

    #[test]
    fn test_blank_username_is_rejected() {
        assert!(Username::parse("   ").is_none());
        assert!(Username::parse("").is_none());
    }
}
