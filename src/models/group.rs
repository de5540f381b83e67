//! Standing groups — maximal runs of players tied on wins.

use serde::{Deserialize, Serialize};

use super::Player;

/// A maximal contiguous run of snapshot players sharing the same win count.
///
/// Groups partition the snapshot exactly, preserve player order, and are
/// themselves ordered by descending wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingGroup {
    /// Win count shared by every player in the group
    pub wins: u32,

    /// Players in snapshot order
    pub players: Vec<Player>,
}

impl StandingGroup {
    /// Create a group from players known to share `wins`.
    pub fn new(wins: u32, players: Vec<Player>) -> Self {
        Self { wins, players }
    }

    /// Number of players in the group.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the group contains no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_creation() {
        let group = StandingGroup::new(
            2,
            vec![
                Player::new("A").with_record(2, 2),
                Player::new("B").with_record(2, 2),
            ],
        );
        assert_eq!(group.wins, 2);
        assert_eq!(group.len(), 2);
        assert!(!group.is_empty());
    }

    #[test]
    fn test_group_serialization() {
        let group = StandingGroup::new(1, vec![Player::new("A").with_record(1, 1)]);
        let json = serde_json::to_string(&group).unwrap();
        let deserialized: StandingGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(group.wins, deserialized.wins);
        assert_eq!(group.players.len(), deserialized.players.len());
    }
}
