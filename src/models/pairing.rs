//! Pairing results — one opponent assignment for the next round.

use serde::{Deserialize, Serialize};

use super::{Player, PlayerId};

/// An unordered pair of players assigned to face each other next round.
///
/// The order of player 1 vs player 2 within a pair carries no meaning, but
/// is stable for a single engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingResult {
    /// First player's id
    pub player1_id: PlayerId,

    /// First player's name
    pub player1_name: String,

    /// Second player's id
    pub player2_id: PlayerId,

    /// Second player's name
    pub player2_name: String,
}

impl PairingResult {
    /// Create a pairing from two player records.
    pub fn new(player1: &Player, player2: &Player) -> Self {
        Self {
            player1_id: player1.id,
            player1_name: player1.name.clone(),
            player2_id: player2.id,
            player2_name: player2.name.clone(),
        }
    }

    /// Whether this pairing includes the given player.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.player1_id == id || self.player2_id == id
    }

    /// Both player ids, in pair order.
    pub fn ids(&self) -> [PlayerId; 2] {
        [self.player1_id, self.player2_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_creation() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let pairing = PairingResult::new(&alice, &bob);

        assert_eq!(pairing.player1_name, "Alice");
        assert_eq!(pairing.player2_name, "Bob");
        assert!(pairing.involves(alice.id));
        assert!(pairing.involves(bob.id));
        assert!(!pairing.involves(PlayerId::new()));
    }

    #[test]
    fn test_pairing_ids() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let pairing = PairingResult::new(&alice, &bob);
        assert_eq!(pairing.ids(), [alice.id, bob.id]);
    }

    #[test]
    fn test_pairing_serialization() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let pairing = PairingResult::new(&alice, &bob);

        let json = serde_json::to_string(&pairing).unwrap();
        let deserialized: PairingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(pairing.player1_id, deserialized.player1_id);
        assert_eq!(pairing.player2_name, deserialized.player2_name);
    }
}
