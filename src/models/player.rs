//! Player records and standings snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PlayerId, TournamentId};

/// A registered player with their current win record.
///
/// Identity is the `id`; `name` is display-only and need not be unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name (as registered)
    pub name: String,

    /// Matches won so far
    pub wins: u32,

    /// Matches played so far
    pub matches_played: u32,
}

impl Player {
    /// Create a new Player with an auto-generated id and no match history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            wins: 0,
            matches_played: 0,
        }
    }

    /// Builder method to set the win record.
    pub fn with_record(mut self, wins: u32, matches_played: u32) -> Self {
        self.wins = wins;
        self.matches_played = matches_played;
        self
    }
}

/// A point-in-time view of one tournament's standings.
///
/// Players are sorted by `wins` descending; ties are broken arbitrarily but
/// consistently within one snapshot. The pairing engine treats the snapshot
/// as immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    /// Tournament this snapshot belongs to
    pub tournament_id: TournamentId,

    /// Players in standings order (best record first)
    pub players: Vec<Player>,

    /// When this snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl StandingsSnapshot {
    /// Create a snapshot from players already in standings order.
    pub fn new(tournament_id: TournamentId, players: Vec<Player>) -> Self {
        Self {
            tournament_id,
            players,
            captured_at: Utc::now(),
        }
    }

    /// Number of players in the snapshot.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the snapshot contains no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether players appear in non-increasing win order.
    pub fn is_sorted_by_wins(&self) -> bool {
        self.players.windows(2).all(|w| w[0].wins >= w[1].wins)
    }
}
