//! Standings store — the collaborator the pairing engine reads from.
//!
//! The engine consumes two read-only capabilities: a win-ordered standings
//! snapshot and a symmetric "have these two already played" predicate.
//! Persistence details (schema, transactions) live outside this crate; the
//! in-memory implementation in [`memory`] covers tests and embedding.

use thiserror::Error;

use crate::models::{PlayerId, StandingsSnapshot, TournamentId};

mod memory;

pub use memory::{InMemoryStore, MatchRecord};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("player {player} is not registered in tournament {tournament}")]
    WrongTournament {
        player: PlayerId,
        tournament: TournamentId,
    },

    #[error("a player cannot be matched against themselves: {0}")]
    SelfMatch(PlayerId),
}

/// Read capabilities the pairing engine requires.
pub trait StandingsStore {
    /// Current standings for a tournament, sorted by wins descending.
    /// Ties are broken arbitrarily but consistently within one call.
    fn standings(&self, tournament: TournamentId) -> Result<StandingsSnapshot, StoreError>;

    /// Whether the two players have already faced each other in this
    /// tournament. Symmetric in `a` and `b`.
    fn has_played_earlier(
        &self,
        tournament: TournamentId,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<bool, StoreError>;
}
