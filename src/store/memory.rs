//! In-memory standings store.
//!
//! Keeps tournaments, registrations, and match results in process memory.
//! Suitable for tests and for embedding the engine without a database.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerId, StandingsSnapshot, TournamentId};

use super::{StandingsStore, StoreError};

/// A recorded match outcome between two players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// First participant
    pub player1: PlayerId,

    /// Second participant
    pub player2: PlayerId,

    /// Winner (one of the two participants)
    pub winner: PlayerId,

    /// When the result was recorded
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Whether this match was between the given unordered pair.
    fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player1 == a && self.player2 == b) || (self.player1 == b && self.player2 == a)
    }
}

#[derive(Debug, Clone)]
struct Tournament {
    name: String,
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
}

/// In-memory implementation of [`StandingsStore`] with registration and
/// match-reporting operations.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tournament and return its id.
    pub fn create_tournament(&mut self, name: impl Into<String>) -> TournamentId {
        let id = TournamentId::new();
        self.tournaments.insert(
            id,
            Tournament {
                name: name.into(),
                players: Vec::new(),
                matches: Vec::new(),
            },
        );
        id
    }

    /// Tournament display name.
    pub fn tournament_name(&self, tournament: TournamentId) -> Result<&str, StoreError> {
        Ok(&self.get(tournament)?.name)
    }

    /// Register a player in a tournament and return their id.
    pub fn register_player(
        &mut self,
        tournament: TournamentId,
        name: impl Into<String>,
    ) -> Result<PlayerId, StoreError> {
        let t = self.get_mut(tournament)?;
        let player = Player::new(name);
        let id = player.id;
        t.players.push(player);
        Ok(id)
    }

    /// Number of players registered in a tournament.
    pub fn count_players(&self, tournament: TournamentId) -> Result<usize, StoreError> {
        Ok(self.get(tournament)?.players.len())
    }

    /// Record the outcome of a single match between two registered players.
    ///
    /// Increments the winner's win count and both players' match counts.
    pub fn report_match(
        &mut self,
        tournament: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<(), StoreError> {
        if winner == loser {
            return Err(StoreError::SelfMatch(winner));
        }
        self.require_registered(tournament, winner)?;
        self.require_registered(tournament, loser)?;

        let t = self.get_mut(tournament)?;
        t.matches.push(MatchRecord {
            player1: winner,
            player2: loser,
            winner,
            played_at: Utc::now(),
        });
        for p in t.players.iter_mut() {
            if p.id == winner {
                p.wins += 1;
                p.matches_played += 1;
            } else if p.id == loser {
                p.matches_played += 1;
            }
        }
        Ok(())
    }

    /// Matches recorded for a tournament, in reporting order.
    pub fn matches(&self, tournament: TournamentId) -> Result<&[MatchRecord], StoreError> {
        Ok(&self.get(tournament)?.matches)
    }

    /// Remove all match records and reset every player's record to zero.
    pub fn delete_matches(&mut self, tournament: TournamentId) -> Result<(), StoreError> {
        let t = self.get_mut(tournament)?;
        t.matches.clear();
        for p in t.players.iter_mut() {
            p.wins = 0;
            p.matches_played = 0;
        }
        Ok(())
    }

    /// Remove all players (and, with them, all matches) from a tournament.
    pub fn delete_players(&mut self, tournament: TournamentId) -> Result<(), StoreError> {
        let t = self.get_mut(tournament)?;
        t.players.clear();
        t.matches.clear();
        Ok(())
    }

    fn get(&self, tournament: TournamentId) -> Result<&Tournament, StoreError> {
        self.tournaments
            .get(&tournament)
            .ok_or(StoreError::TournamentNotFound(tournament))
    }

    fn get_mut(&mut self, tournament: TournamentId) -> Result<&mut Tournament, StoreError> {
        self.tournaments
            .get_mut(&tournament)
            .ok_or(StoreError::TournamentNotFound(tournament))
    }

    fn require_registered(
        &self,
        tournament: TournamentId,
        player: PlayerId,
    ) -> Result<(), StoreError> {
        let registered_here = self
            .get(tournament)?
            .players
            .iter()
            .any(|p| p.id == player);
        if registered_here {
            return Ok(());
        }
        // Distinguish "registered elsewhere" from "unknown id".
        let registered_elsewhere = self
            .tournaments
            .values()
            .any(|t| t.players.iter().any(|p| p.id == player));
        if registered_elsewhere {
            Err(StoreError::WrongTournament { player, tournament })
        } else {
            Err(StoreError::PlayerNotFound(player))
        }
    }
}

impl StandingsStore for InMemoryStore {
    fn standings(&self, tournament: TournamentId) -> Result<StandingsSnapshot, StoreError> {
        let t = self.get(tournament)?;
        let mut players = t.players.clone();
        // Stable sort keeps registration order for equal win counts, which
        // makes tie-breaking consistent within (and across) calls.
        players.sort_by(|a, b| b.wins.cmp(&a.wins));
        Ok(StandingsSnapshot::new(tournament, players))
    }

    fn has_played_earlier(
        &self,
        tournament: TournamentId,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<bool, StoreError> {
        self.require_registered(tournament, a)?;
        self.require_registered(tournament, b)?;
        let t = self.get(tournament)?;
        Ok(t.matches.iter().any(|m| m.is_between(a, b)))
    }
}
