//! Swiss pairing engine.
//!
//! Converts a standings snapshot plus match history into a conflict-free
//! set of player pairs for the next round. Four cooperating stages, all
//! pure given their inputs:
//!
//! - **grouper**: partitions the snapshot into equal-wins groups
//! - **graph**: builds the weighted candidate graph of legal pairings
//! - **matching**: maximum-weight blossom matching over that graph
//! - **resolver**: canonical, deduplicated pair records
//!
//! The engine holds no cross-call state; every request re-reads the store
//! and builds everything fresh.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::models::{PairingResult, PlayerId, StandingsSnapshot, TournamentId};
use crate::store::{StandingsStore, StoreError};

pub mod graph;
pub mod grouper;
pub mod matching;
pub mod resolver;

/// Errors that can occur while computing pairings.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("standings snapshot is empty")]
    EmptyStandings,

    #[error("standings contain an odd number of players ({0}); byes are not supported")]
    OddPlayerCount(usize),

    #[error("standings are not sorted by wins descending")]
    UnsortedStandings,

    #[error("no legal pairing exists: {} player(s) have no available opponent", unpaired.len())]
    NoLegalPairing { unpaired: Vec<PlayerId> },

    #[error("snapshot belongs to tournament {actual}, expected {expected}")]
    TournamentMismatch {
        expected: TournamentId,
        actual: TournamentId,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The pairing engine. Cheap to construct; safe to share across
/// tournaments (it carries only configuration).
#[derive(Debug, Clone, Default)]
pub struct PairingEngine {
    config: EngineConfig,
}

impl PairingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute next-round pairings for a tournament.
    ///
    /// Reads a point-in-time snapshot from the store; the caller must
    /// serialize this call against writes to the same tournament. Uses the
    /// configured seed if set, OS entropy otherwise.
    pub fn compute_pairings(
        &self,
        store: &impl StandingsStore,
        tournament: TournamentId,
    ) -> Result<Vec<PairingResult>, PairingError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.compute_pairings_with_rng(store, tournament, &mut rng)
    }

    /// Compute next-round pairings with an explicit tie-break rng.
    pub fn compute_pairings_with_rng<R>(
        &self,
        store: &impl StandingsStore,
        tournament: TournamentId,
        rng: &mut R,
    ) -> Result<Vec<PairingResult>, PairingError>
    where
        R: Rng,
    {
        let snapshot = store.standings(tournament)?;
        validate_snapshot(&snapshot, tournament)?;

        let groups = grouper::group_by_wins(&snapshot);
        tracing::debug!(
            tournament = %tournament,
            players = snapshot.len(),
            groups = groups.len(),
            "grouped standings"
        );

        let graph = graph::build_candidate_graph(
            &groups,
            |a, b| store.has_played_earlier(tournament, a, b),
            self.config.adjacent_fallback,
            rng,
        )?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built candidate graph"
        );

        // Max-cardinality mode: leave a player unmatched only when no
        // perfect matching over legal edges exists at all.
        let mate = matching::maximum_weight_matching(graph.node_count(), &graph.edges, true);

        let pairings = resolver::resolve_pairings(&graph.players, &mate)?;
        tracing::info!(
            tournament = %tournament,
            pairs = pairings.len(),
            "computed pairings"
        );
        Ok(pairings)
    }
}

/// Reject snapshots that violate the engine's preconditions.
fn validate_snapshot(
    snapshot: &StandingsSnapshot,
    expected: TournamentId,
) -> Result<(), PairingError> {
    if snapshot.tournament_id != expected {
        return Err(PairingError::TournamentMismatch {
            expected,
            actual: snapshot.tournament_id,
        });
    }
    if snapshot.is_empty() {
        return Err(PairingError::EmptyStandings);
    }
    if snapshot.len() % 2 != 0 {
        return Err(PairingError::OddPlayerCount(snapshot.len()));
    }
    if !snapshot.is_sorted_by_wins() {
        return Err(PairingError::UnsortedStandings);
    }
    Ok(())
}
