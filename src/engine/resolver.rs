//! Pairing resolver — turns a raw mate vector into canonical pair records.

use crate::models::{PairingResult, Player};

use super::PairingError;

/// Convert the matcher's mate vector into a deduplicated pairing list.
///
/// Each matched edge appears twice in the mate vector (once per endpoint);
/// emitting only the `(lower index, higher index)` direction collapses the
/// symmetric duplicates into one canonical record per pair. The output
/// order follows node order, so it is stable for a single call.
///
/// Any unmatched player makes the whole round illegal: their ids are
/// collected into [`PairingError::NoLegalPairing`] rather than silently
/// dropped.
pub fn resolve_pairings(
    players: &[Player],
    mate: &[Option<usize>],
) -> Result<Vec<PairingResult>, PairingError> {
    debug_assert_eq!(players.len(), mate.len());

    let unpaired: Vec<_> = mate
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_none())
        .map(|(v, _)| players[v].id)
        .collect();
    if !unpaired.is_empty() {
        return Err(PairingError::NoLegalPairing { unpaired });
    }

    let mut pairings = Vec::with_capacity(players.len() / 2);
    for (v, m) in mate.iter().enumerate() {
        if let Some(w) = *m {
            if v < w {
                pairings.push(PairingResult::new(&players[v], &players[w]));
            }
        }
    }
    Ok(pairings)
}
