//! Standings grouper — partitions a win-ordered snapshot into equal-wins runs.

use crate::models::{StandingGroup, StandingsSnapshot};

/// Partition the snapshot into maximal contiguous groups of equal win count.
///
/// Assumes the snapshot is sorted by wins descending (validated by the
/// engine before this stage). Groups come back in snapshot order, so they
/// are ordered by descending wins and flattening them reproduces the input.
pub fn group_by_wins(snapshot: &StandingsSnapshot) -> Vec<StandingGroup> {
    let mut groups: Vec<StandingGroup> = Vec::new();

    for player in &snapshot.players {
        match groups.last_mut() {
            Some(group) if group.wins == player.wins => group.players.push(player.clone()),
            _ => groups.push(StandingGroup::new(player.wins, vec![player.clone()])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, TournamentId};

    fn snapshot(records: &[(&str, u32)]) -> StandingsSnapshot {
        StandingsSnapshot::new(
            TournamentId::new(),
            records
                .iter()
                .map(|(name, wins)| Player::new(*name).with_record(*wins, *wins))
                .collect(),
        )
    }

    #[test]
    fn test_single_group_when_all_tied() {
        let snap = snapshot(&[("A", 0), ("B", 0), ("C", 0), ("D", 0)]);
        let groups = group_by_wins(&snap);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].wins, 0);
        assert_eq!(groups[0].len(), 4);
    }

    #[test]
    fn test_splits_on_win_boundaries() {
        let snap = snapshot(&[("A", 2), ("B", 1), ("C", 1), ("D", 0)]);
        let groups = group_by_wins(&snap);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].wins, 2);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].wins, 1);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].wins, 0);
        assert_eq!(groups[2].len(), 1);
    }

    #[test]
    fn test_groups_partition_snapshot_in_order() {
        let snap = snapshot(&[("A", 3), ("B", 3), ("C", 2), ("D", 1), ("E", 1), ("F", 0)]);
        let groups = group_by_wins(&snap);

        let flattened: Vec<_> = groups
            .iter()
            .flat_map(|g| g.players.iter().map(|p| p.id))
            .collect();
        let original: Vec<_> = snap.players.iter().map(|p| p.id).collect();
        assert_eq!(flattened, original);
    }

    #[test]
    fn test_grouping_idempotent() {
        let snap = snapshot(&[("A", 2), ("B", 2), ("C", 1), ("D", 0)]);
        let groups = group_by_wins(&snap);

        // Regroup the flattened groups: the partition must not change.
        let reflattened = StandingsSnapshot::new(
            snap.tournament_id,
            groups.iter().flat_map(|g| g.players.clone()).collect(),
        );
        let regrouped = group_by_wins(&reflattened);

        assert_eq!(groups.len(), regrouped.len());
        for (a, b) in groups.iter().zip(regrouped.iter()) {
            assert_eq!(a.wins, b.wins);
            let a_ids: Vec<_> = a.players.iter().map(|p| p.id).collect();
            let b_ids: Vec<_> = b.players.iter().map(|p| p.id).collect();
            assert_eq!(a_ids, b_ids);
        }
    }

    #[test]
    fn test_empty_snapshot_yields_no_groups() {
        let snap = snapshot(&[]);
        assert!(group_by_wins(&snap).is_empty());
    }
}
