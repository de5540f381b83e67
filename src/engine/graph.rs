//! Candidate graph builder.
//!
//! Nodes are the snapshot players (in group order); edges connect players
//! who may legally be paired this round. Edge weights are randomized
//! tie-breakers, not ranking preferences: they only stop identical
//! standings from reproducing identical pairings round after round.

use rand::Rng;

use crate::models::{Player, PlayerId, StandingGroup};
use crate::store::StoreError;

/// An undirected candidate edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEdge {
    /// First endpoint (index into the graph's player list)
    pub a: usize,

    /// Second endpoint
    pub b: usize,

    /// Randomized tie-break weight
    pub weight: i64,
}

/// The weighted candidate graph handed to the matcher.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    /// Players in group order; node index == position here
    pub players: Vec<Player>,

    /// Legal candidate pairings
    pub edges: Vec<CandidateEdge>,
}

impl CandidateGraph {
    pub fn node_count(&self) -> usize {
        self.players.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Build the candidate graph from the ordered standing groups.
///
/// An edge is added for every same-group pair that has not already played,
/// weighted uniformly from `[1, |group|]`. With `adjacent_fallback`, pairs
/// spanning two neighbouring groups are also connected; same-group edges
/// then carry a flat bonus of n² so the matcher never trades a same-group
/// pair for cross-group pairs of equal count.
///
/// The `has_played` oracle is fallible (it is usually store-backed); its
/// errors abort the build.
pub fn build_candidate_graph<F, R>(
    groups: &[StandingGroup],
    mut has_played: F,
    adjacent_fallback: bool,
    rng: &mut R,
) -> Result<CandidateGraph, StoreError>
where
    F: FnMut(PlayerId, PlayerId) -> Result<bool, StoreError>,
    R: Rng,
{
    let players: Vec<Player> = groups.iter().flat_map(|g| g.players.clone()).collect();
    let total = players.len();

    // Node index range covered by each group, in order.
    let mut ranges: Vec<(usize, usize)> = Vec::with_capacity(groups.len());
    let mut offset = 0;
    for group in groups {
        ranges.push((offset, group.len()));
        offset += group.len();
    }

    let in_group_bonus = if adjacent_fallback {
        (total * total) as i64
    } else {
        0
    };

    let mut edges: Vec<CandidateEdge> = Vec::new();

    for &(start, len) in &ranges {
        for i in start..start + len {
            for j in (i + 1)..start + len {
                if has_played(players[i].id, players[j].id)? {
                    continue;
                }
                edges.push(CandidateEdge {
                    a: i,
                    b: j,
                    weight: in_group_bonus + rng.gen_range(1..=len as i64),
                });
            }
        }
    }

    if adjacent_fallback {
        for pair in ranges.windows(2) {
            let (start_a, len_a) = pair[0];
            let (start_b, len_b) = pair[1];
            let span = len_a.min(len_b).max(1) as i64;
            for i in start_a..start_a + len_a {
                for j in start_b..start_b + len_b {
                    if has_played(players[i].id, players[j].id)? {
                        continue;
                    }
                    edges.push(CandidateEdge {
                        a: i,
                        b: j,
                        weight: rng.gen_range(1..=span),
                    });
                }
            }
        }
    }

    Ok(CandidateGraph { players, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, StandingGroup};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn group(wins: u32, names: &[&str]) -> StandingGroup {
        StandingGroup::new(
            wins,
            names
                .iter()
                .map(|n| Player::new(*n).with_record(wins, 0))
                .collect(),
        )
    }

    fn never_played(_: PlayerId, _: PlayerId) -> Result<bool, StoreError> {
        Ok(false)
    }

    #[test]
    fn test_complete_graph_for_single_group() {
        let groups = vec![group(0, &["P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"])];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, false, &mut rng).unwrap();

        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), 28); // C(8, 2)
    }

    #[test]
    fn test_no_cross_group_edges_without_fallback() {
        let groups = vec![
            group(1, &["W1", "W2", "W3", "W4"]),
            group(0, &["L1", "L2", "L3", "L4"]),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, false, &mut rng).unwrap();

        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), 12); // C(4,2) per group

        // Winners occupy nodes 0..4, losers 4..8: no edge crosses the split.
        for e in &graph.edges {
            assert_eq!(e.a < 4, e.b < 4, "edge {:?} crosses groups", e);
        }
    }

    #[test]
    fn test_weights_within_group_size() {
        let groups = vec![group(0, &["A", "B", "C", "D", "E", "F"])];
        let mut rng = StdRng::seed_from_u64(42);
        let graph = build_candidate_graph(&groups, never_played, false, &mut rng).unwrap();

        for e in &graph.edges {
            assert!(e.weight >= 1 && e.weight <= 6, "weight {} out of range", e.weight);
        }
    }

    #[test]
    fn test_rematch_excluded() {
        let groups = vec![group(1, &["A", "B", "C", "D"])];
        let a = groups[0].players[0].id;
        let b = groups[0].players[1].id;

        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(
            &groups,
            |x, y| Ok((x == a && y == b) || (x == b && y == a)),
            false,
            &mut rng,
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 5); // C(4,2) minus the rematch
        for e in &graph.edges {
            let pair = (graph.players[e.a].id, graph.players[e.b].id);
            assert!(pair != (a, b) && pair != (b, a));
        }
    }

    #[test]
    fn test_singleton_group_has_no_edges() {
        let groups = vec![group(2, &["Leader"]), group(1, &["A", "B"])];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, false, &mut rng).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        for e in &graph.edges {
            assert_ne!(e.a, 0);
            assert_ne!(e.b, 0);
        }
    }

    #[test]
    fn test_adjacent_fallback_adds_cross_edges() {
        let groups = vec![group(1, &["W1", "W2"]), group(0, &["L1", "L2"])];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, true, &mut rng).unwrap();

        // 1 in-group edge per group + 4 cross edges.
        assert_eq!(graph.edge_count(), 6);

        let bonus = (graph.node_count() * graph.node_count()) as i64;
        let cross: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| (e.a < 2) != (e.b < 2))
            .collect();
        assert_eq!(cross.len(), 4);
        for e in &cross {
            assert!(e.weight < bonus, "cross edge {:?} outweighs in-group bonus", e);
        }
        for e in graph.edges.iter().filter(|e| (e.a < 2) == (e.b < 2)) {
            assert!(e.weight > bonus, "in-group edge {:?} missing bonus", e);
        }
    }

    #[test]
    fn test_fallback_skips_non_adjacent_groups() {
        let groups = vec![group(2, &["A", "B"]), group(1, &["C", "D"]), group(0, &["E", "F"])];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, true, &mut rng).unwrap();

        // Nodes 0-1 (two wins) must never connect to nodes 4-5 (zero wins).
        for e in &graph.edges {
            let (lo, hi) = (e.a.min(e.b), e.a.max(e.b));
            assert!(!(lo < 2 && hi >= 4), "edge {:?} spans two group boundaries", e);
        }
    }

    #[test]
    fn test_seeded_build_is_deterministic() {
        let groups = vec![group(0, &["A", "B", "C", "D"])];

        let mut rng1 = StdRng::seed_from_u64(99);
        let g1 = build_candidate_graph(&groups, never_played, false, &mut rng1).unwrap();
        let mut rng2 = StdRng::seed_from_u64(99);
        let g2 = build_candidate_graph(&groups, never_played, false, &mut rng2).unwrap();

        assert_eq!(g1.edges, g2.edges);
    }

    #[test]
    fn test_oracle_errors_propagate() {
        let groups = vec![group(0, &["A", "B"])];
        let mut rng = StdRng::seed_from_u64(7);
        let result = build_candidate_graph(
            &groups,
            |a, _| Err(StoreError::PlayerNotFound(a)),
            false,
            &mut rng,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_node_set_covers_every_group_member() {
        let groups = vec![group(1, &["A", "B", "C"]), group(0, &["D"])];
        let mut rng = StdRng::seed_from_u64(7);
        let graph = build_candidate_graph(&groups, never_played, false, &mut rng).unwrap();

        let expected: HashSet<_> = groups
            .iter()
            .flat_map(|g| g.players.iter().map(|p| p.id))
            .collect();
        let actual: HashSet<_> = graph.players.iter().map(|p| p.id).collect();
        assert_eq!(expected, actual);
    }
}
