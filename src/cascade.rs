//! Stochastic Cascade Simulator
//!
//! Runs one random failure cascade from a seed asset over the dependency
//! graph. Propagation follows a BFS model: for each edge (u, v) where u
//! has failed, v fails with probability w(u, v) * stress_multiplier,
//! clamped to 1.0 per edge.
//!
//! ## Guarantees
//! - Each edge is evaluated at most once; a failed node is never
//!   re-evaluated as a target.
//! - The graph is never mutated.
//! - Given a fixed rng stream the outcome is deterministic. Successor
//!   order follows the graph's adjacency storage, which affects rng
//!   consumption order but not correctness.

use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::error::{FragilityError, Result};
use crate::graph::AssetGraph;

/// Simulates a single cascading failure event from `seed_node`.
///
/// Returns the total number of failed assets, including the seed, so the
/// result is always in `[1, node_count]`. The multiplier may be any
/// non-negative value (values pushing an edge past probability 1.0 are
/// clamped per edge); NaN is rejected.
pub fn simulate_cascade(
    graph: &AssetGraph,
    seed_node: &str,
    stress_multiplier: f64,
    rng: &mut impl Rng,
) -> Result<usize> {
    if stress_multiplier.is_nan() {
        return Err(FragilityError::InvalidArgument(
            "stress multiplier is NaN".into(),
        ));
    }

    let seed = graph
        .index_of(seed_node)
        .ok_or_else(|| FragilityError::NodeNotFound(seed_node.to_string()))?;

    let mut failed = HashSet::new();
    failed.insert(seed);

    let mut queue = VecDeque::new();
    queue.push_back(seed);

    while let Some(u) = queue.pop_front() {
        for (v, weight) in graph.successors(u) {
            if failed.contains(&v) {
                continue;
            }

            let p_propagate = (weight * stress_multiplier).min(1.0);
            if rng.gen::<f64>() < p_propagate {
                failed.insert(v);
                queue.push_back(v);
            }
        }
    }

    Ok(failed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chain() -> AssetGraph {
        let mut g = AssetGraph::new();
        g.add_dependency("A", "B", Some(1.0));
        g.add_dependency("B", "C", Some(1.0));
        g
    }

    #[test]
    fn test_unknown_seed_node() {
        let g = chain();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = simulate_cascade(&g, "Z", 1.0, &mut rng).unwrap_err();
        assert_eq!(err, FragilityError::NodeNotFound("Z".into()));
    }

    #[test]
    fn test_nan_multiplier_rejected() {
        let g = chain();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = simulate_cascade(&g, "A", f64::NAN, &mut rng).unwrap_err();
        assert!(matches!(err, FragilityError::InvalidArgument(_)));
    }

    #[test]
    fn test_certain_propagation_fails_whole_chain() {
        let g = chain();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(simulate_cascade(&g, "A", 1.0, &mut rng).unwrap(), 3);
        }
    }

    #[test]
    fn test_zero_multiplier_fails_only_seed() {
        let g = chain();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(simulate_cascade(&g, "A", 0.0, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_negative_multiplier_never_propagates() {
        let g = chain();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(simulate_cascade(&g, "A", -2.0, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_multiplier_clamped_per_edge() {
        // Weight 0.5 with multiplier 2.0 gives effective probability 1.0.
        let mut g = AssetGraph::new();
        g.add_dependency("A", "B", Some(0.5));
        g.add_dependency("B", "C", Some(0.5));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(simulate_cascade(&g, "A", 2.0, &mut rng).unwrap(), 3);
        }
    }

    #[test]
    fn test_monotone_in_multiplier() {
        let mut g = AssetGraph::new();
        g.add_dependency("A", "B", Some(0.5));
        g.add_dependency("B", "C", Some(0.5));
        let mut low_rng = ChaCha8Rng::seed_from_u64(11);
        let mut high_rng = ChaCha8Rng::seed_from_u64(11);
        let low = simulate_cascade(&g, "A", 0.0, &mut low_rng).unwrap();
        let high = simulate_cascade(&g, "A", 2.0, &mut high_rng).unwrap();
        assert!(high >= low);
    }

    #[test]
    fn test_isolated_seed() {
        let mut g = AssetGraph::new();
        g.add_asset("Solo");
        g.add_dependency("A", "B", Some(1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(simulate_cascade(&g, "Solo", 10.0, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_self_loop_is_harmless() {
        let mut g = AssetGraph::new();
        g.add_dependency("A", "A", Some(1.0));
        g.add_dependency("A", "B", Some(1.0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(simulate_cascade(&g, "A", 1.0, &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_result_within_graph_bounds() {
        let g = crate::synthetic::synthetic_network(30, 90, 99);
        for (i, id) in g.node_ids().enumerate() {
            let mut rng = ChaCha8Rng::seed_from_u64(123 + i as u64);
            let count = simulate_cascade(&g, id, 1.5, &mut rng).unwrap();
            assert!(count >= 1 && count <= g.node_count());
        }
    }

    #[test]
    fn test_deterministic_given_same_stream() {
        let g = crate::synthetic::synthetic_network(20, 50, 4);
        let seed_id = g.node_ids().next().unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            let ra = simulate_cascade(&g, seed_id, 1.2, &mut a).unwrap();
            let rb = simulate_cascade(&g, seed_id, 1.2, &mut b).unwrap();
            assert_eq!(ra, rb);
        }
    }
}
