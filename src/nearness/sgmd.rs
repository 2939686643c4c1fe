//! Subgraph-metric-distance (SGMD) nearness.
//!
//! Instead of enumerating cliques, this measure compares the *shape* of two
//! neighbourhood sub-graphs through their degree profiles: the cost of the
//! cheapest assignment between the profiles under absolute difference. The
//! assignment itself is delegated to an external minimum-cost bipartite
//! solver; the contract is an r×c non-negative cost matrix with r ≤ c in
//! and a complete minimum-cost row→column assignment out.

use pathfinding::matrix::Matrix;
use pathfinding::prelude::kuhn_munkres_min;

use crate::features::Graph;

/// Per-vertex neighbourhood sizes of one sub-graph.
#[must_use]
pub fn subset_sizes(graph: &Graph) -> Vec<i64> {
    graph.rows().iter().map(|row| row.len() as i64).collect()
}

/// Minimum-cost assignment distance between two degree profiles.
///
/// The cost of assigning row `k` to column `l` is `|a[k] - b[l]|`. The
/// solver wants at most as many rows as columns; the absolute-difference
/// matrix is symmetric under transposition, so the profiles are swapped
/// when needed without changing the score.
#[must_use]
pub fn sgmd_score(a: &[i64], b: &[i64]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (rows, cols) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let weights = Matrix::from_fn(rows.len(), cols.len(), |(r, c)| (rows[r] - cols[c]).abs());
    let (cost, _assignment) = kuhn_munkres_min(&weights);
    cost as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_profiles_cost_nothing() {
        assert_eq!(sgmd_score(&[1, 2, 3], &[1, 2, 3]), 0.0);
    }

    #[test]
    fn permuted_profiles_cost_nothing() {
        // the assignment is free to reorder
        assert_eq!(sgmd_score(&[3, 1, 2], &[1, 2, 3]), 0.0);
    }

    #[test]
    fn unit_shift_costs_its_sum() {
        // each row is off by one from its best column
        assert_eq!(sgmd_score(&[0, 0, 0], &[1, 1, 1]), 3.0);
    }

    #[test]
    fn rectangular_profiles_are_transposed() {
        let wide = sgmd_score(&[5], &[1, 5, 9]);
        let tall = sgmd_score(&[1, 5, 9], &[5]);
        assert_eq!(wide, 0.0);
        assert_eq!(wide, tall);
    }

    #[test]
    fn degree_profiles_come_from_rows() {
        let mut graph = Graph::with_vertices(3).unwrap();
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert_eq!(subset_sizes(&graph), vec![1, 2, 1]);
    }
}
