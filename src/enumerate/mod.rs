//! Maximal-clique enumeration.
//!
//! Bron–Kerbosch search with a fixed pivot: at each step the candidate whose
//! neighbourhood covers the most remaining candidates is chosen as the pivot,
//! and only candidates outside the pivot's neighbourhood are expanded. Ties
//! on the pivot score go to the greatest id, which pins down the emission
//! order and keeps outputs reproducible across runs.
//!
//! Two forms share the pivot logic:
//!
//! - [`enumerate`]: the recursive procedure, one stack frame per clique
//!   extension.
//! - [`enumerate_iterative`]: the same search over an explicit frame stack,
//!   for graphs whose recursion depth would be a concern.
//!
//! Both invoke a sink once per maximal clique and emit identical clique
//! *sets*; emission *order* differs and downstream code must not rely on it.
//! Sort with the [`IdSet`](crate::idset::IdSet) ordering when stable output
//! matters. A third rendition of the same search as a message-passing
//! computation lives in [`crate::messaging`].

mod iterative;
mod recursive;

pub use iterative::enumerate_iterative;
pub use recursive::enumerate;

use crate::features::Graph;
use crate::idset::IdSet;

/// Collect every maximal clique of `graph` into a vector.
///
/// Convenience wrapper over [`enumerate`] for callers that want the whole
/// result set rather than a streaming sink.
#[must_use]
pub fn maximal_cliques(graph: &Graph) -> Vec<IdSet> {
    let mut cliques = Vec::new();
    enumerate(graph, |clique| cliques.push(*clique));
    cliques
}

/// Pick the candidate whose neighbourhood covers the most of `cands`.
///
/// `>=` keeps the *last* candidate at equal score, so the greatest id among
/// the maximal-score candidates wins.
pub(crate) fn greatest_cand(cands: &IdSet, graph: &Graph) -> Option<usize> {
    let mut fixp = None;
    let mut best = 0;
    for v in cands.iter() {
        let score = (*cands & *graph.neighbours(v)).len();
        if fixp.is_none() || score >= best {
            fixp = Some(v);
            best = score;
        }
    }
    fixp
}

/// First remaining candidate not adjacent to the pivot, if any.
pub(crate) fn remaining_cand(cands: &IdSet, fixp: usize, graph: &Graph) -> Option<usize> {
    let pivot_neighbours = graph.neighbours(fixp);
    cands.iter().find(|&v| !pivot_neighbours.contains(v))
}
