//! Recursive Bron–Kerbosch enumeration.

use super::{greatest_cand, remaining_cand};
use crate::features::Graph;
use crate::idset::IdSet;

/// Enumerate every maximal clique of `graph`, invoking `sink` once per
/// clique.
///
/// Isolated vertices are emitted as singleton cliques; callers that exclude
/// singletons filter at the sink. An empty graph emits nothing.
pub fn enumerate<F: FnMut(&IdSet)>(graph: &Graph, mut sink: F) {
    if graph.is_empty() {
        return;
    }
    let cands = IdSet::first_n(graph.len());
    expand(IdSet::new(), cands, IdSet::new(), graph, &mut sink);
}

/// One Bron–Kerbosch step: `clique` is the clique so far, `cands` the
/// vertices that could extend it, `nots` the vertices already explored whose
/// supersets are covered elsewhere. The three sets are pairwise disjoint.
fn expand<F: FnMut(&IdSet)>(
    clique: IdSet,
    mut cands: IdSet,
    mut nots: IdSet,
    graph: &Graph,
    sink: &mut F,
) {
    if cands.is_empty() {
        // no extension possible; maximal iff nothing explored covers it
        if nots.is_empty() {
            sink(&clique);
        }
        return;
    }

    let Some(fixp) = greatest_cand(&cands, graph) else {
        return;
    };

    let mut cur = Some(fixp);
    while let Some(v) = cur {
        let neighbours = *graph.neighbours(v);
        let mut extended = clique;
        extended.insert(v);
        expand(extended, cands & neighbours, nots & neighbours, graph, sink);

        nots.insert(v);
        cands.remove(v);
        cur = remaining_cand(&cands, fixp, graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::maximal_cliques;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut graph = Graph::with_vertices(n).unwrap();
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    fn sorted(mut cliques: Vec<IdSet>) -> Vec<IdSet> {
        cliques.sort();
        cliques
    }

    #[test]
    fn empty_graph_emits_nothing() {
        let graph = Graph::with_vertices(0).unwrap();
        assert!(maximal_cliques(&graph).is_empty());
    }

    #[test]
    fn path_graph_yields_edges() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let cliques = sorted(maximal_cliques(&graph));
        let expected: Vec<IdSet> = vec![
            [0, 1].into_iter().collect(),
            [1, 2].into_iter().collect(),
        ];
        assert_eq!(cliques, sorted(expected));
    }

    #[test]
    fn complete_graph_is_one_clique() {
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let cliques = maximal_cliques(&graph);
        assert_eq!(cliques, vec![IdSet::first_n(4)]);
    }

    #[test]
    fn isolated_vertex_is_a_singleton_clique() {
        let graph = graph_from_edges(3, &[(0, 2)]);
        let cliques = sorted(maximal_cliques(&graph));
        let expected: Vec<IdSet> = vec![
            [1].into_iter().collect(),
            [0, 2].into_iter().collect(),
        ];
        assert_eq!(cliques, sorted(expected));
    }

    #[test]
    fn two_triangles_sharing_an_edge() {
        // 0-1-2 triangle and 1-2-3 triangle
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
        let cliques = sorted(maximal_cliques(&graph));
        let expected: Vec<IdSet> = vec![
            [0, 1, 2].into_iter().collect(),
            [1, 2, 3].into_iter().collect(),
        ];
        assert_eq!(cliques, sorted(expected));
    }
}
