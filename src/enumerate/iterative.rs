//! Explicit-stack Bron–Kerbosch enumeration.

use super::{greatest_cand, remaining_cand};
use crate::features::Graph;
use crate::idset::IdSet;

/// One suspended search state.
struct Frame {
    clique: IdSet,
    cands: IdSet,
    nots: IdSet,
}

/// Enumerate every maximal clique of `graph` without recursion.
///
/// Same clique set as [`super::enumerate`], different emission order; the
/// frame stack replaces the call stack so depth is bounded by heap, not by
/// thread stack size.
pub fn enumerate_iterative<F: FnMut(&IdSet)>(graph: &Graph, mut sink: F) {
    if graph.is_empty() {
        return;
    }

    let mut stack = vec![Frame {
        clique: IdSet::new(),
        cands: IdSet::first_n(graph.len()),
        nots: IdSet::new(),
    }];

    while let Some(mut frame) = stack.pop() {
        if frame.cands.is_empty() {
            if frame.nots.is_empty() {
                sink(&frame.clique);
            }
            continue;
        }

        let Some(fixp) = greatest_cand(&frame.cands, graph) else {
            continue;
        };

        let mut cur = Some(fixp);
        while let Some(v) = cur {
            let neighbours = *graph.neighbours(v);
            let mut extended = frame.clique;
            extended.insert(v);
            stack.push(Frame {
                clique: extended,
                cands: frame.cands & neighbours,
                nots: frame.nots & neighbours,
            });

            frame.nots.insert(v);
            frame.cands.remove(v);
            cur = remaining_cand(&frame.cands, fixp, graph);
        }
    }
}
