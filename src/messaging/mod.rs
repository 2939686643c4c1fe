//! Vertex-local maximal-clique enumeration.
//!
//! The same Bron–Kerbosch search as [`crate::enumerate`], recast as a
//! message-passing computation: instead of recursing, a vertex that extends
//! a clique writes the successor search states onto its out-edges, and the
//! receiving vertices continue from there under a selective scheduler.
//! This is the shape the search takes on graph-parallel engines, where a
//! vertex only ever touches its own record and the records of its incident
//! edges.
//!
//! # Protocol
//!
//! - **Iteration 0** initialises per-vertex and per-edge state and selects
//!   the start vertex (largest neighbourhood).
//! - **Iteration 1** seeds the search: the start vertex and every
//!   non-neighbour of it still in the start pool begin an independent
//!   branch. Consuming a start removes it from the pool, so later branches
//!   see earlier starts in their exclusion set.
//! - **Iterations ≥ 1** replay any stashed cycle messages, then consume
//!   pending in-edge messages through the local Bron–Kerbosch step, which
//!   forwards new messages and schedules their targets.
//!
//! A message stays on its edge until the target consumes it. Writing onto
//! an edge whose message is still pending is a *collision*: the current
//! message is left in place, the vertex records itself in the out-edge's
//! block trace, and the scheduler retries next iteration. A block trace
//! that loops back to the current vertex is a deadlock *cycle*; the message
//! is moved to a session side-table and replayed once the congestion
//! clears.
//!
//! The engine runs its iterations deterministically (scheduled vertices in
//! ascending id order), so collision and cycle handling is reproducible
//! and the emitted clique set always equals the recursive enumerator's.

mod engine;
mod state;

pub use engine::{EngineParams, MessageEngine};
pub use state::Message;

use crate::error::Result;
use crate::features::Graph;
use crate::idset::IdSet;

/// Enumerate the maximal cliques of `graph` with the messaging engine.
///
/// Convenience wrapper over [`MessageEngine`]; the returned order is the
/// engine's emission order, not sorted.
pub fn maximal_cliques(graph: &Graph, params: EngineParams) -> Result<Vec<IdSet>> {
    MessageEngine::new(graph, params).run()
}
