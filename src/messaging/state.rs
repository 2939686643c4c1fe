//! Per-vertex, per-edge, and per-run state for the messaging engine.

use crate::idset::IdSet;

/// A Bron–Kerbosch search state in transit on a directed edge.
///
/// The target extends `clique` with itself and continues the search over
/// `cands` (candidates) and `nots` (already-explored exclusions). A pending
/// message occupies its edge until consumed; [`EdgeState::message`] being
/// `Some` is the "valid" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub clique: IdSet,
    pub cands: IdSet,
    pub nots: IdSet,
}

/// Storage for one directed edge `(source, target)`.
///
/// Edges are indexed by id pair in the engine's map; they hold no pointers
/// back into vertex records.
#[derive(Debug, Clone)]
pub(crate) struct EdgeState {
    /// The target's neighbourhood, mirrored here during initialisation so
    /// the source can compute pivot scores and successor states locally.
    pub target_neighbours: IdSet,
    /// In-flight message, pending until the target consumes it.
    pub message: Option<Message>,
    /// Vertices that failed to forward through this edge while it was
    /// occupied; a trace that reaches back to the writer marks a deadlock
    /// cycle.
    pub block_trace: IdSet,
}

impl EdgeState {
    pub fn new(target_neighbours: IdSet) -> Self {
        Self {
            target_neighbours,
            message: None,
            block_trace: IdSet::new(),
        }
    }
}

/// Storage for one vertex.
#[derive(Debug, Clone, Default)]
pub(crate) struct VertexState {
    /// Open neighbourhood, filled in during initialisation.
    pub neighbours: IdSet,
    /// Whether initialisation has run for this vertex.
    pub neighbours_known: bool,
    /// Number of this vertex's messages parked in the cycle side-table.
    pub cycles: u32,
}

/// State owned by one enumeration run.
///
/// The concurrent rendition of this engine guards each field with its own
/// mutex; the deterministic engine owns the session outright. Nothing here
/// is module-level: every run starts from a fresh session.
#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Cliques emitted so far, in emission order.
    pub results: Vec<IdSet>,
    /// Cycle side-table: messages removed from their edges to break a
    /// deadlock, tagged with the vertex that must replay them.
    pub cycle_messages: Vec<(usize, Message)>,
    /// Vertex chosen to seed the search (largest neighbourhood).
    pub start_id: Option<usize>,
    /// The start vertex's neighbourhood.
    pub start_neighbours: IdSet,
    /// Vertices that may still seed an independent branch. Consumed
    /// left-to-right as branches start.
    pub start_cands: IdSet,
}
