//! The iteration engine: selective scheduling, collision and cycle
//! handling, and the local Bron–Kerbosch step.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::state::{EdgeState, Message, Session, VertexState};
use crate::error::{CliqueError, Result};
use crate::features::Graph;
use crate::idset::IdSet;

/// Tuning knobs for a [`MessageEngine`] run.
#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    /// Upper bound on scheduler iterations. Correct runs on graphs that fit
    /// the universe never reach it; hitting it is a fatal error.
    pub max_iterations: usize,
    /// Emit isolated vertices as singleton cliques.
    pub singletons: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            singletons: false,
        }
    }
}

/// Outcome of one local Bron–Kerbosch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepOutcome {
    /// Every destination was written (or the state was terminal); the
    /// incoming message can be consumed.
    Forwarded,
    /// An out-edge was still occupied; the incoming message stays pending
    /// and the vertex retries next iteration.
    Blocked,
    /// The collision closed a blocking cycle; the incoming message moved to
    /// the session side-table for later replay.
    CycleStashed,
}

/// Vertex-local maximal-clique enumeration over a scheduled iteration model.
///
/// See the [module docs](super) for the protocol. The engine owns all
/// per-run state; dropping it discards the run.
pub struct MessageEngine<'g> {
    graph: &'g Graph,
    params: EngineParams,
    vertices: Vec<VertexState>,
    /// Directed edge records keyed by `(source, target)`.
    edges: FxHashMap<(usize, usize), EdgeState>,
    session: Session,
    /// Vertices scheduled for the next iteration.
    next: IdSet,
}

impl<'g> MessageEngine<'g> {
    /// Prepare an engine over `graph`. No work happens until [`run`].
    ///
    /// [`run`]: MessageEngine::run
    #[must_use]
    pub fn new(graph: &'g Graph, params: EngineParams) -> Self {
        Self {
            graph,
            params,
            vertices: vec![VertexState::default(); graph.len()],
            edges: FxHashMap::default(),
            session: Session::default(),
            next: IdSet::new(),
        }
    }

    /// Run the engine to quiescence and return the emitted cliques.
    ///
    /// Returns [`CliqueError::IterationLimit`] if the scheduler still has
    /// work after `max_iterations` iterations.
    pub fn run(mut self) -> Result<Vec<IdSet>> {
        let n = self.graph.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        // iteration 0: initialise vertices and edges, pick the start vertex
        self.session.start_cands = IdSet::first_n(n);
        for v in 0..n {
            self.initialize(v);
        }

        // schedule the start vertex and every non-neighbour branch seed
        if let Some(start) = self.session.start_id {
            debug!(start, degree = self.session.start_neighbours.len(), "seeding search");
            self.next.insert(start);
            self.session.start_cands.remove(start);
            for v in 0..n {
                if !self.session.start_neighbours.contains(v) && self.session.start_cands.contains(v)
                {
                    self.next.insert(v);
                }
            }
        }

        let mut iteration = 0;
        while !self.next.is_empty() {
            iteration += 1;
            if iteration >= self.params.max_iterations {
                return Err(CliqueError::IterationLimit {
                    iterations: self.params.max_iterations,
                });
            }

            let tasks = self.next;
            self.next.clear();
            trace!(iteration, scheduled = tasks.len(), "engine iteration");
            for v in tasks.iter() {
                self.update(v, iteration);
            }
        }

        debug!(
            iterations = iteration,
            cliques = self.session.results.len(),
            "engine quiesced"
        );
        Ok(self.session.results)
    }

    /// Iteration-0 work for one vertex: record its neighbourhood on itself
    /// and on each of its in-edges, and enter it into start selection.
    fn initialize(&mut self, v: usize) {
        let neighbours = *self.graph.neighbours(v);
        if neighbours.is_empty() {
            // never a branch seed; emits itself when singletons are wanted
            self.session.start_cands.remove(v);
            if self.params.singletons {
                let clique: IdSet = [v].into_iter().collect();
                self.session.results.push(clique);
            }
            return;
        }

        self.vertices[v].neighbours = neighbours;
        self.vertices[v].neighbours_known = true;
        for u in neighbours.iter() {
            self.edges.insert((u, v), EdgeState::new(neighbours));
        }

        // strict > keeps the first writer at equal degree
        let best = self
            .session
            .start_id
            .map(|_| self.session.start_neighbours.len());
        if best.is_none_or(|b| neighbours.len() > b) {
            self.session.start_id = Some(v);
            self.session.start_neighbours = neighbours;
        }
    }

    /// Per-iteration work for one scheduled vertex.
    fn update(&mut self, v: usize, iteration: usize) {
        if iteration == 1 && !self.session.start_neighbours.contains(v) {
            self.start(v);
        }
        self.handle_messages(v);
    }

    /// Neighbourhood of `v`: the vertex record when initialisation filled
    /// it, recomputed from the graph otherwise.
    fn neighbours(&self, v: usize) -> IdSet {
        let state = &self.vertices[v];
        if state.neighbours_known {
            state.neighbours
        } else {
            *self.graph.neighbours(v)
        }
    }

    /// Seed an independent search branch at `v`.
    fn start(&mut self, v: usize) {
        let neighbours = self.neighbours(v);
        let msg = if Some(v) == self.session.start_id {
            // the first branch considers the whole neighbourhood
            Message {
                clique: IdSet::new(),
                cands: neighbours,
                nots: IdSet::new(),
            }
        } else {
            // later branches exclude neighbours whose branch already ran
            let cands = neighbours & self.session.start_cands;
            let nots = !self.session.start_cands & neighbours;
            self.session.start_cands.remove(v);
            Message {
                clique: IdSet::new(),
                cands,
                nots,
            }
        };

        let outcome = self.local_step(v, msg, IdSet::new(), true);
        // a start is this vertex's first step, so none of its out-edges can
        // hold a pending message yet
        debug_assert_eq!(outcome, StepOutcome::Forwarded);
    }

    /// Replay stashed cycle messages, then consume pending in-edge
    /// messages; reschedule according to what remains.
    fn handle_messages(&mut self, v: usize) {
        if self.vertices[v].cycles > 0 {
            self.replay_cycle_messages(v);
        }

        let mut collision = false;
        let sources = self.neighbours(v);
        for u in sources.iter() {
            let Some(edge) = self.edges.get(&(u, v)) else {
                continue;
            };
            let Some(msg) = edge.message else {
                continue;
            };
            let trace = edge.block_trace;

            match self.local_step(v, msg, trace, true) {
                StepOutcome::Forwarded => {
                    self.edge_mut(u, v).message = None;
                }
                StepOutcome::CycleStashed => {
                    // the message now lives in the side-table
                    self.edge_mut(u, v).message = None;
                    collision = true;
                }
                StepOutcome::Blocked => {
                    collision = true;
                }
            }
        }

        if collision || self.vertices[v].cycles > 0 {
            self.next.insert(v);
        } else {
            // a sender this iteration may have scheduled us already
            self.next.remove(v);
        }
    }

    /// Attempt every side-table message tagged for `v`.
    fn replay_cycle_messages(&mut self, v: usize) {
        let mut i = 0;
        while i < self.session.cycle_messages.len() {
            if self.session.cycle_messages[i].0 != v {
                i += 1;
                continue;
            }
            let msg = self.session.cycle_messages[i].1;
            // replays carry no in-edge, so collisions leave traces alone
            if self.local_step(v, msg, IdSet::new(), false) == StepOutcome::Forwarded {
                self.session.cycle_messages.remove(i);
                self.vertices[v].cycles -= 1;
                if self.vertices[v].cycles == 0 {
                    break;
                }
            } else {
                i += 1;
            }
        }
    }

    /// The local Bron–Kerbosch step.
    ///
    /// Extends the message's clique with `v`, then either emits (terminal
    /// state) or selects the pivot and destination set and writes one
    /// successor message per destination. `block_trace` is the incoming
    /// edge's trace; `from_edge` is false for side-table replays, which must
    /// not touch traces on collision.
    fn local_step(
        &mut self,
        v: usize,
        msg: Message,
        block_trace: IdSet,
        from_edge: bool,
    ) -> StepOutcome {
        let mut clique = msg.clique;
        clique.insert(v);
        let mut cands = msg.cands;
        let mut nots = msg.nots;

        if cands.is_empty() {
            // maximal iff no explored vertex could extend it
            if nots.is_empty() {
                trace!(vertex = v, clique = %clique, "clique found");
                self.session.results.push(clique);
            }
            return StepOutcome::Forwarded;
        }

        let orig_cands = cands;

        // pivot selection over the mirrored target neighbourhoods;
        // >= keeps the greatest id at equal score
        let mut fixp = None;
        let mut fixp_score = 0;
        for w in cands.iter() {
            let score = (cands & self.edge(v, w).target_neighbours).len();
            if fixp.is_none() || score >= fixp_score {
                fixp = Some(w);
                fixp_score = score;
            }
        }
        let Some(fixp) = fixp else {
            return StepOutcome::Forwarded;
        };
        let fixp_neighbours = self.edge(v, fixp).target_neighbours;

        // collect destinations: the pivot plus candidates outside its
        // neighbourhood, abandoning the step on the first collision
        let mut destinations = IdSet::new();
        let mut cur = Some(fixp);
        while let Some(w) = cur {
            if self.edge(v, w).message.is_some() {
                trace!(vertex = v, blocked_at = w, "collision");
                if from_edge {
                    if block_trace.contains(v) {
                        // the blockage loops back to us: break the deadlock
                        // by parking the message in the side-table
                        debug!(vertex = v, "cycle detected, stashing message");
                        self.session.cycle_messages.push((v, msg));
                        self.vertices[v].cycles += 1;
                        self.edge_mut(v, w).block_trace.clear();
                        return StepOutcome::CycleStashed;
                    }
                    let edge = self.edge_mut(v, w);
                    edge.block_trace |= block_trace;
                    edge.block_trace.insert(v);
                }
                return StepOutcome::Blocked;
            }

            destinations.insert(w);
            cands.remove(w);
            cur = cands.iter().find(|&c| !fixp_neighbours.contains(c));
        }

        // forward: every destination gets the successor state it would have
        // received from the recursive form, with the exclusion set growing
        // as destinations are consumed
        cands = orig_cands;
        for w in destinations.iter() {
            let target_neighbours = self.edge(v, w).target_neighbours;
            let successor = Message {
                clique,
                cands: cands & target_neighbours,
                nots: nots & target_neighbours,
            };

            self.next.insert(w);
            nots.insert(w);
            cands.remove(w);

            let edge = self.edge_mut(v, w);
            // a stale trace from an earlier blockage must not fake a cycle
            edge.block_trace.clear();
            edge.message = Some(successor);
        }
        StepOutcome::Forwarded
    }

    fn edge(&self, u: usize, v: usize) -> &EdgeState {
        &self.edges[&(u, v)]
    }

    fn edge_mut(&mut self, u: usize, v: usize) -> &mut EdgeState {
        self.edges.get_mut(&(u, v)).expect("edge records exist for every graph edge")
    }
}
