//! Pairwise nearness between object sets.
//!
//! Two coequal measures over the same per-object neighbourhood sub-graphs:
//!
//! - **MCE** ([`run_mce`]): build the joint graph of each pair, enumerate
//!   its maximal cliques, and reduce them into the clique-weighted balance
//!   of the two sides ([`MceAccumulator`]). Pairs whose sides never meet
//!   short-circuit to 0.
//! - **SGMD** ([`run_sgmd`]): compare degree profiles of the two sub-graphs
//!   by minimum-cost assignment ([`sgmd_score`]). No joint graph, no
//!   enumeration; cheap, but blind to cross-structure.
//!
//! The driver builds every sub-graph once, fans one task per outer object
//! index onto a fixed-size pool, and commits finished rows plus the
//! progress counter under a single lock. Results land in a
//! [`ResultMatrix`] whose lookup is symmetric with a zero diagonal.

mod driver;
mod mce;
mod sgmd;

pub use driver::{Measure, NearnessParams, ResultMatrix, run, run_mce, run_sgmd};
pub use mce::MceAccumulator;
pub use sgmd::{sgmd_score, subset_sizes};
