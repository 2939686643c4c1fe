//! propinquity: maximal-clique nearness between feature-vector object sets.
//!
//! Builds ε-neighbourhood graphs over real-valued feature vectors,
//! enumerates their maximal cliques, and reduces the cliques of pairwise
//! joint graphs into a scalar nearness score.
//!
//! # Pipeline
//!
//! ```text
//! features ──► per-object neighbourhoods ──► joint graph (per pair)
//!     ──► maximal cliques ──► reducer ──► N×N nearness matrix
//! ```
//!
//! Points are adjacent when their squared Euclidean distance is strictly
//! below ε²; the maximal cliques of the resulting graph are the densest
//! structures the threshold admits, and the [`nearness`] reducers turn
//! them into a pairwise score.
//!
//! # Which Enumerator Should I Use?
//!
//! | Situation | Recommendation |
//! |-----------|----------------|
//! | Default | [`enumerate::enumerate`] (recursive, pivoted) |
//! | Deep graphs, bounded thread stack | [`enumerate::enumerate_iterative`] |
//! | Vertex-local / message-passing execution | [`messaging::MessageEngine`] |
//!
//! All three emit the same clique set on the same graph; only the emission
//! order differs. Sort with the [`idset::IdSet`] ordering when stable
//! output matters.
//!
//! # Quick Start
//!
//! ```
//! use propinquity::enumerate;
//! use propinquity::features::Graph;
//!
//! # fn main() -> propinquity::Result<()> {
//! // three points on a line; the outer pair is beyond ε
//! let graph = Graph::from_features(&[0.0, 0.1, 0.2], 0.15, 1)?;
//! let cliques = enumerate::maximal_cliques(&graph);
//! assert_eq!(cliques.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod enumerate;
pub mod error;
pub mod features;
pub mod idset;
pub mod inputs;
pub mod messaging;
pub mod nearness;
pub mod output;
pub mod synthetic;

pub use error::{CliqueError, Result};
pub use idset::{IdSet, MAX_VERTICES};
