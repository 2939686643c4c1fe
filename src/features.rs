//! Feature loading and ε-neighbourhood graph construction.
//!
//! Objects are rows of `f` feature values stored flat in row-major order,
//! the same structure-of-arrays layout the rest of the crate slices with
//! [`object_row`]. Two objects are neighbours when the squared Euclidean
//! distance between their rows is strictly below ε²; the resulting
//! [`Graph`] is symmetric and irreflexive by construction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CliqueError, Result};
use crate::idset::{IdSet, MAX_VERTICES};

/// Slice one object's feature row out of flat row-major storage.
#[inline]
#[must_use]
pub fn object_row(features: &[f32], num_features: usize, idx: usize) -> &[f32] {
    let start = idx * num_features;
    &features[start..start + num_features]
}

/// Squared Euclidean distance between two feature rows.
#[inline]
#[must_use]
pub fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Read one feature value per line from `path`.
///
/// Blank lines are ignored, so trailing newlines do not produce phantom
/// zero-valued features.
pub fn read_features(path: &Path) -> Result<Vec<f32>> {
    let file = File::open(path).map_err(|e| CliqueError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliqueError::io(path, e))?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value = text.parse::<f32>().map_err(|_| CliqueError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            text: text.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Symmetric, irreflexive neighbourhood graph over dense vertex ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    rows: Vec<IdSet>,
}

impl Graph {
    /// Empty graph with `n` isolated vertices.
    pub fn with_vertices(n: usize) -> Result<Self> {
        if n > MAX_VERTICES {
            return Err(CliqueError::UniverseExceeded {
                vertices: n,
                max: MAX_VERTICES,
            });
        }
        Ok(Self {
            rows: vec![IdSet::new(); n],
        })
    }

    /// Rebuild a graph from adjacency rows (used by the cache reader).
    #[must_use]
    pub fn from_rows(rows: Vec<IdSet>) -> Self {
        Self { rows }
    }

    /// Build the ε-neighbourhood graph of one object set.
    ///
    /// `features` is flat row-major storage with `num_features` values per
    /// object; objects `i` and `j` become neighbours iff the squared distance
    /// between their rows is strictly less than `epsilon²`.
    pub fn from_features(features: &[f32], epsilon: f32, num_features: usize) -> Result<Self> {
        if num_features == 0 {
            return Err(CliqueError::InvalidParameter(
                "features per object must be greater than 0".into(),
            ));
        }
        if !(epsilon > 0.0) {
            return Err(CliqueError::InvalidParameter(format!(
                "epsilon must be greater than 0, got {epsilon}"
            )));
        }
        if features.len() % num_features != 0 {
            return Err(CliqueError::FeatureCount {
                len: features.len(),
                features: num_features,
            });
        }

        let n = features.len() / num_features;
        let mut graph = Self::with_vertices(n)?;

        let sqr_epsilon = epsilon * epsilon;
        for i in 0..n {
            for j in i + 1..n {
                let d = squared_distance(
                    object_row(features, num_features, i),
                    object_row(features, num_features, j),
                );
                if d < sqr_epsilon {
                    graph.add_edge(i, j);
                }
            }
        }

        debug!(
            vertices = n,
            edges = graph.edge_count(),
            "built neighbourhood graph"
        );
        Ok(graph)
    }

    /// Combine two per-object sub-graphs into the joint graph over the
    /// disjoint union of their vertices, computing only the cross edges.
    ///
    /// Vertices `0..n_a` are side A unchanged; side B's rows are shifted up
    /// by `n_a`. The second return value is the *meet* flag: true iff at
    /// least one cross edge exists. When it is false no clique can span
    /// both sides and callers can skip enumeration outright.
    pub fn combine(
        features_a: &[f32],
        features_b: &[f32],
        graph_a: &Graph,
        graph_b: &Graph,
        epsilon: f32,
        num_features: usize,
    ) -> Result<(Graph, bool)> {
        for features in [features_a, features_b] {
            if features.len() % num_features != 0 {
                return Err(CliqueError::FeatureCount {
                    len: features.len(),
                    features: num_features,
                });
            }
        }

        let n_a = features_a.len() / num_features;
        let n_b = features_b.len() / num_features;
        let n = n_a + n_b;
        if n > MAX_VERTICES {
            return Err(CliqueError::UniverseExceeded {
                vertices: n,
                max: MAX_VERTICES,
            });
        }

        let mut rows = Vec::with_capacity(n);
        rows.extend_from_slice(&graph_a.rows[..n_a]);
        rows.extend(graph_b.rows[..n_b].iter().map(|row| *row << n_a));

        let mut meet = false;
        let sqr_epsilon = epsilon * epsilon;
        for i in 0..n_a {
            for j in 0..n_b {
                let d = squared_distance(
                    object_row(features_a, num_features, i),
                    object_row(features_b, num_features, j),
                );
                if d < sqr_epsilon {
                    rows[i].insert(n_a + j);
                    rows[n_a + j].insert(i);
                    meet = true;
                }
            }
        }

        Ok((Graph { rows }, meet))
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the graph has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Open neighbourhood of `v`.
    #[inline]
    #[must_use]
    pub fn neighbours(&self, v: usize) -> &IdSet {
        &self.rows[v]
    }

    /// All adjacency rows, indexed by vertex id.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[IdSet] {
        &self.rows
    }

    /// Insert the undirected edge `u - v`.
    ///
    /// # Panics
    ///
    /// Panics on self-loops; the graph is irreflexive by contract.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u != v, "neighbourhood graphs carry no self-loops");
        self.rows[u].insert(v);
        self.rows[v].insert(u);
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(IdSet::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn squared_distance_matches_hand_computation() {
        let a = [0.0_f32, 0.0];
        let b = [0.3_f32, 0.4];
        assert!((squared_distance(&a, &b) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn graph_is_symmetric_and_irreflexive() {
        // 1-d objects at 0, 0.1, 0.2 with ε = 0.15: only consecutive pairs touch
        let graph = Graph::from_features(&[0.0, 0.1, 0.2], 0.15, 1).unwrap();
        assert_eq!(graph.len(), 3);
        for v in 0..graph.len() {
            assert!(!graph.neighbours(v).contains(v));
            for u in graph.neighbours(v).iter() {
                assert!(graph.neighbours(u).contains(v));
            }
        }
        assert!(graph.neighbours(0).contains(1));
        assert!(!graph.neighbours(0).contains(2));
        assert!(graph.neighbours(2).contains(1));
    }

    #[test]
    fn threshold_is_strict() {
        // distance exactly ε must not produce an edge
        let graph = Graph::from_features(&[0.0, 0.1], 0.1, 1).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn rejects_ragged_feature_counts() {
        let err = Graph::from_features(&[0.0, 1.0, 2.0], 0.5, 2).unwrap_err();
        assert!(matches!(err, CliqueError::FeatureCount { len: 3, features: 2 }));
    }

    #[test]
    fn combine_shifts_and_crosses() {
        let a = vec![0.0_f32, 0.05];
        let b = vec![0.06_f32, 1.0];
        let ga = Graph::from_features(&a, 0.1, 1).unwrap();
        let gb = Graph::from_features(&b, 0.1, 1).unwrap();
        let (joint, meet) = Graph::combine(&a, &b, &ga, &gb, 0.1, 1).unwrap();

        assert!(meet);
        assert_eq!(joint.len(), 4);
        // side A edge survives, side B pair is too far apart
        assert!(joint.neighbours(0).contains(1));
        assert!(!joint.neighbours(2).contains(3));
        // cross edges: 0–2 (0.06 apart) and 1–2 (0.01 apart)
        assert!(joint.neighbours(0).contains(2));
        assert!(joint.neighbours(2).contains(1));
        assert!(!joint.neighbours(3).contains(0));
    }

    #[test]
    fn combine_reports_disjoint_sides() {
        let a = vec![0.0_f32];
        let b = vec![100.0_f32];
        let ga = Graph::from_features(&a, 1.0, 1).unwrap();
        let gb = Graph::from_features(&b, 1.0, 1).unwrap();
        let (joint, meet) = Graph::combine(&a, &b, &ga, &gb, 1.0, 1).unwrap();
        assert!(!meet);
        assert_eq!(joint.edge_count(), 0);
    }

    #[test]
    fn read_features_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5\n1.25\n\n-3.0\n").unwrap();
        let values = read_features(file.path()).unwrap();
        assert_eq!(values, vec![0.5, 1.25, -3.0]);
    }

    #[test]
    fn read_features_reports_bad_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5\nnot-a-number").unwrap();
        let err = read_features(file.path()).unwrap_err();
        assert!(matches!(err, CliqueError::Parse { line: 2, .. }));
    }
}
