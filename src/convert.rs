//! On-disk adjacency cache for the single-graph tool.
//!
//! Converting a feature file into its neighbourhood graph is O(n²·f); the
//! single-graph tool therefore persists the converted graph next to its
//! source as `<input>_e<epsilon>_f<features>` and reuses it on later runs.
//! A cache older than its source is considered stale and rebuilt, unless
//! the modification-time check is disabled.
//!
//! Format: one line per vertex, `id \t degree \t neighbours…`, all fields
//! tab-separated with neighbour ids ascending.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CliqueError, Result};
use crate::features::{Graph, read_features};
use crate::idset::{IdSet, MAX_VERTICES};

/// Cache path derived from the source file and the build parameters, so
/// differently-parameterised graphs never shadow each other.
#[must_use]
pub fn cache_name(input: &Path, epsilon: f32, num_features: usize) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(format!("_e{epsilon}_f{num_features}"));
    PathBuf::from(name)
}

/// True when the cache must be rebuilt: missing, unreadable, or older than
/// its source.
#[must_use]
pub fn is_stale(source: &Path, cache: &Path) -> bool {
    let (Ok(src), Ok(cached)) = (fs::metadata(source), fs::metadata(cache)) else {
        return true;
    };
    match (src.modified(), cached.modified()) {
        (Ok(s), Ok(c)) => s > c,
        // no mtimes on this platform: keep the cache
        _ => false,
    }
}

/// Write `graph` to `path` in the adjacency-list cache format.
pub fn write_adjacency(path: &Path, graph: &Graph) -> Result<()> {
    let file = File::create(path).map_err(|e| CliqueError::io(path, e))?;
    let mut out = BufWriter::new(file);
    for (id, row) in graph.rows().iter().enumerate() {
        writeln!(out, "{id}\t{}\t{row}", row.len()).map_err(|e| CliqueError::io(path, e))?;
    }
    out.flush().map_err(|e| CliqueError::io(path, e))
}

/// Parse an adjacency-list cache back into a graph.
pub fn read_adjacency(path: &Path) -> Result<Graph> {
    let file = File::open(path).map_err(|e| CliqueError::io(path, e))?;
    let reader = BufReader::new(file);

    let parse_err = |line: usize, text: &str| CliqueError::Parse {
        path: path.to_path_buf(),
        line,
        text: text.to_string(),
    };

    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliqueError::io(path, e))?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');

        let id: usize = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| parse_err(idx + 1, &line))?;
        if id != rows.len() || id >= MAX_VERTICES {
            return Err(parse_err(idx + 1, &line));
        }

        let degree: usize = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| parse_err(idx + 1, &line))?;

        let mut row = IdSet::new();
        for field in fields.filter(|f| !f.is_empty()) {
            let neighbour: usize = field
                .parse()
                .ok()
                .filter(|&v| v < MAX_VERTICES)
                .ok_or_else(|| parse_err(idx + 1, &line))?;
            row.insert(neighbour);
        }
        if row.len() != degree {
            return Err(parse_err(idx + 1, &line));
        }
        rows.push(row);
    }
    Ok(Graph::from_rows(rows))
}

/// Load the converted graph for `input`, rebuilding the cache when forced,
/// missing, or stale.
///
/// Returns the graph and the cache path (which also names the tool's
/// default output). `check_modtime` disables the staleness comparison when
/// false; `force` rebuilds unconditionally.
pub fn convert_cached(
    input: &Path,
    epsilon: f32,
    num_features: usize,
    check_modtime: bool,
    force: bool,
) -> Result<(Graph, PathBuf)> {
    let cache = cache_name(input, epsilon, num_features);

    let rebuild = force || !cache.exists() || (check_modtime && is_stale(input, &cache));
    if rebuild {
        info!(input = %input.display(), cache = %cache.display(), "converting features");
        let features = read_features(input)?;
        let graph = Graph::from_features(&features, epsilon, num_features)?;
        write_adjacency(&cache, &graph)?;
        Ok((graph, cache))
    } else {
        debug!(cache = %cache.display(), "reusing converted graph");
        Ok((read_adjacency(&cache)?, cache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        let mut graph = Graph::with_vertices(4).unwrap();
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph
    }

    #[test]
    fn cache_name_encodes_parameters() {
        let name = cache_name(Path::new("data/set1"), 0.25, 3);
        assert_eq!(name, PathBuf::from("data/set1_e0.25_f3"));
    }

    #[test]
    fn adjacency_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph");
        let graph = sample_graph();
        write_adjacency(&path, &graph).unwrap();
        assert_eq!(read_adjacency(&path).unwrap(), graph);
    }

    #[test]
    fn isolated_vertices_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph");
        let graph = Graph::with_vertices(2).unwrap();
        write_adjacency(&path, &graph).unwrap();
        let back = read_adjacency(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.edge_count(), 0);
    }

    #[test]
    fn degree_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph");
        fs::write(&path, "0\t2\t1\n1\t1\t0\n").unwrap();
        let err = read_adjacency(&path).unwrap_err();
        assert!(matches!(err, CliqueError::Parse { line: 1, .. }));
    }

    #[test]
    fn missing_cache_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::write(&source, "0.0\n").unwrap();
        assert!(is_stale(&source, &dir.path().join("absent")));
    }

    #[test]
    fn convert_rebuilds_only_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("features");
        fs::write(&input, "0.0\n0.05\n").unwrap();

        let (graph, cache) = convert_cached(&input, 0.1, 1, true, false).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(cache.exists());

        // poison the cache; without a newer source it is reused as-is
        fs::write(&cache, "0\t0\t\n").unwrap();
        let (reused, _) = convert_cached(&input, 0.1, 1, true, false).unwrap();
        assert_eq!(reused.len(), 1);

        // forcing a rebuild restores the real graph
        let (rebuilt, _) = convert_cached(&input, 0.1, 1, true, true).unwrap();
        assert_eq!(rebuilt.edge_count(), 1);
    }
}
