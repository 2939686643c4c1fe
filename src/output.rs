//! Line-oriented writers for clique listings and nearness matrices.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{CliqueError, Result};
use crate::idset::IdSet;
use crate::nearness::ResultMatrix;

/// Write one clique per line as tab-separated ascending vertex ids.
///
/// With `sort` enabled the listing is ordered by the clique ordering
/// (smaller cliques first, then by first differing vertex); otherwise the
/// given discovery order is preserved.
pub fn write_cliques<W: Write>(out: &mut W, cliques: &[IdSet], sort: bool) -> io::Result<()> {
    if sort {
        let mut sorted = cliques.to_vec();
        sorted.sort();
        for clique in &sorted {
            writeln!(out, "{clique}")?;
        }
    } else {
        for clique in cliques {
            writeln!(out, "{clique}")?;
        }
    }
    Ok(())
}

/// Write a clique listing to `path`, truncating any previous file.
pub fn write_cliques_to_path(path: &Path, cliques: &[IdSet], sort: bool) -> Result<()> {
    let file = File::create(path).map_err(|e| CliqueError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_cliques(&mut out, cliques, sort).map_err(|e| CliqueError::io(path, e))?;
    out.flush().map_err(|e| CliqueError::io(path, e))
}

/// Write every ordered pair as `i \t j \t value` lines.
///
/// The matrix stores the upper triangle; both orders of a pair print the
/// same value, so consumers can treat the listing as a dense matrix.
pub fn write_nearness<W: Write>(out: &mut W, matrix: &ResultMatrix) -> io::Result<()> {
    let n = matrix.len();
    for i in 0..n {
        for j in 0..n {
            writeln!(out, "{i}\t{j}\t{}", matrix.get(i, j))?;
        }
    }
    Ok(())
}

/// Write a nearness listing to `path`, truncating any previous file.
pub fn write_nearness_to_path(path: &Path, matrix: &ResultMatrix) -> Result<()> {
    let file = File::create(path).map_err(|e| CliqueError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_nearness(&mut out, matrix).map_err(|e| CliqueError::io(path, e))?;
    out.flush().map_err(|e| CliqueError::io(path, e))
}
