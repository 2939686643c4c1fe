//! Input expansion: feature files and directories of them.
//!
//! Positional CLI arguments may name files or directories; directories are
//! walked recursively with entries visited in *natural* alphanumeric order,
//! so `set2` loads before `set10` and object indices stay meaningful across
//! runs.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{CliqueError, Result};
use crate::features::read_features;

/// A maximal run of digits or of non-digits within a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    fn raw(&self) -> &'a str {
        match self {
            Segment::Number(s) | Segment::Text(s) => s,
        }
    }
}

/// Split a name into digit and non-digit runs.
fn segments(s: &str) -> SmallVec<[Segment<'_>; 8]> {
    let mut out = SmallVec::new();
    let bytes = s.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        let digits = bytes[start].is_ascii_digit();
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() == digits {
            end += 1;
        }
        let run = &s[start..end];
        out.push(if digits {
            Segment::Number(run)
        } else {
            Segment::Text(run)
        });
        start = end;
    }
    out
}

/// Natural-order comparison: digit runs compare by numeric value, so
/// `file2` precedes `file10`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let sa = segments(a);
    let sb = segments(b);
    for (x, y) in sa.iter().zip(sb.iter()) {
        let ord = match (x, y) {
            (Segment::Number(n), Segment::Number(m)) => {
                // compare magnitudes without parsing: more significant
                // digits win, equal lengths fall back to lexicographic
                let n = n.trim_start_matches('0');
                let m = m.trim_start_matches('0');
                n.len().cmp(&m.len()).then_with(|| n.cmp(m))
            }
            _ => x.raw().cmp(y.raw()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    sa.len().cmp(&sb.len()).then_with(|| a.cmp(b))
}

/// Load every object set named by `inputs`, recursing into directories.
///
/// Each regular file becomes one object set; directory entries are visited
/// in natural order. Missing paths are errors.
pub fn collect_objects(inputs: &[PathBuf]) -> Result<Vec<Vec<f32>>> {
    let mut objects = Vec::new();
    for path in inputs {
        expand(path, &mut objects)?;
    }
    debug!(objects = objects.len(), "collected object sets");
    Ok(objects)
}

fn expand(path: &Path, objects: &mut Vec<Vec<f32>>) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| CliqueError::io(path, e))?;
    if meta.is_file() {
        objects.push(read_features(path)?);
        return Ok(());
    }
    if meta.is_dir() {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| CliqueError::io(path, e))? {
            entries.push(entry.map_err(|e| CliqueError::io(path, e))?.path());
        }
        entries.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
        for entry in &entries {
            expand(entry, objects)?;
        }
        return Ok(());
    }
    Err(CliqueError::io(
        path,
        io::Error::other("neither a regular file nor a directory"),
    ))
}
