//! Error types for propinquity.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading features, building graphs, or
/// enumerating cliques.
#[derive(Debug, Error)]
pub enum CliqueError {
    /// Underlying I/O failure, tagged with the file involved.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A feature or cache file contained a line that does not parse.
    #[error("{}:{}: cannot parse {:?}", .path.display(), .line, .text)]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
    },

    /// Feature count is not a multiple of the per-object dimension.
    #[error("{len} feature values is not a multiple of {features} features per object")]
    FeatureCount { len: usize, features: usize },

    /// The graph needs more vertices than the fixed id universe addresses.
    #[error("graph needs {vertices} vertices but the id universe holds {max}")]
    UniverseExceeded { vertices: usize, max: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The messaging engine hit its iteration bound with work outstanding.
    #[error("scheduler did not quiesce within {iterations} iterations")]
    IterationLimit { iterations: usize },
}

impl CliqueError {
    /// Attach a path to a bare I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliqueError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for propinquity operations.
pub type Result<T> = std::result::Result<T, CliqueError>;
