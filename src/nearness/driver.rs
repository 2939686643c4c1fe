//! The pairwise driver and its task pool.

use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, info};

use super::mce::MceAccumulator;
use super::sgmd::{sgmd_score, subset_sizes};
use crate::enumerate;
use crate::error::{CliqueError, Result};
use crate::features::Graph;

/// Which nearness measure to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Maximal-clique enumeration over pairwise joint graphs.
    Mce,
    /// Assignment distance between neighbourhood-size profiles.
    Sgmd,
}

/// Parameters for one pairwise nearness run.
#[derive(Debug, Clone, Copy)]
pub struct NearnessParams {
    /// Neighbourhood radius; points closer than this are adjacent.
    pub epsilon: f32,
    /// Feature values per point.
    pub num_features: usize,
    /// Count singleton cliques in the MCE reduction.
    pub singletons: bool,
    /// Worker threads; 1 runs every task on the caller.
    pub threads: usize,
}

/// Upper-triangular pairwise result matrix with symmetric lookup.
#[derive(Debug, Clone)]
pub struct ResultMatrix {
    rows: Vec<Vec<f32>>,
}

impl ResultMatrix {
    /// Number of object sets compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no object sets were compared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Nearness of the pair `(i, j)`; the stored triangle serves both
    /// orders, and the diagonal is 0 by definition.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.rows[i.min(j)][i.max(j)]
    }
}

/// Row buffers and the progress counter, committed under one lock.
struct Progress {
    rows: Vec<Vec<f32>>,
    completed: usize,
}

/// Run the selected measure over every unordered pair of object sets.
pub fn run(measure: Measure, objects: &[Vec<f32>], params: NearnessParams) -> Result<ResultMatrix> {
    match measure {
        Measure::Mce => run_mce(objects, params),
        Measure::Sgmd => run_sgmd(objects, params),
    }
}

/// Pairwise nearness through joint-graph maximal-clique enumeration.
pub fn run_mce(objects: &[Vec<f32>], params: NearnessParams) -> Result<ResultMatrix> {
    validate(&params)?;
    let partial_graphs = build_partial_graphs(objects, &params)?;
    info!(
        objects = objects.len(),
        threads = params.threads,
        "computing mce nearness"
    );

    let n = objects.len();
    let total = n * (n + 1) / 2;
    let shared = Mutex::new(Progress {
        rows: vec![Vec::new(); n],
        completed: 0,
    });

    let task = |i: usize| -> Result<()> {
        let mut row = vec![0.0_f32; n];
        for j in i + 1..n {
            let (joint, meet) = Graph::combine(
                &objects[i],
                &objects[j],
                &partial_graphs[i],
                &partial_graphs[j],
                params.epsilon,
                params.num_features,
            )?;
            // disjoint sides share no clique, so their nearness is 0
            row[j] = if meet {
                let mut acc = MceAccumulator::new(partial_graphs[i].len(), params.singletons);
                enumerate::enumerate(&joint, |clique| acc.add(clique));
                acc.value()
            } else {
                0.0
            };
        }
        commit_row(&shared, i, row, n, total);
        Ok(())
    };

    run_tasks(n, params.threads, task)?;

    let progress = shared.into_inner().expect("results lock");
    Ok(ResultMatrix {
        rows: progress.rows,
    })
}

/// Pairwise nearness through degree-profile assignment.
pub fn run_sgmd(objects: &[Vec<f32>], params: NearnessParams) -> Result<ResultMatrix> {
    validate(&params)?;
    let partial_graphs = build_partial_graphs(objects, &params)?;
    let profiles: Vec<Vec<i64>> = partial_graphs.iter().map(subset_sizes).collect();
    info!(
        objects = objects.len(),
        threads = params.threads,
        "computing sgmd nearness"
    );

    let n = objects.len();
    let total = n * (n + 1) / 2;
    let shared = Mutex::new(Progress {
        rows: vec![Vec::new(); n],
        completed: 0,
    });

    let task = |i: usize| -> Result<()> {
        let mut row = vec![0.0_f32; n];
        for j in i + 1..n {
            row[j] = sgmd_score(&profiles[i], &profiles[j]);
        }
        commit_row(&shared, i, row, n, total);
        Ok(())
    };

    run_tasks(n, params.threads, task)?;

    let progress = shared.into_inner().expect("results lock");
    Ok(ResultMatrix {
        rows: progress.rows,
    })
}

fn validate(params: &NearnessParams) -> Result<()> {
    if params.num_features == 0 {
        return Err(CliqueError::InvalidParameter(
            "features per object must be greater than 0".into(),
        ));
    }
    if !(params.epsilon > 0.0) {
        return Err(CliqueError::InvalidParameter(format!(
            "epsilon must be greater than 0, got {}",
            params.epsilon
        )));
    }
    if params.threads == 0 {
        return Err(CliqueError::InvalidParameter(
            "at least one worker thread is required".into(),
        ));
    }
    Ok(())
}

/// Build every per-object sub-graph once; they are shared read-only across
/// all pair tasks.
fn build_partial_graphs(objects: &[Vec<f32>], params: &NearnessParams) -> Result<Vec<Graph>> {
    objects
        .iter()
        .map(|features| Graph::from_features(features, params.epsilon, params.num_features))
        .collect()
}

/// Commit a finished row and bump the progress counter. This is the only
/// lock in the pipeline; nothing expensive happens while holding it.
fn commit_row(shared: &Mutex<Progress>, i: usize, row: Vec<f32>, n: usize, total: usize) {
    let mut progress = shared.lock().expect("results lock");
    progress.rows[i] = row;
    progress.completed += n - i;
    debug!(completed = progress.completed, total, "comparisons finished");
}

/// Dispatch one task per outer index: sequentially on the caller for a
/// single thread, otherwise on a dedicated fixed-size pool. The first
/// failing task fails the run.
fn run_tasks<F>(n: usize, threads: usize, task: F) -> Result<()>
where
    F: Fn(usize) -> Result<()> + Sync,
{
    if threads <= 1 {
        for i in 0..n {
            task(i)?;
        }
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            CliqueError::InvalidParameter(format!("cannot build a {threads}-thread pool: {e}"))
        })?;
    pool.install(|| (0..n).into_par_iter().try_for_each(|i| task(i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(threads: usize) -> NearnessParams {
        NearnessParams {
            epsilon: 0.5,
            num_features: 1,
            singletons: false,
            threads,
        }
    }

    #[test]
    fn serial_and_parallel_agree() {
        let objects: Vec<Vec<f32>> = vec![
            vec![0.0, 0.1, 0.2],
            vec![0.05, 0.15],
            vec![0.3, 0.4],
            vec![10.0],
        ];
        let serial = run_mce(&objects, params(1)).unwrap();
        let parallel = run_mce(&objects, params(3)).unwrap();
        for i in 0..objects.len() {
            for j in 0..objects.len() {
                assert_eq!(serial.get(i, j), parallel.get(i, j));
            }
        }
    }

    #[test]
    fn matrix_lookup_is_symmetric_with_zero_diagonal() {
        let objects: Vec<Vec<f32>> = vec![vec![0.0], vec![0.1], vec![0.2]];
        let matrix = run_mce(&objects, params(1)).unwrap();
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn disjoint_objects_have_zero_nearness() {
        let objects: Vec<Vec<f32>> = vec![vec![0.0], vec![100.0]];
        let matrix = run_mce(&objects, params(1)).unwrap();
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn mce_nearness_stays_in_unit_interval() {
        let objects: Vec<Vec<f32>> = vec![
            vec![0.0, 0.05, 0.1],
            vec![0.02, 0.07],
            vec![0.04, 0.09, 0.14],
        ];
        let matrix = run_mce(&objects, params(1)).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let v = matrix.get(i, j);
                assert!((0.0..=1.0).contains(&v), "nearness {v} out of bounds");
            }
        }
    }

    #[test]
    fn sgmd_identical_objects_score_zero() {
        let objects: Vec<Vec<f32>> = vec![vec![0.0, 0.1, 0.2], vec![0.0, 0.1, 0.2]];
        let matrix = run_sgmd(&objects, params(1)).unwrap();
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn zero_threads_is_rejected() {
        let err = run_mce(&[vec![0.0]], params(0)).unwrap_err();
        assert!(matches!(err, CliqueError::InvalidParameter(_)));
    }
}
