//! Pairwise nearness over sets of feature-vector objects.
//!
//! Reads one feature file per object set (directories expand recursively in
//! natural order), computes the selected nearness measure between every
//! pair, and writes the dense `i \t j \t value` listing.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use tracing::info;

use propinquity::inputs;
use propinquity::nearness::{self, Measure, NearnessParams};
use propinquity::output;

#[derive(Parser, Debug)]
#[command(
    name = "propinquity",
    version,
    about = "Graph-based nearness between sets of feature-vector objects"
)]
struct Args {
    /// Nearness measure: "mce" (maximal-clique enumeration) or "sgmd"
    /// (subgraph metric distance).
    #[arg(short, long, default_value = "mce")]
    distance_measure: String,

    /// Maximum distance between neighbouring points, in (0, sqrt(features)].
    #[arg(short, long)]
    epsilon: Option<f32>,

    /// Number of feature values per point.
    #[arg(short = 'f', long)]
    features: Option<usize>,

    /// File to write results to.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Include singleton cliques in the reduction.
    #[arg(long)]
    singletons: bool,

    /// Worker threads; 0 picks one per hardware thread, 1 runs serially.
    #[arg(long)]
    threads: Option<usize>,

    /// Run serially; shorthand for --threads 1.
    #[arg(long)]
    serial: bool,

    /// Input feature files, or directories of them.
    input: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let measure = match args.distance_measure.as_str() {
        "mce" => Measure::Mce,
        "sgmd" => Measure::Sgmd,
        other => bail!("unknown distance measure {other:?}; expected \"mce\" or \"sgmd\""),
    };

    let Some(epsilon) = args.epsilon else {
        bail!("an epsilon must be given with --epsilon");
    };
    let Some(num_features) = args.features else {
        bail!("a feature count must be given with --features");
    };
    if num_features == 0 {
        bail!("the number of features per point must be greater than 0");
    }
    if !(epsilon > 0.0 && epsilon <= (num_features as f32).sqrt()) {
        bail!("epsilon must be in (0, sqrt(features)], got {epsilon}");
    }
    if args.input.is_empty() {
        bail!("at least one input file must be given");
    }

    let threads = if args.serial {
        1
    } else {
        match args.threads {
            Some(0) | None => std::thread::available_parallelism().map_or(1, |n| n.get()),
            Some(t) => t,
        }
    };

    let objects = inputs::collect_objects(&args.input)?;
    info!(objects = objects.len(), threads, "loaded object sets");

    let params = NearnessParams {
        epsilon,
        num_features,
        singletons: args.singletons,
        threads,
    };
    let matrix = nearness::run(measure, &objects, params)?;

    output::write_nearness_to_path(&args.output, &matrix)?;
    info!(output = %args.output.display(), pairs = matrix.len() * matrix.len(), "wrote nearness listing");
    Ok(())
}
