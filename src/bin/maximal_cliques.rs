//! Maximal cliques of one feature file's neighbourhood graph.
//!
//! Converts the input to its ε-neighbourhood graph (cached on disk next to
//! the source, rebuilt when the source is newer), enumerates the maximal
//! cliques with the selected engine, and writes one clique per line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use tracing::info;

use propinquity::convert;
use propinquity::enumerate;
use propinquity::messaging::{self, EngineParams};
use propinquity::output;

#[derive(Parser, Debug)]
#[command(
    name = "maximal-cliques",
    version,
    about = "Enumerate the maximal cliques of a feature file's neighbourhood graph"
)]
struct Args {
    /// Enumeration engine: "recursive", "iterative", or "messaging".
    #[arg(long, default_value = "recursive")]
    engine: String,

    /// Maximum distance between neighbouring points.
    #[arg(short, long)]
    epsilon: Option<f32>,

    /// Number of feature values per point.
    #[arg(short = 'f', long)]
    features: Option<usize>,

    /// Output file; defaults to the converted graph's name + "_output".
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include singleton cliques in the listing.
    #[arg(long)]
    singletons: bool,

    /// Emit cliques in discovery order instead of sorted.
    #[arg(long)]
    disable_sorting: bool,

    /// Reuse the converted graph even when the source file is newer.
    #[arg(long)]
    disable_modtime_check: bool,

    /// Rebuild the converted graph unconditionally.
    #[arg(long)]
    clean: bool,

    /// Iteration bound for the messaging engine.
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Input feature file.
    input: Option<PathBuf>,
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
    let Some(input) = args.input else {
        bail!("an input feature file must be given");
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
    if !(epsilon > 0.0) {
        bail!("epsilon must be greater than 0, got {epsilon}");
    }

    let (graph, cache) = convert::convert_cached(
        &input,
        epsilon,
        num_features,
        !args.disable_modtime_check,
        args.clean,
    )?;
    info!(vertices = graph.len(), edges = graph.edge_count(), "graph ready");

    let mut cliques = match args.engine.as_str() {
        "recursive" => enumerate::maximal_cliques(&graph),
        "iterative" => {
            let mut cliques = Vec::new();
            enumerate::enumerate_iterative(&graph, |c| cliques.push(*c));
            cliques
        }
        "messaging" => messaging::maximal_cliques(
            &graph,
            EngineParams {
                max_iterations: args.max_iterations,
                singletons: true,
            },
        )?,
        other => bail!(
            "unknown engine {other:?}; expected \"recursive\", \"iterative\", or \"messaging\""
        ),
    };

    if !args.singletons {
        cliques.retain(|c| c.len() > 1);
    }

    let out_path = args.output.unwrap_or_else(|| {
        let mut name = cache.into_os_string();
        name.push("_output");
        PathBuf::from(name)
    });
    output::write_cliques_to_path(&out_path, &cliques, !args.disable_sorting)?;
    info!(output = %out_path.display(), cliques = cliques.len(), "wrote clique listing");
    Ok(())
}
