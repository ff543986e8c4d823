use std::{fs::File, path::PathBuf, time::Duration};

use hamcycle::{
    log::build_logger_for_verbosity,
    prelude::*,
    utils::{Tour, signal_handling},
};
use log::{info, warn};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct ParallelOpts {
    /// Edge index at which subtrees are handed to worker threads
    #[structopt(long, default_value = "8")]
    split_depth: u32,
}

#[derive(StructOpt, Default)]
pub enum Commands {
    /// Sequential branch and bound
    #[default]
    Bnb,
    /// Branch and bound with subtrees distributed over all cores
    Parallel(ParallelOpts),
    /// Enumerate all |V|-edge subsets; only feasible for tiny graphs
    Naive,
}

#[derive(StructOpt)]
struct Opts {
    /// Graph description; read from stdin if omitted
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    /// Solution file; written to stdout if omitted
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many seconds and report the best cycle found so far
    #[structopt(short = "T", long)]
    timeout: Option<f64>,

    /// Write the solution as JSON
    #[structopt(long)]
    json: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,

    #[structopt(subcommand)]
    cmd: Option<Commands>,
}

fn load_graph(path: &Option<PathBuf>) -> anyhow::Result<WeightedGraph> {
    if let Some(path) = path {
        Ok(WeightedGraph::try_read_edge_list_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(WeightedGraph::try_read_edge_list(stdin)?)
    }
}

fn write_result(
    graph: &WeightedGraph,
    tour: Option<&Tour>,
    format: OutputFormat,
    path: &Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        write_solution(graph, tour, format, writer)?;
    } else {
        let writer = std::io::stdout().lock();
        write_solution(graph, tour, format, writer)?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(log::LevelFilter::Warn, opts.verbose);
    signal_handling::initialize();

    let timeout = opts
        .timeout
        .map(Duration::try_from_secs_f64)
        .transpose()?;

    let graph = load_graph(&opts.instance)?;
    info!(
        "Loaded graph with n={} m={} total_weight={}",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        graph.total_weight()
    );

    let config = SearchConfiguration {
        timeout,
        ..Default::default()
    };

    let outcome = match opts.cmd.unwrap_or_default() {
        Commands::Bnb => {
            let mut algo = BranchAndBound::new(&graph);
            algo.configure(config);
            algo.solve()
        }
        Commands::Parallel(parallel_opts) => {
            let mut algo = ParallelBranchAndBound::new(&graph);
            algo.configure(SearchConfiguration {
                split_depth: parallel_opts.split_depth,
                ..config
            });
            algo.solve()
        }
        Commands::Naive => {
            if timeout.is_some() {
                warn!("The naive solver ignores the timeout");
            }
            SearchOutcome {
                tour: naive_solver(&graph),
                status: SearchStatus::Complete,
                stats: SearchStats::default(),
            }
        }
    };

    if let Some(tour) = &outcome.tour {
        anyhow::ensure!(
            tour.is_hamiltonian(&graph),
            "Produced cycle is not hamiltonian"
        );
    }

    if outcome.status == SearchStatus::Interrupted {
        warn!("Search was interrupted; the reported cycle may not be optimal");
    }

    let format = if opts.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    write_result(&graph, outcome.tour.as_ref(), format, &opts.output)?;

    Ok(())
}
