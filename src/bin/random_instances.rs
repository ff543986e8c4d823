use std::path::PathBuf;

use ::log::LevelFilter;
use hamcycle::{log::build_logger_for_verbosity, prelude::*};
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
struct Opt {
    /// Number of vertices
    #[structopt(short, long, default_value = "10")]
    nodes: u32,

    /// Probability of each vertex pair to be connected
    #[structopt(short, long, default_value = "0.5")]
    probability: f64,

    #[structopt(long, default_value = "1")]
    min_weight: u32,

    #[structopt(long, default_value = "100")]
    max_weight: u32,

    #[structopt(short, long, default_value = "1")]
    seed: u64,

    /// Number of instances; each uses the next seed
    #[structopt(short, long, default_value = "1")]
    count: u64,

    /// Directory for the instances; a single instance is written to stdout if omitted
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opt.verbose);

    anyhow::ensure!(
        (0.0..=1.0).contains(&opt.probability),
        "probability must be in [0, 1]"
    );
    anyhow::ensure!(
        opt.min_weight <= opt.max_weight,
        "min-weight must not exceed max-weight"
    );
    anyhow::ensure!(
        opt.output.is_some() || opt.count == 1,
        "multiple instances require an output directory"
    );

    for seed in opt.seed..opt.seed + opt.count {
        let mut rng = Pcg64::seed_from_u64(seed);
        let graph = WeightedGraph::random_weighted_gnp(
            &mut rng,
            opt.nodes,
            opt.probability,
            opt.min_weight..=opt.max_weight,
        )?;

        match &opt.output {
            Some(dir) => {
                let filename = dir.join(format!(
                    "n{:>03}_m{:>04}_p{}_s{seed}.graph",
                    opt.nodes,
                    graph.number_of_edges(),
                    opt.probability
                ));
                graph.try_write_edge_list_file(&filename)?;
                info!("Wrote {}", filename.display());
            }
            None => graph.try_write_edge_list(std::io::stdout().lock())?,
        }
    }

    Ok(())
}
