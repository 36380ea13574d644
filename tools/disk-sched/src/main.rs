mod report;

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use serde::Serialize;

use dslab_disk_sched::benchmark::{run_benchmark, summarize, BenchmarkConfig};
use dslab_disk_sched::config::{
    RawBenchmarkConfig, RawDiskConfig, RawGeneratorConfig, RawRequest, RawSimulationConfig, RawWorkloadConfig,
    SimulationConfig,
};
use dslab_disk_sched::geometry::{DEFAULT_LOWER_CYLINDER, DEFAULT_UPPER_CYLINDER};
use dslab_disk_sched::scheduler::Algorithm;

use crate::report::{print_benchmark_summary, print_comparison, print_timelines, run_reports};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Simulates and compares disk-head scheduling algorithms
struct Cli {
    /// Print only warnings and errors to the log
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs algorithms over a single workload and prints a comparison
    Run(RunArgs),
    /// Runs a benchmark over a grid of generated workloads
    Benchmark(BenchmarkArgs),
    /// Lists supported algorithms
    List,
}

#[derive(Args, Debug)]
struct DiskArgs {
    /// Lowest cylinder
    #[arg(long, default_value_t = DEFAULT_LOWER_CYLINDER)]
    lower: i64,

    /// Highest cylinder
    #[arg(long, default_value_t = DEFAULT_UPPER_CYLINDER)]
    upper: i64,

    /// Initial sweep direction (increasing/decreasing, left/right, ...)
    #[arg(short, long, default_value = "")]
    direction: String,

    /// Wrap policy of circular algorithms (to_boundary/to_first_pending)
    #[arg(short, long, default_value = "")]
    wrap_policy: String,
}

impl DiskArgs {
    fn to_raw(&self) -> RawDiskConfig {
        RawDiskConfig {
            lower: self.lower,
            upper: self.upper,
            direction: self.direction.clone(),
            wrap_policy: self.wrap_policy.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to YAML file with simulation configuration, other options are ignored if set
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    disk: DiskArgs,

    /// Initial head position
    #[arg(short = 'p', long, default_value_t = 50)]
    position: i64,

    /// Comma-separated list of requested cylinders
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    requests: Vec<i64>,

    /// Generate given number of requests instead of using --requests
    #[arg(short, long)]
    generate: Option<usize>,

    /// Distribution of generated requests (uniform/normal/hotspot)
    #[arg(long, default_value = "uniform")]
    distribution: String,

    /// Seed of the workload generator
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Arrival times of generated requests are uniform in [0, max-arrival)
    #[arg(long, default_value_t = 0)]
    max_arrival: u64,

    /// Comma-separated list of algorithms (default - all)
    #[arg(short, long, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Batch size of N-Step-SCAN
    #[arg(short = 'n', long, default_value_t = 4)]
    step_size: usize,

    /// Take arrival times into account and record service times
    #[arg(short, long)]
    time_based: bool,

    /// Clamp out-of-range requests to the disk bounds instead of failing
    #[arg(long)]
    clamp: bool,

    /// Print head movement timeline of each algorithm
    #[arg(long)]
    timeline: bool,

    /// Path to produced JSON file with traces and metrics
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn to_raw(&self) -> RawSimulationConfig {
        let generator = self.generate.map(|count| RawGeneratorConfig {
            seed: self.seed,
            distribution: self.distribution.clone(),
            count,
            max_arrival_time: self.max_arrival,
            mean_inter_arrival: None,
        });
        RawSimulationConfig {
            disk: self.disk.to_raw(),
            initial_position: self.position,
            step_size: self.step_size,
            time_based: self.time_based,
            out_of_range: if self.clamp { "clamp" } else { "reject" }.to_string(),
            algorithms: self.algorithms.clone(),
            workload: RawWorkloadConfig {
                requests: self.requests.iter().map(|c| RawRequest::Cylinder(*c)).collect(),
                generator,
            },
        }
    }
}

#[derive(Args, Debug)]
struct BenchmarkArgs {
    /// Path to YAML file with benchmark configuration, other options are ignored if set
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    disk: DiskArgs,

    /// Comma-separated list of workload sizes
    #[arg(short, long, value_delimiter = ',', default_value = "100,500,1000")]
    sizes: Vec<usize>,

    /// Number of workloads per size
    #[arg(short, long, default_value_t = 5)]
    iterations: usize,

    /// Base seed of generated workloads
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Distribution of generated requests (uniform/normal/hotspot)
    #[arg(long, default_value = "uniform")]
    distribution: String,

    /// Comma-separated list of algorithms (default - all)
    #[arg(short, long, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Mean time between request arrivals
    #[arg(short, long, default_value_t = 10.)]
    mean_inter_arrival: f64,

    /// Batch size of N-Step-SCAN
    #[arg(short = 'n', long, default_value_t = 4)]
    step_size: usize,

    /// Number of threads to use (default - use all available cores)
    #[arg(short, long, default_value_t = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))]
    threads: usize,

    /// Path to produced JSON file with averaged results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BenchmarkArgs {
    fn to_raw(&self) -> RawBenchmarkConfig {
        RawBenchmarkConfig {
            disk: self.disk.to_raw(),
            sizes: self.sizes.clone(),
            iterations: self.iterations,
            seed: self.seed,
            distribution: self.distribution.clone(),
            algorithms: self.algorithms.clone(),
            mean_inter_arrival: self.mean_inter_arrival,
            step_size: self.step_size,
        }
    }
}

fn init_logger(quiet: bool) {
    let level = if quiet { LevelFilter::Warn } else { LevelFilter::Info };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    std::fs::File::create(path)?.write_all(serde_json::to_string_pretty(value)?.as_bytes())?;
    info!("Results written to {}", path.display());
    Ok(())
}

fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::from_raw(&args.to_raw())?,
    };
    let traces = config.run()?;

    println!("Disk: {}", config.geometry);
    println!(
        "Initial position: {}, requests: {}, time-based: {}",
        config.initial_position,
        config.requests.len(),
        config.options.time_based()
    );
    println!();
    print_comparison(&traces);
    if args.timeline {
        println!();
        print_timelines(&traces);
    }
    if let Some(path) = &args.output {
        write_json(path, &run_reports(&traces))?;
    }
    Ok(())
}

fn benchmark(args: &BenchmarkArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => BenchmarkConfig::from_file(path)?,
        None => BenchmarkConfig::from_raw(&args.to_raw())?,
    };
    let results = run_benchmark(&config, args.threads)?;
    let summary = summarize(&results);
    print_benchmark_summary(&summary);
    if let Some(path) = &args.output {
        write_json(path, &summary)?;
    }
    Ok(())
}

fn list() {
    for algorithm in Algorithm::ALL {
        let mode = if algorithm.uses_arrival_times() {
            "arrival-aware"
        } else {
            "positional"
        };
        println!("{:<12} {}", algorithm.name(), mode);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet);

    let result = match &cli.command {
        Command::Run(args) => run(args),
        Command::Benchmark(args) => benchmark(args),
        Command::List => {
            list();
            Ok(())
        }
    };
    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}
