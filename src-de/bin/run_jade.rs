use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::thread;

use clap::Parser;

use jade_de::{
	Aggregator, Bounds, InProcessGroup, Jade, JadeConfig, JadeReport, LocalAggregator, Mode,
	OptimizationRecorder, RunStatistics, TcpAggregator, output,
};
use jade_testfunctions::{FunctionMetadata, TestFunction, all_functions, get_function_metadata};

type BoxError = Box<dyn Error + Send + Sync>;

/// CLI arguments for running JADE on a benchmark function
#[derive(Parser, Debug, Clone)]
#[command(name = "run_jade")]
#[command(about = "Run JADE adaptive differential evolution on a benchmark function")]
struct Args {
	/// Benchmark function name or label (sphere, f1, rastrigin, ...)
	#[arg(short, long, default_value = "sphere")]
	function: String,

	/// Problem dimension
	#[arg(short, long, default_value = "10")]
	dim: usize,

	/// Scalar lower bound (default: the function's domain)
	#[arg(long, allow_hyphen_values = true)]
	lower: Option<f64>,

	/// Scalar upper bound (default: the function's domain)
	#[arg(long, allow_hyphen_values = true)]
	upper: Option<f64>,

	/// Population size
	#[arg(short = 'n', long)]
	popsize: Option<usize>,

	/// Number of generations
	#[arg(short, long)]
	generations: Option<usize>,

	/// Share of top individuals eligible as pbest, in (0, 1)
	#[arg(long)]
	best_fraction: Option<f64>,

	/// Adaptation rate c in [0, 1]
	#[arg(long)]
	adaptation_rate: Option<f64>,

	/// Maximize instead of minimize
	#[arg(long)]
	maximize: bool,

	/// Use the PMCRADE crossover-rate rule
	#[arg(long)]
	pmcrade: bool,

	/// Random seed; worker k uses seed + k
	#[arg(short, long)]
	seed: Option<u64>,

	/// JSON file holding a list of feed vectors
	#[arg(long)]
	feed: Option<PathBuf>,

	/// JSON configuration file; explicit flags override its values
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Reporting level; only level 0 takes part in the statistics gather
	#[arg(long)]
	report_level: Option<u32>,

	/// Log progress every N generations (0 disables)
	#[arg(long)]
	progress_every: Option<usize>,

	/// Build and evaluate trials on the rayon pool
	#[arg(long)]
	parallel: bool,

	/// Rayon thread count
	#[arg(long)]
	threads: Option<usize>,

	/// Independent in-process instances whose results are gathered
	#[arg(short, long, default_value = "1")]
	workers: usize,

	/// Rank of this process in a multi-process run
	#[arg(long, default_value = "0")]
	rank: usize,

	/// Number of processes in a multi-process run
	#[arg(long, default_value = "1")]
	participants: usize,

	/// Address rank 0 listens on and the other ranks connect to
	#[arg(long, default_value = "127.0.0.1:7878")]
	coordinator: String,

	/// Print the final population
	#[arg(long)]
	dump_population: bool,

	/// Directory for per-generation CSV history
	#[arg(long)]
	record: Option<PathBuf>,

	/// List available functions and exit
	#[arg(long)]
	list_functions: bool,
}

fn build_config(args: &Args) -> Result<JadeConfig, BoxError> {
	let mut cfg = match &args.config {
		Some(path) => JadeConfig::from_json_file(path)?,
		None => JadeConfig::default(),
	};
	if let Some(v) = args.popsize {
		cfg.popsize = v;
	}
	if let Some(v) = args.generations {
		cfg.generations = v;
	}
	if let Some(v) = args.best_fraction {
		cfg.best_fraction = v;
	}
	if let Some(v) = args.adaptation_rate {
		cfg.adaptation_rate = v;
	}
	if args.maximize {
		cfg.mode = Mode::Maximize;
	}
	if args.pmcrade {
		cfg.pmcrade = true;
	}
	if let Some(v) = args.seed {
		cfg.seed = Some(v);
	}
	if let Some(path) = &args.feed {
		let text = fs::read_to_string(path)?;
		cfg.feed = serde_json::from_str(&text)?;
	}
	if let Some(v) = args.report_level {
		cfg.report_level = v;
	}
	if let Some(v) = args.progress_every {
		cfg.progress_every = v;
	}
	if args.parallel {
		cfg.parallel.enabled = true;
	}
	if let Some(n) = args.threads {
		cfg.parallel.num_threads = Some(n);
	}
	cfg.validate()?;
	Ok(cfg)
}

fn build_bounds(args: &Args, meta: &FunctionMetadata) -> Result<Bounds, BoxError> {
	let lower = args.lower.unwrap_or(meta.bounds.0);
	let upper = args.upper.unwrap_or(meta.bounds.1);
	Ok(Bounds::uniform(args.dim, lower, upper)?)
}

/// Run one independent instance and take part in the final gather
fn run_instance(
	args: &Args,
	meta: &FunctionMetadata,
	bounds: Bounds,
	mut config: JadeConfig,
	aggregator: &mut dyn Aggregator,
) -> Result<(JadeReport, Option<RunStatistics>), BoxError> {
	let rank = aggregator.rank();
	if let Some(seed) = config.seed {
		config.seed = Some(seed.wrapping_add(rank as u64));
	}
	let generations = config.generations;
	let func: TestFunction = meta.function;
	let recorder = args
		.record
		.as_ref()
		.map(|_| OptimizationRecorder::new(format!("{}_{}", meta.name, rank), config.mode));

	let mut optimizer = Jade::new(&func, bounds, config)?;
	if let Some(r) = &recorder {
		optimizer.set_callback(r.create_callback());
	}
	let (report, stats) = optimizer.solve_and_aggregate(aggregator)?;

	if let (Some(r), Some(dir)) = (&recorder, &args.record) {
		let path = r.save_to_csv(dir).map_err(|e| e.to_string())?;
		log::info!("rank {} history saved to {}", rank, path.display());
	}
	if rank == 0 {
		print!(
			"{}",
			output::run_summary(meta.name, &report, generations, stats.as_ref(), args.dump_population)
		);
	}
	Ok((report, stats))
}

fn main() -> Result<(), BoxError> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	if args.list_functions {
		for m in all_functions() {
			println!(
				"{:<14} {:<4} [{}, {}]{}",
				m.name,
				m.label,
				m.bounds.0,
				m.bounds.1,
				if m.multimodal { "  multimodal" } else { "" }
			);
		}
		return Ok(());
	}

	let meta = get_function_metadata(&args.function)
		.ok_or_else(|| format!("unknown function: {} (try --list-functions)", args.function))?;
	let config = build_config(&args)?;
	let bounds = build_bounds(&args, meta)?;
	println!(
		"{}",
		output::parameter_banner(
			meta.name,
			bounds.dimension(),
			config.popsize,
			config.best_fraction,
			config.adaptation_rate,
			config.generations
		)
	);

	if args.participants > 1 {
		let mut aggregator = if args.rank == 0 {
			TcpAggregator::bind(args.coordinator.as_str(), args.participants)?
		} else {
			TcpAggregator::connect(args.coordinator.as_str(), args.rank, args.participants)?
		};
		run_instance(&args, meta, bounds, config, &mut aggregator)?;
	} else if args.workers > 1 {
		let group = InProcessGroup::new(args.workers);
		thread::scope(|scope| -> Result<(), BoxError> {
			let handles: Vec<_> = group
				.members()
				.into_iter()
				.map(|mut member| {
					let (args, bounds, config) = (&args, bounds.clone(), config.clone());
					scope.spawn(move || {
						run_instance(args, meta, bounds, config, &mut member).map(|_| ())
					})
				})
				.collect();
			for h in handles {
				h.join().map_err(|_| "worker thread panicked")??;
			}
			Ok(())
		})?;
	} else {
		run_instance(&args, meta, bounds, config, &mut LocalAggregator)?;
	}
	Ok(())
}
