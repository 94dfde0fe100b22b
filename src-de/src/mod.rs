//! JADE: adaptive differential evolution with an external archive, in pure
//! Rust using ndarray
//!
//! Supported features:
//! - Box constraints (lower/upper bounds), violations repaired halfway back
//!   toward the parent
//! - current-to-pbest/1 mutation drawing its second difference vector from the
//!   population joined with an archive of displaced parents
//! - Binomial crossover
//! - Per-individual F (Cauchy) and CR (Gaussian) adapted every generation with
//!   Lehmer / arithmetic means, optionally the PMCRADE quadratic-mean rule
//! - Feed vectors seeding the initial population
//! - Minimization or maximization
//! - Optional rayon evaluation of the per-individual pipeline
//! - End-of-run statistics gathered across independent instances

#![allow(missing_docs)]
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub mod adaptive;
pub mod aggregate;
pub mod aggregate_tcp;
pub mod archive;
pub mod bounds;
pub mod crossover_binomial;
pub mod error;
pub mod init_random;
pub mod jade;
pub mod mutant_current_to_pbest1;
pub mod output;
pub mod parallel_eval;
pub mod random;
pub mod ranking;
pub mod recorder;
pub mod run_recorded;
pub mod selection;

pub use aggregate::{
	Aggregator, InProcessAggregator, InProcessGroup, LocalAggregator, RunStatistics,
	gather_final_fitness, gather_statistics,
};
pub use aggregate_tcp::TcpAggregator;
pub use archive::Archive;
pub use bounds::Bounds;
pub use error::{JadeError, Result};
pub use jade::jade;
pub use parallel_eval::ParallelConfig;
pub use random::RandomSource;
pub use ranking::{FitnessRanking, FitnessRecord};
pub use recorder::{OptimizationRecord, OptimizationRecorder};
pub use run_recorded::run_recorded_jade;

use adaptive::AdaptiveState;
use crossover_binomial::binomial_crossover;
use init_random::{check_feed, init_population};
use mutant_current_to_pbest1::{mutant_current_to_pbest1, pbest_pool_size};
use parallel_eval::{evaluate_population, evaluate_trials};
use selection::{SuccessSets, is_accepted};

/// Optimization direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Minimize,
	Maximize,
}

impl FromStr for Mode {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"min" | "minimize" | "minimise" => Ok(Mode::Minimize),
			"max" | "maximize" | "maximise" => Ok(Mode::Maximize),
			_ => Err(format!("unknown mode: {}", s)),
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Mode::Minimize => write!(f, "minimize"),
			Mode::Maximize => write!(f, "maximize"),
		}
	}
}

/// Configuration for the JADE optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JadeConfig {
	/// Population size N
	pub popsize: usize,
	/// Number of generations G; 0 only evaluates the initial population
	pub generations: usize,
	/// p in (0, 1): share of top-ranked individuals eligible as pbest
	pub best_fraction: f64,
	/// c in [0, 1]: weight of the new means when adapting mu_F and mu_CR
	pub adaptation_rate: f64,
	pub mode: Mode,
	/// Use the PMCRADE rule for mu_CR
	pub pmcrade: bool,
	pub seed: Option<u64>,
	/// Vectors placed verbatim in the initial population
	pub feed: Vec<Vec<f64>>,
	/// Only instances at level 0 take part in the final statistics gather
	pub report_level: u32,
	/// Log progress every this many generations (0 disables)
	pub progress_every: usize,
	pub parallel: ParallelConfig,
}

impl Default for JadeConfig {
	fn default() -> Self {
		Self {
			popsize: 100,
			generations: 1000,
			best_fraction: 0.1,
			adaptation_rate: 0.1,
			mode: Mode::Minimize,
			pmcrade: false,
			seed: None,
			feed: Vec::new(),
			report_level: 0,
			progress_every: 100,
			parallel: ParallelConfig::default(),
		}
	}
}

impl JadeConfig {
	/// Check every scalar option. Feed vectors are checked against the
	/// bounds when the optimizer is created.
	pub fn validate(&self) -> Result<()> {
		if self.popsize == 0 {
			return Err(JadeError::EmptyPopulation);
		}
		if !(self.best_fraction > 0.0 && self.best_fraction < 1.0) {
			return Err(JadeError::InvalidBestFraction { p: self.best_fraction });
		}
		if !(0.0..=1.0).contains(&self.adaptation_rate) {
			return Err(JadeError::InvalidAdaptationRate { c: self.adaptation_rate });
		}
		if self.feed.len() >= self.popsize {
			return Err(JadeError::FeedTooLarge { feed: self.feed.len(), popsize: self.popsize });
		}
		pbest_pool_size(self.popsize, self.best_fraction)?;
		Ok(())
	}

	/// Parse a JSON description; missing fields keep their defaults
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	pub fn from_json_file(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path)
			.map_err(|e| JadeError::Config(format!("{}: {}", path.display(), e)))?;
		Self::from_json_str(&text)
	}
}

/// Fluent builder for `JadeConfig`
#[derive(Debug, Clone, Default)]
pub struct JadeConfigBuilder {
	cfg: JadeConfig,
}

impl JadeConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: JadeConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn generations(mut self, v: usize) -> Self {
		self.cfg.generations = v;
		self
	}
	pub fn best_fraction(mut self, v: f64) -> Self {
		self.cfg.best_fraction = v;
		self
	}
	pub fn adaptation_rate(mut self, v: f64) -> Self {
		self.cfg.adaptation_rate = v;
		self
	}
	pub fn mode(mut self, v: Mode) -> Self {
		self.cfg.mode = v;
		self
	}
	pub fn maximize(self) -> Self {
		self.mode(Mode::Maximize)
	}
	pub fn pmcrade(mut self, enable: bool) -> Self {
		self.cfg.pmcrade = enable;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn feed(mut self, vectors: Vec<Array1<f64>>) -> Self {
		self.cfg.feed = vectors.into_iter().map(|x| x.to_vec()).collect();
		self
	}
	pub fn add_feed(mut self, x: Array1<f64>) -> Self {
		self.cfg.feed.push(x.to_vec());
		self
	}
	pub fn report_level(mut self, v: u32) -> Self {
		self.cfg.report_level = v;
		self
	}
	pub fn progress_every(mut self, v: usize) -> Self {
		self.cfg.progress_every = v;
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn enable_parallel(mut self, enable: bool) -> Self {
		self.cfg.parallel.enabled = enable;
		self
	}
	pub fn parallel_threads(mut self, num_threads: usize) -> Self {
		self.cfg.parallel.num_threads = Some(num_threads);
		self
	}
	pub fn build(self) -> Result<JadeConfig> {
		self.cfg.validate()?;
		Ok(self.cfg)
	}
}

/// Lifecycle of one optimizer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	Uninitialized,
	Initialized,
	Evaluating,
	Evolving { generation: usize },
	/// All generations completed
	Converged,
	/// Stopped early by the callback or an internal error
	Terminated,
}

/// Result of a JADE run
#[derive(Clone)]
pub struct JadeReport {
	/// Best individual
	pub x: Array1<f64>,
	pub fun: f64,
	pub worst_x: Array1<f64>,
	pub worst_fun: f64,
	pub success: bool,
	pub message: String,
	/// Completed generations
	pub nit: usize,
	pub nfev: usize,
	/// Final population by slot
	pub population: Array2<f64>,
	pub ranking: FitnessRanking,
	pub mu_f: f64,
	pub mu_cr: f64,
	pub archive_size: usize,
	pub phase: Phase,
	/// Internal error that stopped the run; the population is the last
	/// consistent generation
	pub error: Option<JadeError>,
}

impl JadeReport {
	pub fn best(&self) -> (ArrayView1<'_, f64>, f64) {
		(self.x.view(), self.fun)
	}

	pub fn worst(&self) -> (ArrayView1<'_, f64>, f64) {
		(self.worst_x.view(), self.worst_fun)
	}

	/// Fitness of every population slot
	pub fn population_fitness(&self) -> Result<Array1<f64>> {
		self.ranking.fitness_by_slot(self.population.nrows())
	}
}

impl fmt::Debug for JadeReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JadeReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("worst_fun", &self.worst_fun)
			.field("success", &self.success)
			.field("message", &self.message)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("mu_f", &self.mu_f)
			.field("mu_cr", &self.mu_cr)
			.field("archive_size", &self.archive_size)
			.field("phase", &self.phase)
			.field("error", &self.error)
			.finish()
	}
}

/// Information passed to the callback after each generation
#[derive(Debug, Clone)]
pub struct JadeIntermediate {
	/// Generations completed so far
	pub iter: usize,
	pub x: Array1<f64>,
	pub fun: f64,
	pub worst_fun: f64,
	/// Standard deviation of the population fitness
	pub convergence: f64,
	pub mu_f: f64,
	pub mu_cr: f64,
	pub archive_size: usize,
	/// Trials accepted in this generation
	pub accepted: usize,
}

/// Action returned by callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
	Continue,
	Stop,
}

pub type Callback<'a> = Box<dyn FnMut(&JadeIntermediate) -> CallbackAction + Send + 'a>;

struct Trial {
	x: Array1<f64>,
	f: f64,
	cr: f64,
}

struct GenerationOutcome {
	fitness: Vec<f64>,
	accepted: usize,
}

/// Sample `F_i`/`CR_i`, mutate and cross over for slot `i`
#[allow(clippy::too_many_arguments)]
fn build_trial(
	i: usize,
	pop: &Array2<f64>,
	ranking: &FitnessRanking,
	archive: &Archive,
	bounds: &Bounds,
	adaptive: &AdaptiveState,
	pool: usize,
	rng: &mut RandomSource,
) -> Result<Trial> {
	let f = adaptive.sample_f(rng);
	let cr = adaptive.sample_cr(rng);
	let mutant = mutant_current_to_pbest1(i, pop, ranking, archive, bounds, pool, f, rng)?;
	let x = binomial_crossover(pop.row(i), &mutant, cr, rng);
	Ok(Trial { x, f, cr })
}

fn ranked_row(pop: &Array2<f64>, record: Option<FitnessRecord>) -> (Array1<f64>, f64) {
	match record {
		Some(r) if r.index < pop.nrows() => (pop.row(r.index).to_owned(), r.fitness),
		_ => (Array1::from_elem(pop.ncols(), f64::NAN), f64::NAN),
	}
}

/// JADE optimizer: one independent instance with its own random source
pub struct Jade<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	func: &'a F,
	bounds: Bounds,
	config: JadeConfig,
	feed: Vec<Array1<f64>>,
	pool: usize,
	rng: RandomSource,
	archive: Archive,
	phase: Phase,
	callback: Option<Callback<'a>>,
}

impl<'a, F> Jade<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	/// Validate `config` against `bounds` and create an optimizer for `func`
	pub fn new(func: &'a F, bounds: Bounds, config: JadeConfig) -> Result<Self> {
		config.validate()?;
		let feed: Vec<Array1<f64>> =
			config.feed.iter().map(|v| Array1::from_vec(v.clone())).collect();
		check_feed(&bounds, &feed)?;
		let pool = pbest_pool_size(config.popsize, config.best_fraction)?;
		let rng = RandomSource::new(config.seed);
		Ok(Self {
			func,
			bounds,
			config,
			feed,
			pool,
			rng,
			archive: Archive::new(),
			phase: Phase::Uninitialized,
			callback: None,
		})
	}

	/// Called after every generation; returning `Stop` ends the run
	pub fn set_callback(&mut self, cb: Callback<'a>) {
		self.callback = Some(cb);
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn config(&self) -> &JadeConfig {
		&self.config
	}

	pub fn bounds(&self) -> &Bounds {
		&self.bounds
	}

	pub fn archive(&self) -> &Archive {
		&self.archive
	}

	/// Run the optimization and return a report.
	///
	/// Configuration errors are returned as `Err`. An internal consistency
	/// error stops the loop at once; the report then holds the last complete
	/// generation, `success == false` and the error.
	pub fn solve(&mut self) -> Result<JadeReport> {
		let npop = self.config.popsize;
		let generations = self.config.generations;
		let mode = self.config.mode;

		self.phase = Phase::Uninitialized;
		self.archive.clear();
		if self.config.parallel.enabled {
			self.config.parallel.install();
		}

		let mut pop = init_population(&self.bounds, npop, &self.feed, &mut self.rng)?;
		self.phase = Phase::Initialized;
		log::debug!(
			"starting: dim={} NP={} p={} c={} generations={} pmcrade={}",
			self.bounds.dimension(),
			npop,
			self.config.best_fraction,
			self.config.adaptation_rate,
			generations,
			self.config.pmcrade
		);

		self.phase = Phase::Evaluating;
		let fitness = evaluate_population(&pop, self.func, &self.config.parallel);
		let mut nfev = npop;
		let mut ranking = FitnessRanking::from_fitness(&fitness, mode);
		let mut next = pop.clone();
		let mut adaptive = AdaptiveState::new(self.config.adaptation_rate, self.config.pmcrade);

		let mut nit = 0;
		let mut error = None;
		let mut stopped = false;

		for generation in 0..generations {
			self.phase = Phase::Evolving { generation };
			if self.config.progress_every > 0 && generation % self.config.progress_every == 0 {
				log::info!(
					"generation {:5}  best={:.6e}  mu_F={:.3}  mu_CR={:.3}",
					generation,
					ranking.best().map_or(f64::NAN, |r| r.fitness),
					adaptive.mu_f,
					adaptive.mu_cr
				);
			}

			let outcome = match self.evolve_generation(&pop, &ranking, &mut next, &mut adaptive) {
				Ok(outcome) => outcome,
				Err(e) => {
					log::warn!("generation {} aborted: {}", generation, e);
					error = Some(e);
					break;
				}
			};
			std::mem::swap(&mut pop, &mut next);
			ranking = FitnessRanking::from_fitness(&outcome.fitness, mode);
			nit = generation + 1;
			nfev += npop;

			let (best_x, best_f) = ranked_row(&pop, ranking.best());
			let worst_f = ranking.worst().map_or(f64::NAN, |r| r.fitness);
			let convergence = adaptive::std_dev(&outcome.fitness);
			log::debug!(
				"generation {:5}  best={:.6e}  worst={:.6e}  accepted={}/{}  archive={}  mu_F={:.4}  mu_CR={:.4}",
				generation,
				best_f,
				worst_f,
				outcome.accepted,
				npop,
				self.archive.len(),
				adaptive.mu_f,
				adaptive.mu_cr
			);

			if let Some(cb) = self.callback.as_mut() {
				let intermediate = JadeIntermediate {
					iter: nit,
					x: best_x,
					fun: best_f,
					worst_fun: worst_f,
					convergence,
					mu_f: adaptive.mu_f,
					mu_cr: adaptive.mu_cr,
					archive_size: self.archive.len(),
					accepted: outcome.accepted,
				};
				if cb(&intermediate) == CallbackAction::Stop {
					stopped = true;
					break;
				}
			}
		}

		let (phase, success, message) = match &error {
			Some(e) => (Phase::Terminated, false, format!("Terminated after {} generations: {}", nit, e)),
			None if stopped => (Phase::Terminated, true, "Optimization stopped by callback".to_string()),
			None => (Phase::Converged, true, format!("Completed {} generations", generations)),
		};
		self.phase = phase;
		log::info!("JADE finished: {}", message);

		let (x, fun) = ranked_row(&pop, ranking.best());
		let (worst_x, worst_fun) = ranked_row(&pop, ranking.worst());
		Ok(JadeReport {
			x,
			fun,
			worst_x,
			worst_fun,
			success,
			message,
			nit,
			nfev,
			population: pop,
			ranking,
			mu_f: adaptive.mu_f,
			mu_cr: adaptive.mu_cr,
			archive_size: self.archive.len(),
			phase,
			error,
		})
	}

	/// Run, then gather the best fitness of every participant. Printing the
	/// statistics is left to the caller.
	pub fn solve_and_aggregate(
		&mut self,
		aggregator: &mut dyn Aggregator,
	) -> Result<(JadeReport, Option<RunStatistics>)> {
		let report = self.solve()?;
		let stats = gather_statistics(aggregator, report.fun, self.config.report_level)?;
		Ok((report, stats))
	}

	/// One generation: trials for every slot, selection into `next`,
	/// archive cleanup and parameter adaptation. `pop` and `ranking` are
	/// left untouched.
	fn evolve_generation(
		&mut self,
		pop: &Array2<f64>,
		ranking: &FitnessRanking,
		next: &mut Array2<f64>,
		adaptive: &mut AdaptiveState,
	) -> Result<GenerationOutcome> {
		let npop = pop.nrows();
		let mode = self.config.mode;
		let best = ranking.best().map(|r| r.fitness).ok_or(JadeError::MissingFitness { index: 0 })?;
		let current_fitness = ranking.fitness_by_slot(npop)?;

		let trials = self.build_trials(pop, ranking, adaptive)?;
		let (xs, params): (Vec<Array1<f64>>, Vec<(f64, f64)>) =
			trials.into_iter().map(|t| (t.x, (t.f, t.cr))).unzip();
		let trial_fitness = evaluate_trials(&xs, self.func, &self.config.parallel);

		let mut success = SuccessSets::with_capacity(npop);
		let mut next_fitness = vec![f64::NAN; npop];
		for (i, (trial, &trial_f)) in xs.iter().zip(trial_fitness.iter()).enumerate() {
			let current = current_fitness[i];
			if is_accepted(mode, trial_f, current, best) {
				let (f, cr) = params[i];
				next.row_mut(i).assign(trial);
				next_fitness[i] = trial_f;
				success.record(f, cr, pop.row(i).to_owned());
			} else {
				next.row_mut(i).assign(&pop.row(i));
				next_fitness[i] = current;
			}
		}

		let accepted = success.len();
		let SuccessSets { f, cr, parents } = success;
		self.archive.extend(parents);
		self.archive.cleanup(npop, &mut self.rng)?;
		adaptive.update(&f, &cr);
		Ok(GenerationOutcome { fitness: next_fitness, accepted })
	}

	fn build_trials(
		&mut self,
		pop: &Array2<f64>,
		ranking: &FitnessRanking,
		adaptive: &AdaptiveState,
	) -> Result<Vec<Trial>> {
		let npop = pop.nrows();
		let archive = &self.archive;
		let bounds = &self.bounds;
		let pool = self.pool;
		if self.config.parallel.enabled {
			// child seeds come from the instance source in slot order
			let seeds: Vec<u64> = (0..npop).map(|_| self.rng.next_seed()).collect();
			seeds
				.into_par_iter()
				.enumerate()
				.map(|(i, seed)| {
					let mut rng = RandomSource::from_seed(seed);
					build_trial(i, pop, ranking, archive, bounds, adaptive, pool, &mut rng)
				})
				.collect()
		} else {
			let rng = &mut self.rng;
			(0..npop)
				.map(|i| build_trial(i, pop, ranking, archive, bounds, adaptive, pool, rng))
				.collect()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	#[test]
	fn test_builder_defaults_and_validation() {
		let cfg = JadeConfigBuilder::new().build().unwrap();
		assert_eq!(cfg, JadeConfig::default());
		assert_eq!(cfg.popsize, 100);
		assert_eq!(cfg.generations, 1000);

		assert_eq!(JadeConfigBuilder::new().popsize(0).build(), Err(JadeError::EmptyPopulation));
		assert_eq!(
			JadeConfigBuilder::new().best_fraction(1.0).build(),
			Err(JadeError::InvalidBestFraction { p: 1.0 })
		);
		assert_eq!(
			JadeConfigBuilder::new().adaptation_rate(-0.1).build(),
			Err(JadeError::InvalidAdaptationRate { c: -0.1 })
		);
		let err = JadeConfigBuilder::new()
			.popsize(2)
			.feed(vec![Array1::zeros(2), Array1::zeros(2)])
			.build()
			.unwrap_err();
		assert_eq!(err, JadeError::FeedTooLarge { feed: 2, popsize: 2 });
	}

	#[test]
	fn test_mode_parsing() {
		assert_eq!("max".parse::<Mode>(), Ok(Mode::Maximize));
		assert_eq!("Minimize".parse::<Mode>(), Ok(Mode::Minimize));
		assert!("sideways".parse::<Mode>().is_err());
		assert_eq!(Mode::Maximize.to_string(), "maximize");
	}

	#[test]
	fn test_config_from_json() {
		let cfg = JadeConfig::from_json_str(r#"{"popsize": 20, "mode": "maximize", "pmcrade": true}"#)
			.unwrap();
		assert_eq!(cfg.popsize, 20);
		assert_eq!(cfg.mode, Mode::Maximize);
		assert!(cfg.pmcrade);
		assert_eq!(cfg.generations, 1000);
		assert!(JadeConfig::from_json_str("{ not json").unwrap_err().is_config_error());
	}

	#[test]
	fn test_feed_dimension_checked_against_bounds() {
		let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
		let cfg = JadeConfigBuilder::new()
			.popsize(5)
			.add_feed(Array1::zeros(3))
			.build()
			.unwrap();
		assert!(matches!(
			Jade::new(&sphere, bounds, cfg),
			Err(JadeError::FeedDimensionMismatch { index: 0, expected: 2, got: 3 })
		));
	}

	#[test]
	fn test_phase_after_run() {
		let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
		let cfg = JadeConfigBuilder::new().popsize(10).generations(5).seed(1).build().unwrap();
		let mut de = Jade::new(&sphere, bounds, cfg).unwrap();
		assert_eq!(de.phase(), Phase::Uninitialized);
		let report = de.solve().unwrap();
		assert_eq!(de.phase(), Phase::Converged);
		assert_eq!(report.phase, Phase::Converged);
		assert_eq!(report.nit, 5);
		assert_eq!(report.nfev, 60);
		assert!(report.success);
		assert!(report.error.is_none());
		assert!(report.fun <= report.worst_fun);
	}

	#[test]
	fn test_zero_generations_reports_initial_population() {
		let bounds = Bounds::uniform(3, -5.0, 5.0).unwrap();
		let feed = array![1.0, -1.0, 0.5];
		let cfg = JadeConfigBuilder::new()
			.popsize(12)
			.generations(0)
			.seed(5)
			.add_feed(feed.clone())
			.build()
			.unwrap();
		let report = Jade::new(&sphere, bounds.clone(), cfg).unwrap().solve().unwrap();

		let mut rng = RandomSource::from_seed(5);
		let initial = init_population(&bounds, 12, &[feed], &mut rng).unwrap();
		assert_eq!(report.population, initial);

		let fitness: Vec<f64> = initial.rows().into_iter().map(|r| sphere(&r.to_owned())).collect();
		assert_eq!(report.ranking, FitnessRanking::from_fitness(&fitness, Mode::Minimize));
		assert_eq!(report.population_fitness().unwrap().to_vec(), fitness);
		assert_eq!(report.phase, Phase::Converged);
		assert_eq!((report.nit, report.nfev, report.archive_size), (0, 12, 0));
	}

	#[test]
	fn test_internal_error_keeps_partial_results() {
		// a single individual has no r1 donor
		let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
		let cfg = JadeConfigBuilder::new().popsize(1).generations(3).seed(2).build().unwrap();
		let mut de = Jade::new(&sphere, bounds, cfg).unwrap();
		let report = de.solve().unwrap();
		assert!(!report.success);
		assert_eq!(report.phase, Phase::Terminated);
		assert_eq!(report.nit, 0);
		assert!(matches!(
			report.error,
			Some(JadeError::CandidatesExhausted { what: "r1", index: 0 })
		));
		assert_eq!(report.population.nrows(), 1);
		assert_eq!(report.fun, sphere(&report.population.row(0).to_owned()));
	}

	#[test]
	fn test_callback_stop() {
		let bounds = Bounds::uniform(2, -5.0, 5.0).unwrap();
		let cfg = JadeConfigBuilder::new().popsize(10).generations(50).seed(3).build().unwrap();
		let mut de = Jade::new(&sphere, bounds, cfg).unwrap();
		de.set_callback(Box::new(|it: &JadeIntermediate| {
			if it.iter >= 4 { CallbackAction::Stop } else { CallbackAction::Continue }
		}));
		let report = de.solve().unwrap();
		assert_eq!(report.nit, 4);
		assert!(report.success);
		assert_eq!(report.phase, Phase::Terminated);
	}
}
