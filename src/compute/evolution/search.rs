//! Generational loop: evaluation, elitism, pairing and genetic operators.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, trace, warn};
use rayon::prelude::*;

use crate::schema::{
    EvolutionConfig, EvolutionConfigError, EvolutionHistory, EvolutionPhase, EvolutionResult,
    EvolutionStats, GenerationReport, GridMaze, Maze, StopReason, check_endpoints,
};

use super::fitness::FitnessEvaluator;
use super::genome::GenomeRng;
use super::robot::Robot;

/// Evolution engine that runs the search.
///
/// Each generation the fittest `elite_count` robots are copied aside, the
/// same number of least fit robots is dropped, and the rest are shuffled into
/// adjacent pairs. Every robot is then crossed with its right-hand neighbour
/// (with probability `crossover_rate`) or mutated, changed robots are
/// re-evaluated, and the elite copies rejoin the population unchanged.
pub struct EvolutionEngine<M = GridMaze> {
    config: EvolutionConfig,
    maze: M,
    rng: GenomeRng,
    seed: u64,
    evaluator: FitnessEvaluator,
    population: Vec<Robot>,
    history: EvolutionHistory,
    generation: usize,
    best_fitness: f64,
    stagnation_count: usize,
    evaluations: u64,
    phase: EvolutionPhase,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine<GridMaze> {
    /// Create an engine for the maze described by `config.maze`.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionConfigError> {
        let maze = config.build_maze()?;
        Self::with_maze(config, maze)
    }
}

impl<M: Maze + Sync> EvolutionEngine<M> {
    /// Create an engine for an arbitrary maze. `config.maze` is ignored.
    ///
    /// The maze is checked once here: its start and goal cells must not be walls.
    pub fn with_maze(config: EvolutionConfig, maze: M) -> Result<Self, EvolutionConfigError> {
        config.validate_parameters()?;
        check_endpoints(&maze)?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let evaluator = FitnessEvaluator::new(config.fitness.clone());

        Ok(Self {
            rng: GenomeRng::new(seed),
            seed,
            evaluator,
            population: Vec::with_capacity(config.population.size),
            history: EvolutionHistory::default(),
            generation: 0,
            best_fitness: f64::NEG_INFINITY,
            stagnation_count: 0,
            evaluations: 0,
            phase: EvolutionPhase::Initializing,
            cancelled: Arc::new(AtomicBool::new(false)),
            config,
            maze,
        })
    }

    /// Get cancellation handle. Setting it stops the run at the next
    /// generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Robots, fittest first once a generation has been evaluated.
    pub fn population(&self) -> &[Robot] {
        &self.population
    }

    /// Completed evolve steps since initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Seed the random stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn maze(&self) -> &M {
        &self.maze
    }

    /// Fittest robot of the current generation.
    pub fn best(&self) -> Option<&Robot> {
        self.population.first()
    }

    /// Build, evaluate and rank a random initial population.
    pub fn initialize(&mut self) {
        self.phase = EvolutionPhase::Initializing;
        self.population.clear();
        self.history = EvolutionHistory::default();
        self.generation = 0;
        self.best_fitness = f64::NEG_INFINITY;
        self.stagnation_count = 0;
        self.evaluations = 0;

        for _ in 0..self.config.population.size {
            let genotype = self.rng.random_genotype(&self.config.constraints);
            self.population.push(Robot::new(genotype));
        }

        self.evaluate_population();
        self.sort_population();
        self.record_generation();
    }

    /// Run one generation: elitism, pairing, operators, re-evaluation.
    ///
    /// A fresh engine builds its initial population first.
    pub fn advance(&mut self) {
        if self.population.is_empty() {
            self.initialize();
        }

        self.phase = EvolutionPhase::Evolving;
        self.step_generation();
        self.evaluate_population();
        self.sort_population();
        self.record_generation();
    }

    /// Evaluate robots whose genotype changed since their last evaluation.
    fn evaluate_population(&mut self) {
        self.phase = EvolutionPhase::Evaluating;
        let evaluator = &self.evaluator;
        let maze = &self.maze;

        let evaluated = self
            .population
            .par_iter_mut()
            .filter(|robot| !robot.is_evaluated())
            .map(|robot| robot.evaluate(evaluator, maze))
            .count();

        self.evaluations += evaluated as u64;
        trace!("evaluated {} robots", evaluated);
    }

    /// Sort by fitness (descending).
    fn sort_population(&mut self) {
        self.population
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    /// Track best fitness and append history for the current generation.
    fn record_generation(&mut self) {
        let gen_best = self.population[0].fitness();
        if gen_best > self.best_fitness {
            self.best_fitness = gen_best;
            self.stagnation_count = 0;
            info!(
                "Generation {}: best fitness {:.4} ({})",
                self.generation,
                gen_best,
                self.population[0].phenotype()
            );
        } else {
            self.stagnation_count += 1;
        }

        let count = self.population.len() as f64;
        let avg_fitness = self.population.iter().map(|r| r.fitness()).sum::<f64>() / count;
        let variance = self
            .population
            .iter()
            .map(|r| (r.fitness() - avg_fitness).powi(2))
            .sum::<f64>()
            / count;
        let avg_length = self
            .population
            .iter()
            .map(|r| r.genotype().len() as f64)
            .sum::<f64>()
            / count;

        self.history.best_fitness.push(gen_best);
        self.history.avg_fitness.push(avg_fitness);
        self.history.fitness_std.push(variance.sqrt());
        self.history.avg_genome_length.push(avg_length);

        debug!(
            "Generation {}: best={:.4} avg={:.4} std={:.4} avg_len={:.1}",
            self.generation,
            gen_best,
            avg_fitness,
            variance.sqrt(),
            avg_length
        );
    }

    /// Genetic algorithm step.
    fn step_generation(&mut self) {
        let size = self.population.len();
        let elite_count = self.config.population.elite_count.min(size);

        // Copies of the fittest survive untouched; the least fit are culled.
        let elites: Vec<Robot> = self.population[..elite_count].to_vec();
        self.population.truncate(size - elite_count);

        self.rng.shuffle(&mut self.population);

        let crossover_rate = self.config.operators.crossover_rate;
        let len = self.population.len();
        for i in 0..len {
            if i + 1 < len && self.rng.chance(crossover_rate) {
                self.crossover_pair(i);
            } else {
                self.mutate_robot(i);
            }
        }

        self.population.extend(elites);
        self.generation += 1;
    }

    /// Replace robots `i` and `i + 1` with their crossover children.
    fn crossover_pair(&mut self, i: usize) {
        let children = self
            .rng
            .crossover(self.population[i].genotype(), self.population[i + 1].genotype());

        match children {
            Some((first, second)) => {
                self.population[i].set_genotype(first);
                self.population[i + 1].set_genotype(second);
            }
            None => {
                debug!(
                    "Crossover of {}-bit and {}-bit genotypes has no cut point, mutating instead",
                    self.population[i].genotype().len(),
                    self.population[i + 1].genotype().len()
                );
                self.mutate_robot(i);
            }
        }
    }

    fn mutate_robot(&mut self, i: usize) {
        let mutated = self.rng.mutate(self.population[i].genotype());
        self.population[i].set_genotype(mutated);
    }

    /// Current progress report, `None` before the initial population exists.
    pub fn report(&self) -> Option<GenerationReport> {
        let best = self.population.first()?.to_snapshot();
        let fitness: Vec<f64> = self.population.iter().map(|r| r.fitness()).collect();
        let avg_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;

        Some(GenerationReport {
            generation: self.generation,
            best,
            fitness,
            avg_fitness,
            best_fitness: self.best_fitness,
            stagnation_count: self.stagnation_count,
            phase: self.phase,
        })
    }

    /// Check if evolution should stop.
    fn should_stop(&self) -> Option<StopReason> {
        let population = &self.config.population;

        if self.best_fitness >= population.target_fitness {
            return Some(StopReason::TargetReached);
        }

        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if let Some(max) = population.max_generations
            && self.generation >= max
        {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(limit) = population.stagnation_limit
            && self.stagnation_count >= limit
        {
            return Some(StopReason::Stagnation);
        }

        None
    }

    /// Run evolution with progress callback.
    ///
    /// The callback sees one report per generation, starting with the
    /// initial population. The last report carries a terminal phase.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> EvolutionResult
    where
        F: FnMut(&GenerationReport),
    {
        let start_time = Instant::now();

        info!(
            "Starting evolution: population={} elites={} seed={}",
            self.config.population.size, self.config.population.elite_count, self.seed
        );

        self.initialize();

        let stop_reason = loop {
            let stop = self.should_stop();
            self.phase = match stop {
                Some(StopReason::TargetReached) => EvolutionPhase::Converged,
                Some(_) => EvolutionPhase::Stopped,
                None => EvolutionPhase::Evolving,
            };

            if let Some(report) = self.report() {
                callback(&report);
            }

            if let Some(reason) = stop {
                break reason;
            }

            self.advance();
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        let best = self.population[0].to_snapshot();

        match stop_reason {
            StopReason::TargetReached => info!(
                "Converged after {} generations: {} (fitness {:.4})",
                self.generation, best.phenotype, best.fitness
            ),
            reason => warn!(
                "Stopped after {} generations without converging: {} (best fitness {:.4})",
                self.generation, reason, best.fitness
            ),
        }

        let final_avg_fitness = self.history.avg_fitness.last().copied().unwrap_or(0.0);

        EvolutionResult {
            best,
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: self.best_fitness,
                final_avg_fitness,
                elapsed_seconds: elapsed,
                evaluations_per_second: self.evaluations as f64 / elapsed.max(f64::EPSILON),
                random_seed: self.seed,
                stop_reason,
            },
            history: self.history.clone(),
        }
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }
}
