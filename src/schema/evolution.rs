//! Progress and result types observed by callers of the evolution engine.
//!
//! These are the only things the engine exposes to the outside world: a
//! stream of [`GenerationReport`]s (one per generation, after sorting) and a
//! final [`EvolutionResult`]. Console output, log files and plots are built
//! on top of them.

use serde::{Deserialize, Serialize};

use super::Position;
use crate::compute::Outcome;

/// Snapshot of a robot for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RobotSnapshot {
    /// Genotype as a `0`/`1` string.
    pub genotype: String,
    /// Phenotype as instruction symbols, e.g. `FRFLS`.
    pub phenotype: String,
    /// Fitness score in [0, 1].
    pub fitness: f64,
    /// How the maze walk ended.
    pub outcome: Outcome,
    /// Instructions consumed during the walk.
    pub moves_made: usize,
    /// Cell where the walk ended.
    pub final_position: Position,
}

/// Per-generation progress update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number. 0 is the initial population.
    pub generation: usize,
    /// Fitness of every robot, fittest first.
    pub fitness: Vec<f64>,
    /// Fittest robot of this generation.
    pub best: RobotSnapshot,
    /// Average fitness of the population.
    pub avg_fitness: f64,
    /// Best fitness seen during the run so far.
    pub best_fitness: f64,
    /// Generations since the best fitness last improved.
    pub stagnation_count: usize,
    /// Phase the engine is in after producing this report.
    pub phase: EvolutionPhase,
}

/// Evolution history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<f64>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f64>,
    /// Standard deviation per generation.
    pub fitness_std: Vec<f64>,
    /// Average genotype length in bits per generation.
    pub avg_genome_length: Vec<f64>,
}

impl EvolutionHistory {
    /// Number of generations recorded.
    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Current phase of evolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Building the random initial population.
    #[default]
    Initializing,
    /// Simulating robots whose genotype changed.
    Evaluating,
    /// Applying elitism, pairing and genetic operators.
    Evolving,
    /// Target fitness reached.
    Converged,
    /// Stopped without converging (budget, stagnation or cancellation).
    Stopped,
}

/// Final result of evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best robot in the final population.
    pub best: RobotSnapshot,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

impl EvolutionResult {
    /// Whether the run ended by reaching the target fitness.
    pub fn converged(&self) -> bool {
        self.stats.stop_reason == StopReason::TargetReached
    }
}

/// Statistics from evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Evolve steps completed after the initial population.
    pub generations: usize,
    /// Total robot simulations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Average fitness of final population.
    pub final_avg_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Evaluations per second.
    pub evaluations_per_second: f64,
    /// Seed the random stream was created from.
    pub random_seed: u64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Best fitness reached the target.
    TargetReached,
    /// Generation budget exhausted without converging.
    MaxGenerations,
    /// Stagnation limit hit.
    Stagnation,
    /// Caller requested a halt.
    Cancelled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StopReason::TargetReached => "target fitness reached",
            StopReason::MaxGenerations => "did not converge within the generation budget",
            StopReason::Stagnation => "best fitness stagnated",
            StopReason::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}
