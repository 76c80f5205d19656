//! Evolutionary search for maze-solving instruction sequences.
//!
//! # Overview
//!
//! - **Genome** (`genome`): bit-string genotypes, phenotype decoding, and the
//!   seeded random stream that drives mutation, crossover and pairing
//! - **Fitness** (`fitness`): simulation outcome to a score in [0, 1]
//! - **Robot** (`robot`): genotype plus its cached phenotype and fitness
//! - **Search** (`search`): the generational loop with elitism
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_evolver::schema::EvolutionConfig;
//! use maze_evolver::compute::evolution::EvolutionEngine;
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config).expect("valid config");
//! let result = engine.run_with_callback(|report| {
//!     println!("Generation {}: best fitness = {:.3} ({})",
//!         report.generation, report.best.fitness, report.best.phenotype);
//! });
//!
//! println!("Solved: {} in {} generations", result.converged(), result.stats.generations);
//! ```

mod fitness;
mod genome;
mod robot;
mod search;

pub use fitness::{Evaluation, FitnessEvaluator};
pub use genome::{GenomeError, GenomeRng, Genotype, Phenotype};
pub use robot::Robot;
pub use search::EvolutionEngine;
