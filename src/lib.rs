//! Maze Evolver - Genetic algorithm for maze-solving robots.
//!
//! Each robot carries a bit-string genotype that decodes, two bits at a time,
//! into a program of Forward / TurnRight / TurnLeft / Stop instructions. The
//! program is run against a fixed maze and scored by how close the robot ends
//! to the goal and how many moves it spent. A generational genetic algorithm
//! with elitism, single-point crossover and bit-flip mutation evolves the
//! population until a robot stops on the goal within the ideal move count.
//!
//! # Architecture
//!
//! - `schema`: Configuration, maze and reporting types
//! - `compute`: Instruction codec, maze simulator and evolution engine
//! - `report`: Text log of the per-generation fitness stream
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_evolver::{EvolutionConfig, EvolutionEngine};
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config).expect("valid config");
//! let result = engine.run();
//!
//! println!("Best phenotype: {}", result.best.phenotype);
//! println!("Fitness: {:.3} after {} generations", result.best.fitness, result.stats.generations);
//! ```

pub mod compute;
pub mod report;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, Genotype, Phenotype, Robot};
pub use compute::{Instruction, Outcome, SimulationReport, simulate};
pub use schema::{EvolutionConfig, EvolutionResult, GenerationReport, GridMaze, Maze, StopReason};
