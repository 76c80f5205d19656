//! Configuration types for an evolutionary maze run.

use serde::{Deserialize, Serialize};

use super::{GridMaze, MazeError, MazeLayout};

/// Top-level configuration for a maze-solving run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population and termination settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Genetic operator settings.
    #[serde(default)]
    pub operators: OperatorConfig,
    /// Bounds for randomly generated genomes.
    #[serde(default)]
    pub constraints: GenomeConstraints,
    /// Fitness function tuning.
    #[serde(default)]
    pub fitness: FitnessConfig,
    /// The maze to solve.
    #[serde(default)]
    pub maze: MazeLayout,
    /// Random seed for reproducibility. Drawn from entropy when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            operators: OperatorConfig::default(),
            constraints: GenomeConstraints::default(),
            fitness: FitnessConfig::default(),
            maze: MazeLayout::default(),
            random_seed: None,
        }
    }
}

/// Population size, elitism and termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of robots, constant across generations.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Fittest robots copied unchanged into the next generation. The same
    /// number of least fit robots is culled each generation.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Best fitness that ends the run. 1.0 demands a minimal path, ~0.9
    /// accepts any path that stops on the goal.
    #[serde(default = "default_target_fitness")]
    pub target_fitness: f64,
    /// Generation budget. Unbounded when absent.
    #[serde(default)]
    pub max_generations: Option<usize>,
    /// Stop after this many generations without a new best fitness.
    #[serde(default)]
    pub stagnation_limit: Option<usize>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            elite_count: default_elite_count(),
            target_fitness: default_target_fitness(),
            max_generations: None,
            stagnation_limit: None,
        }
    }
}

fn default_population_size() -> usize {
    500
}
fn default_elite_count() -> usize {
    10
}
fn default_target_fitness() -> f64 {
    1.0
}

/// Genetic operator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Probability that a robot is crossed with its neighbour rather than
    /// mutated (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.7
}

/// Bounds for random genomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeConstraints {
    /// Phenotype length range `[min, max)` in instructions.
    #[serde(default = "default_phenotype_length_bounds")]
    pub phenotype_length_bounds: (usize, usize),
}

impl Default for GenomeConstraints {
    fn default() -> Self {
        Self {
            phenotype_length_bounds: default_phenotype_length_bounds(),
        }
    }
}

fn default_phenotype_length_bounds() -> (usize, usize) {
    (10, 64)
}

/// Fitness function tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Base score for a robot that did not stop on the goal.
    #[serde(default = "default_unsolved_base")]
    pub unsolved_base: f64,
    /// Penalty per cell of Manhattan distance to the goal.
    #[serde(default = "default_distance_decrement")]
    pub distance_decrement: f64,
    /// Move count allowed before the path-length penalty applies.
    #[serde(default = "default_ideal_moves")]
    pub ideal_moves: usize,
    /// Penalty per move beyond `ideal_moves`.
    #[serde(default = "default_moves_decrement")]
    pub moves_decrement: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            unsolved_base: default_unsolved_base(),
            distance_decrement: default_distance_decrement(),
            ideal_moves: default_ideal_moves(),
            moves_decrement: default_moves_decrement(),
        }
    }
}

fn default_unsolved_base() -> f64 {
    0.95
}
fn default_distance_decrement() -> f64 {
    0.04
}
fn default_ideal_moves() -> usize {
    26
}
fn default_moves_decrement() -> f64 {
    0.005
}

/// Evolution configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionConfigError {
    #[error("Population size {size} must exceed twice the elite count {elite_count}")]
    PopulationTooSmall { size: usize, elite_count: usize },
    #[error("Crossover rate {0} must be within [0, 1]")]
    InvalidCrossoverRate(f64),
    #[error("Target fitness {0} must be within (0, 1]")]
    InvalidTargetFitness(f64),
    #[error("Generation budget must be positive")]
    ZeroGenerationBudget,
    #[error("Invalid phenotype length bounds: {0}")]
    InvalidBounds(String),
    #[error("Invalid fitness tuning: {0}")]
    InvalidFitness(String),
    #[error("Maze validation failed: {0}")]
    MazeError(#[from] MazeError),
}

impl EvolutionConfig {
    /// Validate the configuration and build the maze it describes.
    pub fn build_maze(&self) -> Result<GridMaze, EvolutionConfigError> {
        self.validate_parameters()?;
        Ok(GridMaze::from_layout(&self.maze)?)
    }

    /// Validate evolution configuration, maze layout included.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        self.build_maze().map(|_| ())
    }

    /// Validate everything except the maze layout.
    pub fn validate_parameters(&self) -> Result<(), EvolutionConfigError> {
        let population = &self.population;
        if population.size <= population.elite_count * 2 || population.size < 2 {
            return Err(EvolutionConfigError::PopulationTooSmall {
                size: population.size,
                elite_count: population.elite_count,
            });
        }

        if !(0.0..=1.0).contains(&self.operators.crossover_rate) {
            return Err(EvolutionConfigError::InvalidCrossoverRate(
                self.operators.crossover_rate,
            ));
        }

        if !(population.target_fitness > 0.0 && population.target_fitness <= 1.0) {
            return Err(EvolutionConfigError::InvalidTargetFitness(
                population.target_fitness,
            ));
        }

        if population.max_generations == Some(0) {
            return Err(EvolutionConfigError::ZeroGenerationBudget);
        }

        let (min, max) = self.constraints.phenotype_length_bounds;
        if min == 0 || min >= max {
            return Err(EvolutionConfigError::InvalidBounds(format!(
                "need 1 <= min < max, got [{}, {})",
                min, max
            )));
        }

        let fitness = &self.fitness;
        let check_non_negative = |value: f64, name: &str| {
            if value < 0.0 || !value.is_finite() {
                Err(EvolutionConfigError::InvalidFitness(format!(
                    "{} ({}) must be a non-negative number",
                    name, value
                )))
            } else {
                Ok(())
            }
        };
        check_non_negative(fitness.unsolved_base, "unsolved_base")?;
        check_non_negative(fitness.distance_decrement, "distance_decrement")?;
        check_non_negative(fitness.moves_decrement, "moves_decrement")?;
        if fitness.unsolved_base > 1.0 {
            return Err(EvolutionConfigError::InvalidFitness(format!(
                "unsolved_base ({}) must not exceed 1.0",
                fitness.unsolved_base
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.size, 500);
        assert_eq!(config.population.elite_count, 10);
        assert_eq!(config.fitness.ideal_moves, 26);
    }

    #[test]
    fn test_population_must_exceed_elites() {
        let mut config = EvolutionConfig::default();
        config.population.size = 20;
        config.population.elite_count = 10;
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::PopulationTooSmall { .. })
        ));

        config.population.size = 21;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        let mut config = EvolutionConfig::default();
        config.operators.crossover_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::InvalidCrossoverRate(_))
        ));

        let mut config = EvolutionConfig::default();
        config.population.max_generations = Some(0);
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::ZeroGenerationBudget)
        ));

        let mut config = EvolutionConfig::default();
        config.constraints.phenotype_length_bounds = (8, 8);
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::InvalidBounds(_))
        ));

        let mut config = EvolutionConfig::default();
        config.population.target_fitness = 0.0;
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::InvalidTargetFitness(_))
        ));

        let mut config = EvolutionConfig::default();
        config.fitness.distance_decrement = -0.1;
        assert!(matches!(
            config.validate(),
            Err(EvolutionConfigError::InvalidFitness(_))
        ));
    }

    #[test]
    fn test_bad_maze_rejected() {
        let config = EvolutionConfig {
            maze: MazeLayout::from_rows(["****", "*S.*", "****"]),
            ..Default::default()
        };
        assert!(matches!(
            config.build_maze(),
            Err(EvolutionConfigError::MazeError(MazeError::GoalCount(0)))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = EvolutionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.population.size, config.population.size);
        assert_eq!(parsed.maze, config.maze);

        let sparse: EvolutionConfig =
            serde_json::from_str(r#"{"population": {"size": 50}, "random_seed": 7}"#).unwrap();
        assert_eq!(sparse.population.size, 50);
        assert_eq!(sparse.population.elite_count, 10);
        assert_eq!(sparse.random_seed, Some(7));
        assert!((sparse.operators.crossover_rate - 0.7).abs() < 1e-12);
    }
}
