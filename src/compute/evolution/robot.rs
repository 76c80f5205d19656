//! The unit of selection: a genotype, its decoded phenotype and its fitness.

use super::fitness::{Evaluation, FitnessEvaluator};
use super::genome::{Genotype, Phenotype};
use crate::compute::Outcome;
use crate::schema::{Maze, Position, RobotSnapshot};

/// A robot in the population.
///
/// The phenotype is rebuilt whenever the genotype is replaced and the cached
/// evaluation is dropped at the same time, so a fitness read after a genetic
/// operator always reflects the new genotype once [`Robot::evaluate`] ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    genotype: Genotype,
    phenotype: Phenotype,
    evaluation: Option<Evaluation>,
}

impl Robot {
    /// Build an unevaluated robot.
    pub fn new(genotype: Genotype) -> Self {
        let phenotype = genotype.decode();
        Self {
            genotype,
            phenotype,
            evaluation: None,
        }
    }

    /// Build an already evaluated robot.
    pub fn evaluated<M: Maze + ?Sized>(
        genotype: Genotype,
        evaluator: &FitnessEvaluator,
        maze: &M,
    ) -> Self {
        let mut robot = Self::new(genotype);
        robot.evaluate(evaluator, maze);
        robot
    }

    #[inline]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    #[inline]
    pub fn phenotype(&self) -> &Phenotype {
        &self.phenotype
    }

    /// Replace the genotype, rebuilding the phenotype and invalidating fitness.
    pub fn set_genotype(&mut self, genotype: Genotype) {
        *self = Self::new(genotype);
    }

    /// Whether the cached fitness matches the current genotype.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// Simulate against `maze` and cache the result.
    pub fn evaluate<M: Maze + ?Sized>(&mut self, evaluator: &FitnessEvaluator, maze: &M) -> f64 {
        let evaluation = evaluator.evaluate(self.phenotype.instructions(), maze);
        self.evaluation = Some(evaluation);
        evaluation.fitness
    }

    /// Fitness of the last evaluation, 0.0 before the first one.
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.evaluation.map_or(0.0, |e| e.fitness)
    }

    #[inline]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Convert to snapshot for reporting.
    pub fn to_snapshot(&self) -> RobotSnapshot {
        let (outcome, moves_made, final_position) = match &self.evaluation {
            Some(e) => (e.report.outcome, e.report.moves_made, e.report.final_position),
            None => (Outcome::Exhausted, 0, Position::default()),
        };

        RobotSnapshot {
            genotype: self.genotype.to_string(),
            phenotype: self.phenotype.to_string(),
            fitness: self.fitness(),
            outcome,
            moves_made,
            final_position,
        }
    }
}
