//! Fitness function: scores a maze walk in [0, 1].
//!
//! Stopping on the goal scores 1.0. Any other ending scores
//! `unsolved_base - distance_decrement * manhattan(final, goal)`, so a robot
//! that crashes next to the goal still outranks one that wanders far away.
//! Both branches then lose `moves_decrement` per move beyond `ideal_moves`,
//! and the result is clamped at 0.

use crate::compute::{Instruction, SimulationReport, simulate};
use crate::schema::{FitnessConfig, Maze, Position};

/// Fitness plus the walk it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub report: SimulationReport,
}

/// Simulates phenotypes and scores the result.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    config: FitnessConfig,
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self::new(FitnessConfig::default())
    }
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(config: FitnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// Run `instructions` through `maze` and score the walk.
    pub fn evaluate<M: Maze + ?Sized>(&self, instructions: &[Instruction], maze: &M) -> Evaluation {
        let report = simulate(instructions, maze);
        Evaluation {
            fitness: self.score(&report, maze.goal_position()),
            report,
        }
    }

    /// Score a finished walk.
    pub fn score(&self, report: &SimulationReport, goal: Position) -> f64 {
        let config = &self.config;

        let mut fitness = if report.reached_goal() {
            1.0
        } else {
            let distance = report.final_position.manhattan_distance(goal) as f64;
            config.unsolved_base - config.distance_decrement * distance
        };

        if report.moves_made > config.ideal_moves {
            fitness -= (report.moves_made - config.ideal_moves) as f64 * config.moves_decrement;
        }

        fitness.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Outcome;
    use crate::schema::GridMaze;

    fn report(outcome: Outcome, row: i32, col: i32, moves_made: usize) -> SimulationReport {
        SimulationReport {
            outcome,
            final_position: Position::new(row, col),
            moves_made,
        }
    }

    const GOAL: Position = Position::new(10, 11);

    #[test]
    fn test_goal_reached_scores_one() {
        let evaluator = FitnessEvaluator::default();
        let fitness = evaluator.score(&report(Outcome::Stopped, 10, 11, 26), GOAL);
        assert!((fitness - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_penalty() {
        let evaluator = FitnessEvaluator::default();
        // Start cell: distance 19.
        let fitness = evaluator.score(&report(Outcome::HitWall, 1, 1, 1), GOAL);
        assert!((fitness - (0.95 - 0.04 * 19.0)).abs() < 1e-12);

        let near = evaluator.score(&report(Outcome::HitWall, 9, 11, 1), GOAL);
        let far = evaluator.score(&report(Outcome::HitWall, 2, 1, 1), GOAL);
        assert!(near > far);
    }

    #[test]
    fn test_move_penalty_applies_in_both_branches() {
        let evaluator = FitnessEvaluator::default();
        let solved = evaluator.score(&report(Outcome::Stopped, 10, 11, 36), GOAL);
        assert!((solved - (1.0 - 10.0 * 0.005)).abs() < 1e-12);

        let unsolved = evaluator.score(&report(Outcome::Exhausted, 10, 10, 36), GOAL);
        assert!((unsolved - (0.95 - 0.04 - 10.0 * 0.005)).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_at_zero() {
        let evaluator = FitnessEvaluator::default();
        let fitness = evaluator.score(&report(Outcome::Exhausted, 1, 1, 500), GOAL);
        assert_eq!(fitness, 0.0);
    }

    #[test]
    fn test_goal_dominance_at_equal_moves() {
        let evaluator = FitnessEvaluator::default();
        for moves in [1, 26, 40, 120] {
            let solved = evaluator.score(&report(Outcome::Stopped, 10, 11, moves), GOAL);
            // Exhausted on the goal without stopping is still unsolved.
            let unsolved = evaluator.score(&report(Outcome::Exhausted, 10, 11, moves), GOAL);
            assert!(solved >= unsolved);
        }
    }

    #[test]
    fn test_evaluate_reference_solution() {
        let maze = GridMaze::reference();
        let program: Vec<Instruction> = "FFFFLFFFFFRFFFLFFFFRFFLFS"
            .chars()
            .filter_map(Instruction::from_symbol)
            .collect();
        let evaluation = FitnessEvaluator::default().evaluate(&program, &maze);
        assert_eq!(evaluation.report.outcome, Outcome::Stopped);
        assert!((evaluation.fitness - 1.0).abs() < 1e-12);
    }
}
