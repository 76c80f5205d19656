//! Maze simulator: runs a phenotype against a maze.

use serde::{Deserialize, Serialize};

use super::Instruction;
use crate::schema::{Maze, Position};

/// How a maze walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moved forward into a wall.
    HitWall,
    /// Executed Stop while standing on the goal.
    Stopped,
    /// Ran out of instructions.
    Exhausted,
}

/// Terminal state of a maze walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub outcome: Outcome,
    /// Cell the robot ended on. For [`Outcome::HitWall`] this is the wall cell.
    pub final_position: Position,
    /// Instructions consumed, turns and stops included.
    pub moves_made: usize,
}

impl SimulationReport {
    #[inline]
    pub fn reached_goal(&self) -> bool {
        self.outcome == Outcome::Stopped
    }
}

/// Walk `instructions` through `maze` from its start cell.
///
/// Every consumed instruction counts as a move. The walk ends at the first
/// Forward into a wall or the first Stop on the goal; later instructions are
/// never looked at.
pub fn simulate<M: Maze + ?Sized>(instructions: &[Instruction], maze: &M) -> SimulationReport {
    let goal = maze.goal_position();
    let mut position = maze.start_position();
    let mut heading = maze.start_heading();
    let mut moves_made = 0;

    for instruction in instructions {
        moves_made += 1;

        match instruction {
            Instruction::Forward => {
                position = position.step(heading);
                if maze.cell_at(position).is_wall() {
                    return SimulationReport {
                        outcome: Outcome::HitWall,
                        final_position: position,
                        moves_made,
                    };
                }
            }
            Instruction::TurnRight => heading = heading.turn_right(),
            Instruction::TurnLeft => heading = heading.turn_left(),
            Instruction::Stop => {
                if position == goal {
                    return SimulationReport {
                        outcome: Outcome::Stopped,
                        final_position: position,
                        moves_made,
                    };
                }
            }
        }
    }

    SimulationReport {
        outcome: Outcome::Exhausted,
        final_position: position,
        moves_made,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Instruction::*;
    use crate::schema::{GridMaze, MazeLayout};

    fn corridor() -> GridMaze {
        // Start (1, 1) facing South, goal directly below.
        GridMaze::from_layout(&MazeLayout::from_rows(["***", "*S*", "*$*", "***"])).unwrap()
    }

    #[test]
    fn test_forward_then_stop_on_goal() {
        let report = simulate(&[Forward, TurnRight, Stop], &corridor());
        assert_eq!(report.outcome, Outcome::Stopped);
        assert_eq!(report.moves_made, 3);
        assert_eq!(report.final_position, Position::new(2, 1));
    }

    #[test]
    fn test_wall_hit_short_circuits() {
        let maze = corridor();
        let report = simulate(&[TurnLeft, Forward, Forward, Stop], &maze);
        assert_eq!(report.outcome, Outcome::HitWall);
        assert_eq!(report.moves_made, 2);
        assert_eq!(report.final_position, Position::new(1, 2));
    }

    #[test]
    fn test_stop_off_goal_continues() {
        let report = simulate(&[Stop, Stop, Forward], &corridor());
        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.moves_made, 3);
        assert_eq!(report.final_position, Position::new(2, 1));
    }

    #[test]
    fn test_stop_on_goal_ignores_rest() {
        let report = simulate(&[Forward, Stop, Forward, Forward], &corridor());
        assert_eq!(report.outcome, Outcome::Stopped);
        assert_eq!(report.moves_made, 2);
    }

    #[test]
    fn test_empty_program_is_exhausted_at_start() {
        let maze = corridor();
        let report = simulate(&[], &maze);
        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.moves_made, 0);
        assert_eq!(report.final_position, maze.start_position());
    }

    #[test]
    fn test_reference_solution() {
        let maze = GridMaze::reference();
        let program: Vec<Instruction> = "FFFFLFFFFFRFFFLFFFFRFFLFS"
            .chars()
            .filter_map(Instruction::from_symbol)
            .collect();
        let report = simulate(&program, &maze);
        assert!(report.reached_goal());
        assert_eq!(report.moves_made, 25);
        assert_eq!(report.final_position, maze.goal_position());
    }
}
