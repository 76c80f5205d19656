//! Maze description and the read-only query contract used by the simulator.
//!
//! A maze is a rectangular grid of cells written as text, one string per row:
//!
//! ```text
//! *   wall
//! .   open (a space is also accepted)
//! S   start cell
//! $   goal cell
//! ```
//!
//! The outer boundary must be walls, so a robot always collides before it
//! could leave the grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Open,
    Wall,
    Start,
    Goal,
}

impl CellKind {
    /// Parse a layout character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(CellKind::Wall),
            '.' | ' ' => Some(CellKind::Open),
            'S' => Some(CellKind::Start),
            '$' => Some(CellKind::Goal),
            _ => None,
        }
    }

    /// Layout character for this cell.
    pub fn to_char(self) -> char {
        match self {
            CellKind::Open => '.',
            CellKind::Wall => '*',
            CellKind::Start => 'S',
            CellKind::Goal => '$',
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == CellKind::Wall
    }
}

/// Compass heading. Discriminants follow clockwise order starting at North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Heading {
    North = 0,
    East = 1,
    #[default]
    South = 2,
    West = 3,
}

impl Heading {
    const CLOCKWISE: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Rotate one step clockwise (West wraps to North).
    pub fn turn_right(self) -> Self {
        Self::CLOCKWISE[(self as usize + 1) % 4]
    }

    /// Rotate one step counter-clockwise (North wraps to West).
    pub fn turn_left(self) -> Self {
        Self::CLOCKWISE[(self as usize + 3) % 4]
    }

    /// Row/column delta of one step along this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }
}

/// Grid coordinate. Rows grow southwards, columns grow eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell one step along `heading`.
    pub fn step(self, heading: Heading) -> Self {
        let (dr, dc) = heading.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Manhattan distance `|drow| + |dcol|`.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only queries the simulator needs from a maze.
///
/// All answers must stay the same for the lifetime of a run.
pub trait Maze {
    /// Cell at `position`. Must be defined for every cell reachable from the start.
    fn cell_at(&self, position: Position) -> CellKind;
    fn start_position(&self) -> Position;
    fn start_heading(&self) -> Heading;
    fn goal_position(&self) -> Position;
}

/// Reference layout: start (1, 1) heading South, goal (10, 11).
///
/// The shortest solution is 25 instructions including the final Stop.
pub const REFERENCE_MAZE: [&str; 12] = [
    "*************",
    "*S...*......*",
    "*.**.*.****.*",
    "*.*..*.*....*",
    "*.*.**.*.**.*",
    "*......*..*.*",
    "*.****.**.*.*",
    "*.*....*..*.*",
    "*.*.**......*",
    "*...*..***.**",
    "*.*.*.*.*..$*",
    "*************",
];

/// Serializable maze description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MazeLayout {
    /// Grid rows, top to bottom.
    pub rows: Vec<String>,
    /// Heading the robot faces at the start cell.
    #[serde(default)]
    pub start_heading: Heading,
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self {
            rows: REFERENCE_MAZE.iter().map(|r| r.to_string()).collect(),
            start_heading: Heading::South,
        }
    }
}

impl MazeLayout {
    /// Build a layout from string rows with the default heading.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            start_heading: Heading::South,
        }
    }
}

/// Maze layout validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("Maze layout has no rows")]
    Empty,
    #[error("Row {row} has width {width}, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("Unknown cell character {found:?} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, found: char },
    #[error("Maze must contain exactly one start cell, found {0}")]
    StartCount(usize),
    #[error("Maze must contain exactly one goal cell, found {0}")]
    GoalCount(usize),
    #[error("Boundary cell ({row}, {col}) is not a wall")]
    OpenBoundary { row: usize, col: usize },
    #[error("The {endpoint} cell {position} is a wall")]
    WalledEndpoint {
        endpoint: &'static str,
        position: Position,
    },
}

/// Check a maze through its query contract: the start and goal must be
/// enterable cells.
pub fn check_endpoints<M: Maze + ?Sized>(maze: &M) -> Result<(), MazeError> {
    for (endpoint, position) in [
        ("start", maze.start_position()),
        ("goal", maze.goal_position()),
    ] {
        if maze.cell_at(position).is_wall() {
            return Err(MazeError::WalledEndpoint { endpoint, position });
        }
    }
    Ok(())
}

/// Validated, immutable grid maze.
#[derive(Debug, Clone)]
pub struct GridMaze {
    cells: Vec<CellKind>,
    width: usize,
    height: usize,
    start: Position,
    start_heading: Heading,
    goal: Position,
}

impl GridMaze {
    /// Parse and validate a layout.
    pub fn from_layout(layout: &MazeLayout) -> Result<Self, MazeError> {
        let height = layout.rows.len();
        if height == 0 {
            return Err(MazeError::Empty);
        }
        let width = layout.rows[0].chars().count();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut starts = Vec::new();
        let mut goals = Vec::new();

        for (row, line) in layout.rows.iter().enumerate() {
            let row_width = line.chars().count();
            if row_width != width {
                return Err(MazeError::Ragged {
                    row,
                    width: row_width,
                    expected: width,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let cell =
                    CellKind::from_char(c).ok_or(MazeError::UnknownCell { row, col, found: c })?;
                let on_boundary = row == 0 || col == 0 || row == height - 1 || col == width - 1;
                if on_boundary && !cell.is_wall() {
                    return Err(MazeError::OpenBoundary { row, col });
                }
                match cell {
                    CellKind::Start => starts.push(Position::new(row as i32, col as i32)),
                    CellKind::Goal => goals.push(Position::new(row as i32, col as i32)),
                    _ => {}
                }
                cells.push(cell);
            }
        }

        let start = match starts.as_slice() {
            [only] => *only,
            _ => return Err(MazeError::StartCount(starts.len())),
        };
        let goal = match goals.as_slice() {
            [only] => *only,
            _ => return Err(MazeError::GoalCount(goals.len())),
        };

        Ok(Self {
            cells,
            width,
            height,
            start,
            start_heading: layout.start_heading,
            goal,
        })
    }

    /// The reference maze.
    pub fn reference() -> Self {
        Self::from_layout(&MazeLayout::default()).expect("reference maze is valid")
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Render back to layout rows.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

impl Maze for GridMaze {
    fn cell_at(&self, position: Position) -> CellKind {
        if position.row < 0
            || position.col < 0
            || position.row as usize >= self.height
            || position.col as usize >= self.width
        {
            return CellKind::Wall;
        }
        self.cells[position.row as usize * self.width + position.col as usize]
    }

    fn start_position(&self) -> Position {
        self.start
    }

    fn start_heading(&self) -> Heading {
        self.start_heading
    }

    fn goal_position(&self) -> Position {
        self.goal
    }
}

impl<M: Maze + ?Sized> Maze for &M {
    fn cell_at(&self, position: Position) -> CellKind {
        (**self).cell_at(position)
    }

    fn start_position(&self) -> Position {
        (**self).start_position()
    }

    fn start_heading(&self) -> Heading {
        (**self).start_heading()
    }

    fn goal_position(&self) -> Position {
        (**self).goal_position()
    }
}
