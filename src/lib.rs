//! Solve grid mazes from the Noops mazebot challenge
//!
//! The service hands out a rectangular map of open squares and walls
//! together with a start and an end position, and expects the solution as
//! a string of cardinal moves such as `"NNEESS"`.
//!
//! # Examples
//! ## Solving a maze from its text form
//! ```
//! use mazebot::{Algorithm, Maze};
//!
//! let map = "
//! A X
//!   X
//! X B";
//! let maze = Maze::parse(map.trim()).unwrap();
//! let solution = maze.solve(Algorithm::FloodFill).unwrap();
//! assert_eq!(solution.directions(), "SESE");
//! ```
//!
//! ## Solving a maze as the API delivers it
//! ```
//! use mazebot::{Algorithm, Maze, Point};
//!
//! let rows = ["A X", "  X", "X B"];
//! let maze = Maze::from_rows(&rows, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! let solution = maze.solve(Algorithm::default()).unwrap();
//! assert_eq!(solution.path.len(), 4);
//! ```

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use thiserror::Error;

pub mod client;
#[cfg(feature = "mapgen")]
pub mod maze_generator;

/// Location in the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One cardinal move on the grid
///
/// Declared in the fixed priority order N, W, S, E in which both solvers
/// enumerate and tie-break neighbors.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    /// Neighbor enumeration and tie-break order.
    pub const PRIORITY: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];

    /// Unit offset `(dx, dy)` of this move; `y` grows southwards.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
        }
    }

    /// Single-letter wire token.
    pub const fn token(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::West => 'W',
            Direction::South => 'S',
            Direction::East => 'E',
        }
    }

    pub fn from_token(token: char) -> Result<Self, MazeError> {
        match token {
            'N' => Ok(Direction::North),
            'W' => Ok(Direction::West),
            'S' => Ok(Direction::South),
            'E' => Ok(Direction::East),
            other => Err(MazeError::InvalidToken(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Render a path as the wire format, e.g. `[N, N, E]` -> `"NNE"`.
pub fn encode(path: &[Direction]) -> String {
    path.iter().map(|direction| direction.token()).collect()
}

/// Parse a wire-format direction string back into a path.
///
/// Fails with [`MazeError::InvalidToken`] on any character outside
/// `{N, S, E, W}`.
///
/// # Examples
/// ```
/// use mazebot::{decode, Direction};
///
/// let path = decode("NNE").unwrap();
/// assert_eq!(path, [Direction::North, Direction::North, Direction::East]);
/// assert!(decode("NQE").is_err());
/// ```
pub fn decode(directions: &str) -> Result<Vec<Direction>, MazeError> {
    directions.chars().map(Direction::from_token).collect()
}

/// A single square of the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Cell {
    Open,
    Wall,
    Start,
    End,
}

impl Cell {
    const S_OPEN: char = ' ';
    const S_WALL: char = 'X';
    const S_START: char = 'A';
    const S_END: char = 'B';

    fn from_char(c: char) -> Option<Self> {
        match c {
            Self::S_OPEN => Some(Cell::Open),
            Self::S_WALL => Some(Cell::Wall),
            Self::S_START => Some(Cell::Start),
            Self::S_END => Some(Cell::End),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Open => Self::S_OPEN,
            Cell::Wall => Self::S_WALL,
            Cell::Start => Self::S_START,
            Cell::End => Self::S_END,
        }
    }
}

/// Errors from maze construction, search and solution decoding
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MazeError {
    #[error("position x={x}, y={y} is outside the maze")]
    OutOfBounds { x: usize, y: usize },
    #[error("malformed maze: {0}")]
    MalformedGrid(String),
    #[error("no path from start to end")]
    Unreachable,
    #[error("invalid direction token `{0}`")]
    InvalidToken(char),
}

/// Path search variant
///
/// The depth-first search returns the first path found under the fixed
/// neighbor priority, which is not necessarily the shortest one. The
/// flood-fill search labels every reachable square with its distance to
/// the end and then descends greedily, which always yields a minimal
/// path.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Algorithm {
    DepthFirst,
    #[default]
    FloodFill,
}

/// Per-cell bookkeeping of one depth-first search.
#[derive(PartialEq, Clone, Copy)]
enum SearchState {
    Unvisited,
    InProgress,
    Dead,
}

/// Representation of one mazebot maze
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    start: Point,
    end: Point,
}

impl Maze {
    /// Build a maze from API-shaped input: character rows plus explicit
    /// start and end positions.
    ///
    /// Rows use `' '` for open squares, `'X'` for walls and may carry the
    /// `'A'`/`'B'` markers of the positions themselves. The start and end
    /// squares are normalized to [`Cell::Start`] and [`Cell::End`]
    /// regardless of the characters at those positions.
    ///
    /// Returns an error if the rows are not rectangular, contain unknown
    /// characters, or if either position is out of bounds or on a wall.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        start: Point,
        end: Point,
    ) -> Result<Self, MazeError> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(x, c)| {
                        Cell::from_char(c).ok_or_else(|| {
                            MazeError::MalformedGrid(format!(
                                "unexpected character `{c}` at x={x}, y={y}"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cells, start, end)
    }

    /// Parse a newline-separated maze, locating the `A` and `B` markers.
    ///
    /// Returns an error if either marker is missing or appears more than
    /// once.
    ///
    /// # Examples
    /// ```
    /// use mazebot::Maze;
    ///
    /// let maze = Maze::parse("A X\n  X\nX B").unwrap();
    /// assert_eq!((maze.width(), maze.height()), (3, 3));
    /// ```
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut start = None;
        let mut end = None;
        for (y, row) in text.split('\n').enumerate() {
            for (x, c) in row.chars().enumerate() {
                match c {
                    Cell::S_START => {
                        if start.replace(Point::new(x, y)).is_some() {
                            return Err(MazeError::MalformedGrid(
                                "more than one start marker `A`".into(),
                            ));
                        }
                    }
                    Cell::S_END => {
                        if end.replace(Point::new(x, y)).is_some() {
                            return Err(MazeError::MalformedGrid(
                                "more than one end marker `B`".into(),
                            ));
                        }
                    }
                    _ => (),
                }
            }
        }
        let start =
            start.ok_or_else(|| MazeError::MalformedGrid("start marker `A` not found".into()))?;
        let end = end.ok_or_else(|| MazeError::MalformedGrid("end marker `B` not found".into()))?;
        let rows: Vec<&str> = text.split('\n').collect();
        Self::from_rows(&rows, start, end)
    }

    fn new(mut cells: Vec<Vec<Cell>>, start: Point, end: Point) -> Result<Self, MazeError> {
        let height = cells.len();
        if height == 0 {
            return Err(MazeError::MalformedGrid("maze has no rows".into()));
        }
        let width = cells[0].len();
        if width == 0 {
            return Err(MazeError::MalformedGrid("maze has no columns".into()));
        }
        for (y, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::MalformedGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
        }
        for point in [start, end] {
            if point.x >= width || point.y >= height {
                return Err(MazeError::OutOfBounds {
                    x: point.x,
                    y: point.y,
                });
            }
        }
        if cells[start.y][start.x] == Cell::Wall {
            return Err(MazeError::MalformedGrid(format!(
                "start position x={}, y={} lies on a wall",
                start.x, start.y
            )));
        }
        if cells[end.y][end.x] == Cell::Wall {
            return Err(MazeError::MalformedGrid(format!(
                "end position x={}, y={} lies on a wall",
                end.x, end.y
            )));
        }
        cells[start.y][start.x] = Cell::Start;
        cells[end.y][end.x] = Cell::End;
        Ok(Maze {
            cells,
            width,
            height,
            start,
            end,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Marker at `point`, or [`MazeError::OutOfBounds`].
    pub fn cell_at(&self, point: Point) -> Result<Cell, MazeError> {
        if point.x >= self.width || point.y >= self.height {
            return Err(MazeError::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }
        Ok(self.cells[point.y][point.x])
    }

    /// Whether `point` lies in bounds and is not a wall.
    pub fn is_traversable(&self, point: Point) -> bool {
        matches!(self.cell_at(point), Ok(cell) if cell != Cell::Wall)
    }

    /// The in-bounds square one move from `point`, if any.
    pub fn step(&self, point: Point, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.offset();
        let x = point.x.checked_add_signed(dx)?;
        let y = point.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(Point::new(x, y))
    }

    /// The up-to-4 in-bounds axis neighbors of `point`, in N, W, S, E
    /// order. Both solvers rely on this order for tie-breaking.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::PRIORITY
            .into_iter()
            .filter_map(move |direction| {
                self.step(point, direction)
                    .map(|neighbor| (direction, neighbor))
            })
    }

    /// Find a path from start to end with the chosen algorithm.
    ///
    /// Fails with [`MazeError::Unreachable`] if no path exists; an
    /// unsolvable maze never produces an empty or partial solution. A maze
    /// whose start and end coincide solves with the empty path.
    pub fn solve(&self, algorithm: Algorithm) -> Result<MazeSolution, MazeError> {
        let path = match algorithm {
            Algorithm::DepthFirst => self.solve_depth_first()?,
            Algorithm::FloodFill => self.solve_flood_fill()?,
        };
        Ok(MazeSolution { path })
    }

    /// Exhaustive backtracking search, first hit wins.
    ///
    /// Cells move through `Unvisited -> InProgress -> Dead`; a dead cell
    /// is never retried. The textbook recursion is an explicit stack here,
    /// so grid size is not limited by call depth. The trail of moves grows
    /// and shrinks with the stack and is the solution once the end square
    /// reaches the top.
    fn solve_depth_first(&self) -> Result<Vec<Direction>, MazeError> {
        let mut states = vec![vec![SearchState::Unvisited; self.width]; self.height];
        states[self.start.y][self.start.x] = SearchState::InProgress;

        let mut stack: Vec<(Point, usize)> = vec![(self.start, 0)];
        let mut trail: Vec<Direction> = Vec::new();
        while let Some(frame) = stack.last_mut() {
            let (position, tried) = *frame;
            if position == self.end {
                return Ok(trail);
            }
            let mut descend = None;
            for index in tried..Direction::PRIORITY.len() {
                frame.1 = index + 1;
                let direction = Direction::PRIORITY[index];
                if let Some(next) = self.step(position, direction) {
                    if self.is_traversable(next) && states[next.y][next.x] == SearchState::Unvisited
                    {
                        descend = Some((direction, next));
                        break;
                    }
                }
            }
            match descend {
                Some((direction, next)) => {
                    states[next.y][next.x] = SearchState::InProgress;
                    stack.push((next, 0));
                    trail.push(direction);
                }
                None => {
                    states[position.y][position.x] = SearchState::Dead;
                    stack.pop();
                    trail.pop();
                }
            }
        }
        Err(MazeError::Unreachable)
    }

    /// Shortest-path search: label squares with their distance to the end,
    /// then descend greedily from the start.
    ///
    /// The labeling is a breadth-first flood fill from the end over an
    /// explicit queue, so every reachable square receives its exact
    /// distance once. During descent an out-of-bounds, wall or unlabeled
    /// neighbor counts as infinitely far; among equally near neighbors the
    /// first in N, W, S, E order wins.
    fn solve_flood_fill(&self) -> Result<Vec<Direction>, MazeError> {
        let mut labels: Vec<Vec<Option<usize>>> = vec![vec![None; self.width]; self.height];
        labels[self.end.y][self.end.x] = Some(0);
        let mut queue = VecDeque::from([(self.end, 0)]);
        while let Some((position, distance)) = queue.pop_front() {
            for (_, next) in self.neighbors(position) {
                if self.is_traversable(next) && labels[next.y][next.x].is_none() {
                    labels[next.y][next.x] = Some(distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }

        let Some(total) = labels[self.start.y][self.start.x] else {
            return Err(MazeError::Unreachable);
        };
        let mut path = Vec::with_capacity(total);
        let mut current = self.start;
        while current != self.end {
            let mut nearest: Option<(Direction, Point, usize)> = None;
            for (direction, next) in self.neighbors(current) {
                if let Some(label) = labels[next.y][next.x] {
                    // Strict `<` keeps the earliest direction on ties.
                    if nearest.map_or(true, |(_, _, best)| label < best) {
                        nearest = Some((direction, next, label));
                    }
                }
            }
            let Some((direction, next, _)) = nearest else {
                return Err(MazeError::Unreachable);
            };
            path.push(direction);
            current = next;
        }
        Ok(path)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_char()).collect::<String>())
            .join("\n");
        write!(f, "{rows}")
    }
}

/// Solution to a maze
pub struct MazeSolution {
    /// The moves from start to end
    pub path: Vec<Direction>,
}

impl MazeSolution {
    /// The solution in wire format, e.g. `"NNE"`.
    pub fn directions(&self) -> String {
        encode(&self.path)
    }

    /// Print a one-line report to the console.
    pub fn print_report(&self) {
        if self.path.is_empty() {
            println!("Start and end coincide; no moves needed.");
        } else {
            println!("Solved in {} steps: {}", self.path.len(), self.directions());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{decode, encode, Algorithm, Cell, Direction, Maze, MazeError, Point};

    /// Replay `path` from the start square; every step must stay in
    /// bounds, avoid walls and arrive exactly at the end square.
    fn assert_walks_to_end(maze: &Maze, path: &[Direction]) {
        let mut current = maze.start();
        for &direction in path {
            let next = maze
                .step(current, direction)
                .unwrap_or_else(|| panic!("step {direction} from {current:?} leaves the maze"));
            assert!(maze.is_traversable(next), "step onto wall at {next:?}");
            current = next;
        }
        assert_eq!(current, maze.end());
    }

    /// Reference shortest-path length by plain breadth-first search.
    fn bfs_distance(maze: &Maze) -> Option<usize> {
        let mut seen = vec![vec![false; maze.width()]; maze.height()];
        let mut queue = std::collections::VecDeque::from([(maze.start(), 0)]);
        seen[maze.start().y][maze.start().x] = true;
        while let Some((position, distance)) = queue.pop_front() {
            if position == maze.end() {
                return Some(distance);
            }
            for (_, next) in maze.neighbors(position) {
                if maze.is_traversable(next) && !seen[next.y][next.x] {
                    seen[next.y][next.x] = true;
                    queue.push_back((next, distance + 1));
                }
            }
        }
        None
    }

    #[test]
    fn parse_maze_input() {
        let maze = Maze::parse("A X\n  X\nX B").unwrap();

        assert_eq!((maze.width(), maze.height()), (3, 3));
        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.end(), Point::new(2, 2));
        assert_eq!(maze.cell_at(Point::new(0, 0)), Ok(Cell::Start));
        assert_eq!(maze.cell_at(Point::new(2, 0)), Ok(Cell::Wall));
        assert_eq!(maze.cell_at(Point::new(1, 1)), Ok(Cell::Open));
        assert_eq!(maze.cell_at(Point::new(2, 2)), Ok(Cell::End));
    }

    #[test]
    fn from_rows_normalizes_markers() {
        // API maps may or may not carry A/B at the given positions.
        let maze = Maze::from_rows(&["  ", "  "], Point::new(1, 0), Point::new(0, 1)).unwrap();
        assert_eq!(maze.cell_at(Point::new(1, 0)), Ok(Cell::Start));
        assert_eq!(maze.cell_at(Point::new(0, 1)), Ok(Cell::End));
    }

    #[test]
    fn reject_ragged_rows() {
        let result = Maze::from_rows(&["  ", "   "], Point::new(0, 0), Point::new(1, 1));
        assert!(matches!(result, Err(MazeError::MalformedGrid(_))));
    }

    #[test]
    fn reject_unknown_characters() {
        let result = Maze::from_rows(&[" ?", "  "], Point::new(0, 0), Point::new(1, 1));
        assert!(matches!(result, Err(MazeError::MalformedGrid(_))));
    }

    #[test]
    fn reject_missing_or_duplicate_markers() {
        assert!(matches!(
            Maze::parse("  \n B"),
            Err(MazeError::MalformedGrid(_))
        ));
        assert!(matches!(
            Maze::parse("A \n  "),
            Err(MazeError::MalformedGrid(_))
        ));
        assert!(matches!(
            Maze::parse("AA\n B"),
            Err(MazeError::MalformedGrid(_))
        ));
    }

    #[test]
    fn reject_positions_outside_or_on_walls() {
        let outside = Maze::from_rows(&["  ", "  "], Point::new(5, 0), Point::new(1, 1));
        assert!(matches!(
            outside,
            Err(MazeError::OutOfBounds { x: 5, y: 0 })
        ));
        assert!(matches!(
            Maze::from_rows(&["X ", "  "], Point::new(0, 0), Point::new(1, 1)),
            Err(MazeError::MalformedGrid(_))
        ));
    }

    #[test]
    fn cell_at_out_of_bounds() {
        let maze = Maze::parse("A \n B").unwrap();
        assert_eq!(
            maze.cell_at(Point::new(2, 0)),
            Err(MazeError::OutOfBounds { x: 2, y: 0 })
        );
        assert!(!maze.is_traversable(Point::new(0, 9)));
    }

    #[test]
    fn neighbors_follow_priority_order() {
        let maze = Maze::parse("A  \n   \n  B").unwrap();
        let center: Vec<_> = maze.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                (Direction::North, Point::new(1, 0)),
                (Direction::West, Point::new(0, 1)),
                (Direction::South, Point::new(1, 2)),
                (Direction::East, Point::new(2, 1)),
            ]
        );
        // Corner squares only list their in-bounds neighbors.
        let corner: Vec<_> = maze.neighbors(Point::new(0, 0)).collect();
        assert_eq!(
            corner,
            vec![
                (Direction::South, Point::new(0, 1)),
                (Direction::East, Point::new(1, 0)),
            ]
        );
    }

    #[test]
    fn direction_tokens_round_trip() {
        let path = vec![
            Direction::North,
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        assert_eq!(encode(&path), "NNESW");
        assert_eq!(decode("NNESW").unwrap(), path);
    }

    #[test]
    fn decode_rejects_unknown_token() {
        assert_eq!(decode("NQE"), Err(MazeError::InvalidToken('Q')));
        assert_eq!(decode("n"), Err(MazeError::InvalidToken('n')));
    }

    #[test]
    fn three_step_fixture_solves_minimally() {
        // 2 columns x 3 rows; walls at (1, 0) and (0, 2).
        let maze = Maze::parse("AX\n  \nXB").unwrap();
        for algorithm in [Algorithm::FloodFill, Algorithm::DepthFirst] {
            let solution = maze.solve(algorithm).unwrap();
            assert_eq!(solution.path.len(), 3);
            assert_walks_to_end(&maze, &solution.path);
        }
    }

    #[test]
    fn tie_breaks_resolve_in_priority_order() {
        // Two equally short branches around the center wall; south must
        // win over east at both forks.
        let maze = Maze::parse("A  \n X \n  B").unwrap();
        let flood = maze.solve(Algorithm::FloodFill).unwrap();
        assert_eq!(flood.directions(), "SSEE");
        let dfs = maze.solve(Algorithm::DepthFirst).unwrap();
        assert_eq!(dfs.directions(), "SSEE");
    }

    #[test]
    fn depth_first_is_deterministic_but_not_minimal() {
        let maze = Maze::parse("A  \n   \n  B").unwrap();
        let solution = maze.solve(Algorithm::DepthFirst).unwrap();
        // South-first exploration snakes through the whole left side.
        assert_eq!(solution.directions(), "SSENNESS");
        assert_walks_to_end(&maze, &solution.path);

        let shortest = maze.solve(Algorithm::FloodFill).unwrap();
        assert_eq!(shortest.directions(), "SSEE");
    }

    #[test]
    fn flood_fill_matches_reference_distance() {
        let maze = Maze::parse("A   X\n XX  \n  X  \nX  XB").unwrap();
        let solution = maze.solve(Algorithm::FloodFill).unwrap();
        assert_eq!(Some(solution.path.len()), bfs_distance(&maze));
        assert_walks_to_end(&maze, &solution.path);
    }

    #[test]
    fn start_equals_end_gives_empty_path() {
        let maze = Maze::from_rows(&["   ", "   "], Point::new(1, 1), Point::new(1, 1)).unwrap();
        for algorithm in [Algorithm::FloodFill, Algorithm::DepthFirst] {
            let solution = maze.solve(algorithm).unwrap();
            assert!(solution.path.is_empty());
            assert_eq!(solution.directions(), "");
        }
    }

    #[test]
    fn enclosed_end_is_unreachable() {
        let maze = Maze::parse("A X \n  X \n  XB").unwrap();
        for algorithm in [Algorithm::FloodFill, Algorithm::DepthFirst] {
            assert_eq!(maze.solve(algorithm).err(), Some(MazeError::Unreachable));
        }
    }

    #[test]
    fn display_renders_normalized_grid() {
        let maze = Maze::from_rows(&["  X", "   "], Point::new(0, 0), Point::new(2, 1)).unwrap();
        assert_eq!(maze.to_string(), "A X\n  B");
    }
}
