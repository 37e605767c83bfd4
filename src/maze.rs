use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use log::{debug, info};
use petgraph::unionfind::UnionFind;

use crate::cell::Cell;

/// The queries a search needs from the space it runs over. Implementors are expected to be
/// pre-validated: start and goal are distinct, in bounds and not blocked.
pub trait Navigable {
    /// Whether `cell` is outside the grid or an obstacle.
    fn is_blocked(&self, cell: &Cell) -> bool;
    fn start(&self) -> Cell;
    fn goal(&self) -> Cell;
}

/// Reasons a [Maze] can not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeError {
    StartOutOfBounds(Cell),
    GoalOutOfBounds(Cell),
    StartBlocked(Cell),
    GoalBlocked(Cell),
    StartIsGoal(Cell),
    ObstacleOutOfBounds(Cell),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::StartOutOfBounds(c) => write!(f, "start {} lies outside the maze", c),
            MazeError::GoalOutOfBounds(c) => write!(f, "goal {} lies outside the maze", c),
            MazeError::StartBlocked(c) => write!(f, "start {} is an obstacle", c),
            MazeError::GoalBlocked(c) => write!(f, "goal {} is an obstacle", c),
            MazeError::StartIsGoal(c) => write!(f, "start and goal are both {}", c),
            MazeError::ObstacleOutOfBounds(c) => write!(f, "obstacle {} lies outside the maze", c),
        }
    }
}

impl std::error::Error for MazeError {}

/// A rectangular maze of `rows` by `columns` open cells with a start, a goal and a set of
/// obstacles. Obstacles are stored in a [BoolGrid] indexed with `x` as the column and `y` as
/// the row, where `true` means blocked. Connected components of the open cells are kept in a
/// [UnionFind] so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    columns: usize,
    start: Cell,
    goal: Cell,
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl Maze {
    pub fn new<I>(
        rows: usize,
        columns: usize,
        start: Cell,
        goal: Cell,
        obstacles: I,
    ) -> Result<Maze, MazeError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut maze = Maze {
            rows,
            columns,
            start,
            goal,
            grid: BoolGrid::new(columns, rows, false),
            components: UnionFind::new(rows * columns),
        };
        if !maze.in_bounds(&start) {
            return Err(MazeError::StartOutOfBounds(start));
        }
        if !maze.in_bounds(&goal) {
            return Err(MazeError::GoalOutOfBounds(goal));
        }
        if start == goal {
            return Err(MazeError::StartIsGoal(start));
        }
        for obstacle in obstacles {
            if !maze.in_bounds(&obstacle) {
                return Err(MazeError::ObstacleOutOfBounds(obstacle));
            }
            maze.grid.set(obstacle.column as i32, obstacle.row as i32, true);
        }
        if maze.is_obstacle(&start) {
            return Err(MazeError::StartBlocked(start));
        }
        if maze.is_obstacle(&goal) {
            return Err(MazeError::GoalBlocked(goal));
        }
        maze.generate_components();
        debug!("Built {}x{} maze from {} to {}", rows, columns, start, goal);
        Ok(maze)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Iterates over the obstacles in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| Cell::new(row, column)))
            .filter(move |cell| self.is_obstacle(cell))
    }

    fn is_obstacle(&self, cell: &Cell) -> bool {
        self.grid.get(cell.column as i32, cell.row as i32)
    }

    fn get_ix(&self, cell: &Cell) -> usize {
        cell.row * self.columns + cell.column
    }

    /// Links every open cell to its open south and east neighbours, which covers all edges of
    /// the 4-connected graph.
    fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.rows * self.columns);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = Cell::new(row, column);
                if self.is_obstacle(&cell) {
                    continue;
                }
                let ix = self.get_ix(&cell);
                for neighbour in [Cell::new(row + 1, column), Cell::new(row, column + 1)] {
                    if !self.is_blocked(&neighbour) {
                        let neighbour_ix = self.get_ix(&neighbour);
                        self.components.union(ix, neighbour_ix);
                    }
                }
            }
        }
    }

    /// Checks if `a` and `b` are open cells on the same connected component.
    pub fn reachable(&self, a: &Cell, b: &Cell) -> bool {
        !self.is_blocked(a)
            && !self.is_blocked(b)
            && self.components.equiv(self.get_ix(a), self.get_ix(b))
    }

    /// Checks if the goal can be reached from the start.
    pub fn solvable(&self) -> bool {
        self.reachable(&self.start, &self.goal)
    }

    /// Number of open cells on the component of `cell`, zero for blocked cells.
    pub fn component_size(&self, cell: &Cell) -> usize {
        if self.is_blocked(cell) {
            return 0;
        }
        let root = self.components.find(self.get_ix(cell));
        (0..self.rows * self.columns)
            .filter(|&ix| {
                let other = Cell::new(ix / self.columns, ix % self.columns);
                !self.is_obstacle(&other) && self.components.find(ix) == root
            })
            .count()
    }
}

impl Navigable for Maze {
    fn is_blocked(&self, cell: &Cell) -> bool {
        !self.in_bounds(cell) || self.is_obstacle(cell)
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn goal(&self) -> Cell {
        self.goal
    }
}

/// Renders the maze with a border of `#`, obstacles as `#`, open cells as spaces and the
/// endpoints as `S` and `G`. Every row, borders included, ends with a newline.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let border = "#".repeat(self.columns + 2);
        writeln!(f, "{}", border)?;
        for row in 0..self.rows {
            write!(f, "#")?;
            for column in 0..self.columns {
                let cell = Cell::new(row, column);
                let c = if cell == self.start {
                    'S'
                } else if cell == self.goal {
                    'G'
                } else if self.is_obstacle(&cell) {
                    '#'
                } else {
                    ' '
                };
                write!(f, "{}", c)?;
            }
            writeln!(f, "#")?;
        }
        writeln!(f, "{}", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Maze {
        Maze::new(2, 13, Cell::new(0, 0), Cell::new(0, 12), []).unwrap()
    }

    fn detour() -> Maze {
        Maze::new(
            3,
            5,
            Cell::new(2, 1),
            Cell::new(1, 4),
            [Cell::new(1, 2), Cell::new(2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn renders_corridor() {
        let expected = "###############\n\
                        #S           G#\n\
                        #             #\n\
                        ###############\n";
        assert_eq!(corridor().to_string(), expected);
    }

    #[test]
    fn renders_detour() {
        let expected = "#######\n\
                        #     #\n\
                        #  # G#\n\
                        # S # #\n\
                        #######\n";
        assert_eq!(detour().to_string(), expected);
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let maze = detour();
        assert!(maze.is_blocked(&Cell::new(3, 0)));
        assert!(maze.is_blocked(&Cell::new(0, 5)));
        assert!(maze.is_blocked(&Cell::new(1, 2)));
        assert!(!maze.is_blocked(&Cell::new(1, 3)));
        assert!(!maze.is_blocked(&Cell::new(0, 0)));
    }

    #[test]
    fn obstacles_in_row_major_order() {
        let maze = detour();
        let obstacles: Vec<Cell> = maze.obstacles().collect();
        assert_eq!(obstacles, vec![Cell::new(1, 2), Cell::new(2, 3)]);
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let start = Cell::new(0, 0);
        assert_eq!(
            Maze::new(2, 2, Cell::new(2, 0), start, []).unwrap_err(),
            MazeError::StartOutOfBounds(Cell::new(2, 0))
        );
        assert_eq!(
            Maze::new(2, 2, start, Cell::new(0, 2), []).unwrap_err(),
            MazeError::GoalOutOfBounds(Cell::new(0, 2))
        );
        assert_eq!(
            Maze::new(2, 2, start, start, []).unwrap_err(),
            MazeError::StartIsGoal(start)
        );
        assert_eq!(
            Maze::new(2, 2, start, Cell::new(1, 1), [start]).unwrap_err(),
            MazeError::StartBlocked(start)
        );
        assert_eq!(
            Maze::new(2, 2, start, Cell::new(1, 1), [Cell::new(1, 1)]).unwrap_err(),
            MazeError::GoalBlocked(Cell::new(1, 1))
        );
        assert_eq!(
            Maze::new(2, 2, start, Cell::new(1, 1), [Cell::new(5, 5)]).unwrap_err(),
            MazeError::ObstacleOutOfBounds(Cell::new(5, 5))
        );
    }

    /// Corresponds to the following maze, split in two by the wall in column 3:
    ///  _____
    /// |S  # |
    /// |   # |
    /// |   #G|
    ///  _____
    #[test]
    fn test_component_generation() {
        let walls = [Cell::new(0, 3), Cell::new(1, 3), Cell::new(2, 3)];
        let maze = Maze::new(3, 5, Cell::new(0, 0), Cell::new(2, 4), walls).unwrap();
        assert!(!maze.solvable());
        assert!(maze.reachable(&Cell::new(0, 0), &Cell::new(2, 2)));
        assert!(maze.reachable(&Cell::new(0, 4), &Cell::new(2, 4)));
        assert!(!maze.reachable(&Cell::new(0, 3), &Cell::new(0, 2)));
        assert_eq!(maze.component_size(&Cell::new(0, 0)), 9);
        assert_eq!(maze.component_size(&Cell::new(1, 4)), 3);
        assert_eq!(maze.component_size(&Cell::new(1, 3)), 0);
        assert!(detour().solvable());
    }
}
