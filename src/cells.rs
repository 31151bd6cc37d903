use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::units::{ColumnIndex, RowIndex};

/// A grid position. `x` is the column and `y` is the row, with (0, 0) the top left (north west) cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: usize) -> Cartesian2DCoordinate {
        let x = index % row_width;
        let y = index / row_width;
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.y as usize
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.x as usize
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// The four sides of a square cell.
///
/// Declared in clockwise order, so turning right is the next variant and turning left the previous one.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    East,
    South,
    West,
    North,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::North];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The unit (row delta, column delta) step taken when moving in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            CompassPrimary::East => (0, 1),
            CompassPrimary::South => (1, 0),
            CompassPrimary::West => (0, -1),
            CompassPrimary::North => (-1, 0),
        }
    }

    pub fn opposite(self) -> CompassPrimary {
        CompassPrimary::ALL[(self.index() + 2) % 4]
    }

    pub fn turn_right(self) -> CompassPrimary {
        CompassPrimary::ALL[(self.index() + 1) % 4]
    }

    pub fn turn_left(self) -> CompassPrimary {
        CompassPrimary::ALL[(self.index() + 3) % 4]
    }
}

impl fmt::Display for CompassPrimary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            CompassPrimary::East => "east",
            CompassPrimary::South => "south",
            CompassPrimary::West => "west",
            CompassPrimary::North => "north",
        };
        write!(f, "{}", name)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a compass direction (east, south, west or north)", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for CompassPrimary {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<CompassPrimary, ParseDirectionError> {
        match s.to_ascii_lowercase().as_ref() {
            "east" | "e" => Ok(CompassPrimary::East),
            "south" | "s" => Ok(CompassPrimary::South),
            "west" | "w" => Ok(CompassPrimary::West),
            "north" | "n" => Ok(CompassPrimary::North),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// One flag per compass direction.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct DirectionFlags([bool; 4]);

impl DirectionFlags {
    pub fn all_set() -> DirectionFlags {
        DirectionFlags([true; 4])
    }

    pub fn none_set() -> DirectionFlags {
        DirectionFlags([false; 4])
    }

    #[inline]
    pub fn set(&mut self, dir: CompassPrimary, value: bool) {
        self.0[dir.index()] = value;
    }

    /// Directions whose flag is set, in `CompassPrimary::ALL` order.
    pub fn iter_set(&self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter()
            .cloned()
            .filter(|dir| self[*dir])
            .collect()
    }

    pub fn count_set(&self) -> usize {
        self.0.iter().filter(|flag| **flag).count()
    }
}

impl Index<CompassPrimary> for DirectionFlags {
    type Output = bool;

    #[inline]
    fn index(&self, dir: CompassPrimary) -> &bool {
        &self.0[dir.index()]
    }
}

/// A single square of the maze.
///
/// Walls start closed on every side. Only the `Grid` opens walls, so that a wall shared by two
/// neighbouring cells is always opened on both of them at once.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct MazeCell {
    row: usize,
    col: usize,
    walls: DirectionFlags,
    traversed: DirectionFlags,
    visited: bool,
}

impl MazeCell {
    pub fn new(row: usize, col: usize) -> MazeCell {
        MazeCell {
            row,
            col,
            walls: DirectionFlags::all_set(),
            traversed: DirectionFlags::none_set(),
            visited: false,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.col as u32, self.row as u32)
    }

    #[inline]
    pub fn walls(&self) -> DirectionFlags {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls[dir]
    }

    #[inline]
    pub fn is_open(&self, dir: CompassPrimary) -> bool {
        !self.walls[dir]
    }

    pub fn closed_walls(&self) -> DirectionSmallVec {
        self.walls.iter_set()
    }

    /// Closed walls the wall follower bumped into.
    #[inline]
    pub fn traversed(&self) -> DirectionFlags {
        self.traversed
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub(crate) fn open_wall(&mut self, dir: CompassPrimary) {
        self.walls.set(dir, false);
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub(crate) fn mark_traversed(&mut self, dir: CompassPrimary) {
        self.traversed.set(dir, true);
    }

    pub(crate) fn clear_marks(&mut self) {
        self.visited = false;
        self.traversed = DirectionFlags::none_set();
    }
}
