use log::debug;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec, MazeCell};
use crate::errors::MazeError;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{Height, Width};

/// Where the maze opens onto the outside world, recorded by the last generation run.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeOpenings {
    pub start: Cartesian2DCoordinate,
    pub entrance: CompassPrimary,
    pub finish: Cartesian2DCoordinate,
    pub exit: CompassPrimary,
}

/// A rectangular maze: `height` rows of `width` cells, stored row major.
#[derive(Clone, Debug)]
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<MazeCell>,
    openings: Option<MazeOpenings>,
}

impl Grid {
    pub fn new(width: Width, height: Height) -> Result<Grid, MazeError> {
        validate_dimensions(width, height)?;
        let mut grid = Grid {
            width,
            height,
            cells: Vec::new(),
            openings: None,
        };
        grid.initialize();
        Ok(grid)
    }

    /// Hard reset: every cell unvisited and walled on all sides, no recorded openings.
    pub fn initialize(&mut self) {
        let (Width(width), Height(height)) = (self.width, self.height);
        self.cells.clear();
        self.cells.reserve_exact(width * height);
        for row in 0..height {
            for col in 0..width {
                self.cells.push(MazeCell::new(row, col));
            }
        }
        self.openings = None;
        debug!("initialized {}x{} grid", width, height);
    }

    /// Change the dimensions, which is only possible as part of a hard reset.
    pub fn reinitialize(&mut self, width: Width, height: Height) -> Result<(), MazeError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.initialize();
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height.0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn openings(&self) -> Option<&MazeOpenings> {
        self.openings.as_ref()
    }

    #[inline]
    pub(crate) fn set_openings(&mut self, openings: MazeOpenings) {
        self.openings = Some(openings);
    }

    /// The cell the maze is left through, if a maze has been generated.
    pub fn exit_cell(&self) -> Option<&MazeCell> {
        self.openings.and_then(|openings| self.cell(openings.finish))
    }

    /// All cells in row major order.
    #[inline]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&MazeCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut MazeCell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        coord.column() < self.width.0 && coord.row() < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row() * self.width.0 + coord.column())
        } else {
            None
        }
    }

    /// Cells to the West, East, North and South (in that order) of a cell that lie inside the grid,
    /// whether or not a wall separates them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        [CompassPrimary::West, CompassPrimary::East, CompassPrimary::North, CompassPrimary::South]
            .iter()
            .filter_map(|dir| self.offset_coordinate(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Result<Cartesian2DCoordinate, MazeError> {
        self.offset_coordinate(coord, direction)
            .ok_or(MazeError::OutOfBounds {
                coord,
                direction: Some(direction),
            })
    }

    /// The direction to step from `a` to reach its orthogonal neighbour `b`.
    pub fn direction_between(&self,
                             a: Cartesian2DCoordinate,
                             b: Cartesian2DCoordinate)
                             -> Option<CompassPrimary> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return None;
        }
        CompassPrimary::ALL.iter()
            .cloned()
            .find(|dir| self.offset_coordinate(a, *dir) == Some(b))
    }

    /// Open the wall shared by two adjacent cells, on both cells.
    /// Returns the direction of `b` as seen from `a`.
    pub fn remove_wall_between(&mut self,
                               a: Cartesian2DCoordinate,
                               b: Cartesian2DCoordinate)
                               -> Result<CompassPrimary, MazeError> {
        let dir = self.direction_between(a, b)
            .ok_or(MazeError::InvalidAdjacency { a, b })?;

        let a_index = self.grid_coordinate_to_index(a).ok_or(MazeError::InvalidAdjacency { a, b })?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(MazeError::InvalidAdjacency { a, b })?;
        self.cells[a_index].open_wall(dir);
        self.cells[b_index].open_wall(dir.opposite());
        Ok(dir)
    }

    /// Open a wall onto the outside of the maze.
    ///
    /// On the outer ring this opens the single boundary wall. If the wall is shared with a
    /// neighbour the pair is opened, keeping neighbouring walls symmetric.
    pub fn open_outer_wall(&mut self,
                           coord: Cartesian2DCoordinate,
                           direction: CompassPrimary)
                           -> Result<(), MazeError> {
        if !self.is_valid_coordinate(coord) {
            return Err(MazeError::OutOfBounds {
                coord,
                direction: None,
            });
        }
        match self.offset_coordinate(coord, direction) {
            Some(neighbour) => {
                self.remove_wall_between(coord, neighbour)?;
            }
            None => {
                if let Some(cell) = self.cell_mut(coord) {
                    cell.open_wall(direction);
                }
            }
        }
        Ok(())
    }

    /// Is there an open wall on the `direction` side of the cell?
    /// Invalid coordinates have no open walls.
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_open(direction))
    }

    /// Cells not on the outermost ring. Empty when the grid is narrower or shorter than 3 cells.
    pub fn interior_cells(&self) -> Vec<Cartesian2DCoordinate> {
        let (Width(width), Height(height)) = (self.width, self.height);
        if width < 3 || height < 3 {
            return Vec::new();
        }
        self.iter()
            .filter(|coord| {
                coord.column() > 0 && coord.column() < width - 1 && coord.row() > 0 &&
                coord.row() < height - 1
            })
            .collect()
    }

    /// Forget every visited and traversed mark, leaving the walls alone.
    pub fn reset_marks(&mut self) {
        for cell in &mut self.cells {
            cell.clear_marks();
        }
    }

    /// Do all neighbouring cells agree about the walls between them?
    pub fn is_wall_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            [CompassPrimary::East, CompassPrimary::South].iter().all(|dir| {
                match self.offset_coordinate(coord, *dir) {
                    Some(neighbour) => {
                        self.is_open(coord, *dir) == self.is_open(neighbour, dir.opposite())
                    }
                    None => true,
                }
            })
        })
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.width, self.height)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.width, self.height)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not within the grid.
    fn offset_coordinate(&self,
                         coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let (row_delta, col_delta) = dir.offset();
        let row = coord.row() as isize + row_delta;
        let col = coord.column() as isize + col_delta;
        if row < 0 || col < 0 {
            return None;
        }
        let neighbour = Cartesian2DCoordinate::new(col as u32, row as u32);
        if self.is_valid_coordinate(neighbour) {
            Some(neighbour)
        } else {
            None
        }
    }
}

// Converting a &Grid into an iterator CellIter - the default most sensible
impl<'a> IntoIterator for &'a Grid {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_dimensions(width: Width, height: Height) -> Result<(), MazeError> {
    let (Width(w), Height(h)) = (width, height);
    if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
        Err(MazeError::InvalidDimensions {
            width: w,
            height: h,
        })
    } else {
        Ok(())
    }
}


#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait

    use super::*;
    use crate::cells::DirectionFlags;

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("invalid grid dimensions")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    // SmallVec does not compare directly with slices, deref it to [T] first.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        assert_eq!(Grid::new(Width(0), Height(3)).unwrap_err(),
                   MazeError::InvalidDimensions { width: 0, height: 3 });
        assert_eq!(Grid::new(Width(3), Height(0)).unwrap_err(),
                   MazeError::InvalidDimensions { width: 3, height: 0 });
    }

    #[test]
    fn cells_know_their_position() {
        let g = small_grid(4, 3);
        assert_eq!(g.size(), 12);
        for (index, cell) in g.cells().iter().enumerate() {
            assert_eq!(cell.row(), index / 4);
            assert_eq!(cell.col(), index % 4);
            assert_eq!(g.grid_coordinate_to_index(cell.coordinate()), Some(index));
        }
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(g.grid_coordinate_to_index(gc(2, 1)), Some(5));
        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let node_indices: Vec<Cartesian2DCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected_indices: Vec<Cartesian2DCoordinate> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(node_indices, expected_indices);
        };
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbours_are_ordered_west_east_north_south() {
        let g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_smallvec_eq!(g.neighbours(gc(1, 1)), &[gc(0, 1), gc(2, 1), gc(1, 0), gc(1, 2)]);
        assert_smallvec_eq!(g.neighbours(gc(0, 0)), &[gc(1, 0), gc(0, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbours() {
        let g = small_grid(1, 1);
        assert!(g.neighbours(Cartesian2DCoordinate::new(0, 0)).is_empty());
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let check_neighbour = |coord, dir: CompassPrimary, expected: Option<Cartesian2DCoordinate>| {
            let expected_result = expected.ok_or(MazeError::OutOfBounds {
                coord,
                direction: Some(dir),
            });
            assert_eq!(g.neighbour_at_direction(coord, dir), expected_result);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(0, 1)));
    }

    #[test]
    fn removing_walls_is_symmetric() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 1);
        let b = Cartesian2DCoordinate::new(0, 2);
        let c = Cartesian2DCoordinate::new(1, 2);

        assert_eq!(g.remove_wall_between(a, b), Ok(CompassPrimary::South));
        assert!(g.is_open(a, CompassPrimary::South));
        assert!(g.is_open(b, CompassPrimary::North));
        assert!(g.is_wall_symmetric());

        assert_eq!(g.remove_wall_between(c, b), Ok(CompassPrimary::West));
        assert!(g.is_open(b, CompassPrimary::East));
        assert!(g.is_open(c, CompassPrimary::West));
        assert_eq!(g.cell(b).unwrap().walls().count_set(), 2);
        assert!(g.is_wall_symmetric());

        // Removing an already open wall changes nothing
        assert_eq!(g.remove_wall_between(b, a), Ok(CompassPrimary::North));
        assert_eq!(g.cell(b).unwrap().walls().count_set(), 2);
    }

    #[test]
    fn removing_walls_requires_adjacency() {
        let mut g = small_grid(4, 4);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        let check_invalid = |g: &mut Grid, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate| {
            assert_eq!(g.remove_wall_between(a, b), Err(MazeError::InvalidAdjacency { a, b }));
        };
        check_invalid(&mut g, gc(0, 0), gc(0, 0));
        check_invalid(&mut g, gc(0, 0), gc(1, 1));
        check_invalid(&mut g, gc(0, 0), gc(0, 2));
        check_invalid(&mut g, gc(3, 3), gc(4, 3));

        assert!(g.cells().iter().all(|cell| cell.walls() == DirectionFlags::all_set()));
    }

    #[test]
    fn outer_walls_open_on_the_boundary() {
        let mut g = small_grid(3, 3);
        let corner = Cartesian2DCoordinate::new(0, 0);
        g.open_outer_wall(corner, CompassPrimary::West).unwrap();
        assert!(g.is_open(corner, CompassPrimary::West));
        assert!(g.is_wall_symmetric());

        // An interior facing direction opens the shared wall pair
        g.open_outer_wall(corner, CompassPrimary::East).unwrap();
        assert!(g.is_open(Cartesian2DCoordinate::new(1, 0), CompassPrimary::West));
        assert!(g.is_wall_symmetric());

        assert_eq!(g.open_outer_wall(Cartesian2DCoordinate::new(3, 0), CompassPrimary::East),
                   Err(MazeError::OutOfBounds {
                       coord: Cartesian2DCoordinate::new(3, 0),
                       direction: None,
                   }));
    }

    #[test]
    fn interior_cells() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert!(small_grid(2, 5).interior_cells().is_empty());
        assert!(small_grid(5, 2).interior_cells().is_empty());
        assert_eq!(small_grid(3, 3).interior_cells(), vec![gc(1, 1)]);
        assert_eq!(small_grid(4, 3).interior_cells(), vec![gc(1, 1), gc(2, 1)]);
        assert_eq!(small_grid(10, 12).interior_cells().len(), 8 * 10);
    }

    #[test]
    fn reset_marks_keeps_walls_and_is_idempotent() {
        let mut g = small_grid(3, 3);
        let a = Cartesian2DCoordinate::new(1, 1);
        let b = Cartesian2DCoordinate::new(2, 1);
        g.remove_wall_between(a, b).unwrap();
        g.cell_mut(a).unwrap().mark_visited();
        g.cell_mut(b).unwrap().mark_traversed(CompassPrimary::North);

        g.reset_marks();
        let once = g.cells().to_vec();
        g.reset_marks();
        assert_eq!(g.cells(), &once[..]);

        assert!(g.cells().iter().all(|cell| !cell.is_visited()));
        assert!(g.cells().iter().all(|cell| cell.traversed() == DirectionFlags::none_set()));
        assert!(g.is_open(a, CompassPrimary::East));
    }

    #[test]
    fn initialize_is_a_hard_reset() {
        let mut g = small_grid(3, 3);
        g.remove_wall_between(Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0))
            .unwrap();
        g.set_openings(MazeOpenings {
            start: Cartesian2DCoordinate::new(0, 0),
            entrance: CompassPrimary::West,
            finish: Cartesian2DCoordinate::new(2, 2),
            exit: CompassPrimary::East,
        });
        assert!(g.exit_cell().is_some());

        g.initialize();
        assert!(g.openings().is_none());
        assert!(g.exit_cell().is_none());
        assert!(g.cells().iter().all(|cell| cell.walls() == DirectionFlags::all_set()));
    }

    #[test]
    fn reinitialize_changes_dimensions() {
        let mut g = small_grid(3, 3);
        g.reinitialize(Width(5), Height(2)).unwrap();
        assert_eq!((g.width(), g.height(), g.size()), (5, 2, 10));
        assert_eq!(g.reinitialize(Width(0), Height(2)),
                   Err(MazeError::InvalidDimensions { width: 0, height: 2 }));
        assert_eq!((g.width(), g.height()), (5, 2));
    }
}
