use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::grid::{Grid, MazeOpenings};
use crate::utils::{fnv_hashmap, FnvHashMap};

/// Fills in the three character wide body of each cell when a grid is drawn as text.
pub trait GridDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian2DCoordinate) -> String;
}

const EMPTY_BODY: &str = "   ";

/// Marks the cells the last wall follower run stood on.
#[derive(Debug, Copy, Clone, Default)]
pub struct VisitedDisplay;

impl GridDisplay for VisitedDisplay {
    fn render_cell_body(&self, grid: &Grid, coord: Cartesian2DCoordinate) -> String {
        match grid.cell(coord) {
            Some(cell) if cell.is_visited() => String::from(" . "),
            _ => String::from(EMPTY_BODY),
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}

impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }

    pub fn from_openings(openings: &MazeOpenings) -> StartEndPointsDisplay {
        let mut starts = CoordinateSmallVec::new();
        let mut ends = CoordinateSmallVec::new();
        starts.push(openings.start);
        ends.push(openings.finish);
        StartEndPointsDisplay::new(starts, ends)
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, _: &Grid, coord: Cartesian2DCoordinate) -> String {
        let contains_coordinate = |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates) {
            String::from(" E ")
        } else {
            String::from(EMPTY_BODY)
        }
    }
}


/// Labels each cell on a walk with the move number it was last stood on, in hexadecimal.
#[derive(Debug)]
pub struct TrailDisplay {
    last_steps: FnvHashMap<Cartesian2DCoordinate, usize>,
}

impl TrailDisplay {
    pub fn new(trail: &[Cartesian2DCoordinate]) -> TrailDisplay {
        let mut last_steps = fnv_hashmap(trail.len());
        for (step, coord) in trail.iter().enumerate() {
            last_steps.insert(*coord, step);
        }
        TrailDisplay { last_steps }
    }
}

impl GridDisplay for TrailDisplay {
    fn render_cell_body(&self, _: &Grid, coord: Cartesian2DCoordinate) -> String {
        match self.last_steps.get(&coord) {
            // centre align, padding 3, lowercase hexadecimal
            Some(&step) if step < 0x1000 => format!("{:^3x}", step),
            Some(_) => String::from(" + "),
            None => String::from(EMPTY_BODY),
        }
    }
}


/// A grid drawn with box drawing characters, optionally with cell bodies filled in.
pub struct GridRender<'a> {
    grid: &'a Grid,
    displayer: Option<&'a dyn GridDisplay>,
}

impl<'a> GridRender<'a> {
    pub fn new(grid: &'a Grid) -> GridRender<'a> {
        GridRender {
            grid,
            displayer: None,
        }
    }

    pub fn with_display(grid: &'a Grid, displayer: &'a dyn GridDisplay) -> GridRender<'a> {
        GridRender {
            grid,
            displayer: Some(displayer),
        }
    }

    /// Is the vertical wall segment on column boundary `vx` (0 is the west border) closed in `row`?
    fn vertical_wall(&self, vx: usize, row: usize) -> bool {
        if vx == 0 {
            self.has_wall(0, row, CompassPrimary::West)
        } else {
            self.has_wall(vx - 1, row, CompassPrimary::East)
        }
    }

    /// Is the horizontal wall segment on row boundary `vy` (0 is the north border) closed in `column`?
    fn horizontal_wall(&self, column: usize, vy: usize) -> bool {
        if vy == 0 {
            self.has_wall(column, 0, CompassPrimary::North)
        } else {
            self.has_wall(column, vy - 1, CompassPrimary::South)
        }
    }

    fn has_wall(&self, column: usize, row: usize, direction: CompassPrimary) -> bool {
        let coord = Cartesian2DCoordinate::new(column as u32, row as u32);
        self.grid.cell(coord).map_or(true, |cell| cell.has_wall(direction))
    }

    /// The glyph where four wall segments may meet, at the north west corner of cell (vx, vy).
    fn corner(&self, vx: usize, vy: usize) -> &'static str {
        let (width, height) = (self.grid.width(), self.grid.height());
        let left = vx > 0 && self.horizontal_wall(vx - 1, vy);
        let right = vx < width && self.horizontal_wall(vx, vy);
        let up = vy > 0 && self.vertical_wall(vx, vy - 1);
        let down = vy < height && self.vertical_wall(vx, vy);

        match (left, right, up, down) {
            (true, true, true, true) => "┼",
            (true, true, true, false) => "┴",
            (true, true, false, true) => "┬",
            (true, false, true, true) => "┤",
            (false, true, true, true) => "├",
            (true, true, false, false) => "─",
            (false, false, true, true) => "│",
            (false, true, true, false) => "└",
            (true, false, false, true) => "┐",
            (true, false, true, false) => "┘",
            (false, true, false, true) => "┌",
            (true, false, false, false) => "╴",
            (false, true, false, false) => "╶",
            (false, false, true, false) => "╵",
            (false, false, false, true) => "╷",
            (false, false, false, false) => " ",
        }
    }

    fn push_boundary_line(&self, output: &mut String, vy: usize) {
        output.push_str(self.corner(0, vy));
        for column in 0..self.grid.width() {
            output.push_str(if self.horizontal_wall(column, vy) { "───" } else { "   " });
            output.push_str(self.corner(column + 1, vy));
        }
        output.push('\n');
    }
}

impl<'a> fmt::Display for GridRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();
        self.push_boundary_line(&mut output, 0);

        for (row_index, row) in self.grid.iter_row().enumerate() {
            output.push_str(if self.vertical_wall(0, row_index) { "│" } else { " " });
            for coord in row {
                let body = self.displayer
                    .map_or_else(|| String::from(EMPTY_BODY),
                                 |displayer| displayer.render_cell_body(self.grid, coord));
                output.push_str(&body);
                let east_boundary = coord.column() + 1;
                output.push_str(if self.vertical_wall(east_boundary, row_index) { "│" } else { " " });
            }
            output.push('\n');
            self.push_boundary_line(&mut output, row_index + 1);
        }

        write!(f, "{}", output)
    }
}

impl Grid {
    pub fn render_with<'a>(&'a self, displayer: &'a dyn GridDisplay) -> GridRender<'a> {
        GridRender::with_display(self, displayer)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        GridRender::new(self).fmt(f)
    }
}
