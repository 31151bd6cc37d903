use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use mazes::{
    analysis::MazeSummary,
    cells::{Cartesian2DCoordinate, CompassPrimary},
    generators::{self, GenerationParams},
    grid::{Grid, MazeOpenings},
    grid_displays::{StartEndPointsDisplay, TrailDisplay},
    observers::{NoopObserver, StepKind, StepRecorder},
    pathing::{self, TurnPreference},
    randomness,
    units::{Height, Width},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [options]
    mazes_driver solve [--left-hand] [options]

Options:
    -h --help              Show this screen.
    --width=<w>            Number of cells in each row [default: 20].
    --height=<h>           Number of rows [default: 12].
    --loops=<n>            Extra walls to open on interior cells after carving [default: 0].
    --seed=<s>             Seed for the random generator. Unseeded runs differ every time.
    --start-x=<x>          x coordinate of the start cell, defaults to the west column.
    --start-y=<y>          y coordinate of the start cell, defaults to the north row.
    --finish-x=<x>         x coordinate of the finish cell, defaults to the east column.
    --finish-y=<y>         y coordinate of the finish cell, defaults to the south row.
    --entrance=<dir>       Side of the start cell opened as the entrance [default: west].
    --exit=<dir>           Side of the finish cell opened as the exit [default: east].
    --left-hand            Keep the left hand on the wall instead of the right.
    --show-steps           Print the maze after every carved wall and every move.
    --text-out=<path>      Write the final rendering to a file instead of stdout.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_solve: bool,
    flag_width: usize,
    flag_height: usize,
    flag_loops: usize,
    flag_seed: Option<u64>,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_finish_x: Option<u32>,
    flag_finish_y: Option<u32>,
    flag_entrance: String,
    flag_exit: String,
    flag_left_hand: bool,
    flag_show_steps: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Maze(::mazes::errors::MazeError);
            BadDirection(::mazes::cells::ParseDirectionError);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut maze_grid = Grid::new(Width(args.flag_width), Height(args.flag_height))?;
    let params = generation_params(&args, &maze_grid)?;
    let mut rng = randomness::seeded_rng(args.flag_seed);

    let mut generation_steps = StepRecorder::new();
    let report = generators::recursive_backtracker(&mut maze_grid, &params, &mut rng, &mut generation_steps)
        .chain_err(|| "Failed to generate the maze")?;
    info!("{:?}", report);

    if args.flag_show_steps {
        replay_generation(&maze_grid, &generation_steps)?;
    }

    let rendering = if args.cmd_solve {
        let turn = if args.flag_left_hand {
            TurnPreference::LeftHand
        } else {
            TurnPreference::RightHand
        };
        let traversal = pathing::wall_follower(&mut maze_grid, turn, &mut NoopObserver)
            .chain_err(|| format!("The {} wall follower failed", turn))?;

        if args.flag_show_steps {
            for step in 1..traversal.trail.len() {
                let displayer = TrailDisplay::new(&traversal.trail[..step + 1]);
                println!("{}", maze_grid.render_with(&displayer));
            }
        }
        println!("{} wall follower: {} moves, {} walls touched",
                 turn,
                 traversal.moves,
                 traversal.walls_touched);
        let displayer = TrailDisplay::new(&traversal.trail);
        maze_grid.render_with(&displayer).to_string()
    } else {
        let openings = maze_grid.openings().ok_or(mazes::MazeError::UninitializedMaze)?;
        let displayer = StartEndPointsDisplay::from_openings(openings);
        maze_grid.render_with(&displayer).to_string()
    };

    println!("{}", MazeSummary::of(&maze_grid));

    if args.flag_text_out.is_empty() {
        println!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Corner defaults for anything not given on the command line.
fn generation_params(args: &MazeArgs, maze_grid: &Grid) -> Result<GenerationParams> {
    let defaults = GenerationParams::for_grid(maze_grid);
    let entrance = args.flag_entrance.parse::<CompassPrimary>()?;
    let exit = args.flag_exit.parse::<CompassPrimary>()?;
    let start = Cartesian2DCoordinate::new(args.flag_start_x.unwrap_or(defaults.start.x),
                                           args.flag_start_y.unwrap_or(defaults.start.y));
    let finish = Cartesian2DCoordinate::new(args.flag_finish_x.unwrap_or(defaults.finish.x),
                                            args.flag_finish_y.unwrap_or(defaults.finish.y));
    Ok(defaults.start(start, entrance)
        .finish(finish, exit)
        .loops(args.flag_loops))
}

/// Redraw the carving one wall at a time on a copy of the walled in grid.
fn replay_generation(maze_grid: &Grid, steps: &StepRecorder) -> Result<()> {
    let openings: MazeOpenings = *maze_grid.openings().ok_or(mazes::MazeError::UninitializedMaze)?;
    let mut replay = Grid::new(Width(maze_grid.width()), Height(maze_grid.height()))?;
    replay.open_outer_wall(openings.start, openings.entrance)?;
    replay.open_outer_wall(openings.finish, openings.exit)?;

    for step in &steps.steps {
        if step.kind == StepKind::PassageCarved || step.kind == StepKind::LoopCarved {
            replay.remove_wall_between(step.from, step.to)?;
            println!("{}", replay);
        }
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
