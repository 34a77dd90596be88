/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazewalk.

Mazewalk is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazewalk is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazewalk. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! Mazewalk generates a maze, solves it, and prints the result. With `--animate`, the solve is
//! played in the terminal. With `--json`, the grid and every solver event are printed as JSON
//! lines, for an external renderer.
//!
//! # Examples
//!
//! List the available algorithms:
//!
//! ```text
//! $ mazewalk --ls
//! bfs
//! dfs
//! bfs-parallel
//! dfs-parallel
//! dijkstra
//! astar
//! ```
//!
//! Solve a small maze with A*:
//!
//! ```text
//! $ mazewalk -W 4 -H 3 -a astar
//! +---+---+---+---+
//! | S   *   * | . |
//! +   +---+   +   +
//! | . |   | *   * |
//! +   +   +---+   +
//! |           | E |
//! +---+---+---+---+
//! Path: 5 moves
//! ```

use chrono::Local;
use clap::Parser;
use log::{debug, error};
use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::animation::Animator;
use crate::config::{COPYRIGHT_NOTICE, DEFAULT_HEIGHT, DEFAULT_WIDTH, MazeConfig};
use crate::draw;
use crate::engine::{MazeEngine, RunToken, SolveRun};
use crate::errors::MazeError;
use crate::solver::algorithm::Algorithm;
use crate::solver::search::{SolveOutcome, VisitEvent};

/// Generate and solve random mazes.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the solving algorithms
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// JSON configuration file. The other options override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of columns
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Seed for the maze generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Solving algorithm
    #[arg(value_enum, short, long)]
    algorithm: Option<Algorithm>,

    /// Play the solve in the terminal
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    animate: bool,

    /// Print the grid and the solver events as JSON lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Only generate the maze
    #[arg(long, default_value_t = false)]
    no_solve: bool,

    /// Print some statistics at the end
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the algorithms
    //
    if args.ls {
        for a in Algorithm::ALL {
            println!("{a}");
        }
        return 0;
    }

    let config: MazeConfig = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    let algorithm: Algorithm = config.algorithm;

    let mut engine: MazeEngine = match MazeEngine::new(config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    // Verify that the maze is perfect before solving it
    if !engine.grid().is_perfect() {
        eprintln!(
            "Bug: the generated maze is not perfect (seed {})",
            engine.generator().seed
        );
        return 1;
    }

    if args.json {
        match serde_json::to_string(engine.grid()) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }

    if args.no_solve {
        if !args.json {
            print!("{}", draw::render(engine.grid(), engine.start(), engine.end()));
        }
        if args.summary {
            print_summary(&engine, None);
        }
        return 0;
    }

    //
    // Solve the maze
    //
    let result: Result<SolveOutcome, Box<dyn Error>> = if args.animate {
        animate(&mut engine, algorithm).map_err(Into::into)
    } else if args.json {
        stream_json(&mut engine, algorithm)
    } else {
        engine.solve_to_end(algorithm).map_err(Into::into)
    };
    let outcome: SolveOutcome = match result {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let path = match outcome {
        SolveOutcome::SolutionFound(p) => p,
        SolveOutcome::ExhaustedNoPath => {
            eprintln!("Bug: {algorithm} did not find a path from the start to the end");
            return 1;
        }
    };

    // Verify that the path can be walked
    if !path.connects(engine.grid(), engine.start(), engine.end()) {
        eprintln!("Bug: {algorithm} returned an invalid path: {:?}", path.get());
        return 1;
    }
    if algorithm.is_shortest() {
        let distance: Option<usize> = engine.grid().distance(engine.start(), engine.end());
        if distance != Some(path.num_edges()) {
            eprintln!(
                "Bug: {algorithm} returned a path of {} moves instead of {distance:?}",
                path.num_edges()
            );
            return 1;
        }
    }

    if !args.json {
        if !args.animate {
            print!("{}", draw::render(engine.grid(), engine.start(), engine.end()));
        }
        println!("Path: {} moves", path.num_edges());
    }
    if args.summary {
        print_summary(&engine, Some(algorithm));
    }
    0
}

/// Read the configuration file, if any, and apply the command-line options.
fn build_config(args: &Args) -> Result<MazeConfig, Box<dyn Error>> {
    let mut config: MazeConfig = match &args.config {
        Some(path) => MazeConfig::from_file(path)?,
        None => MazeConfig::with_size(
            args.width.unwrap_or(DEFAULT_WIDTH),
            args.height.unwrap_or(DEFAULT_HEIGHT),
        ),
    };

    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(a) = args.algorithm {
        config.algorithm = a;
    }
    debug!("Configuration: {config:?}");
    Ok(config)
}

/// Play the run in the terminal.
fn animate(engine: &mut MazeEngine, algorithm: Algorithm) -> Result<SolveOutcome, MazeError> {
    let animator: Animator = Animator::new(engine, engine.config().animation.clone());
    let run: SolveRun = engine.solve(algorithm)?;
    let receiver = animator.play(run);
    let legend: String = draw::legend();
    let mut outcome: SolveOutcome = SolveOutcome::ExhaustedNoPath;
    let mut stdout = io::stdout();

    while let Ok((token, event)) = receiver.recv_blocking() {
        if !engine.apply(token, &event) {
            continue;
        }
        // Clear the screen and go back to the top-left corner
        let frame: String = draw::render(engine.grid(), engine.start(), engine.end());
        if write!(stdout, "\x1b[2J\x1b[H{frame}{legend}\n[{}]\n", engine.status())
            .and_then(|()| stdout.flush())
            .is_err()
        {
            error!("Cannot write to the terminal, animation stopped");
            break;
        }
        if let VisitEvent::SolutionFound(path) = event {
            outcome = SolveOutcome::SolutionFound(path);
        }
    }
    Ok(outcome)
}

/// Solve the maze and print every event as a JSON line.
fn stream_json(
    engine: &mut MazeEngine,
    algorithm: Algorithm,
) -> Result<SolveOutcome, Box<dyn Error>> {
    let mut run: SolveRun = engine.solve(algorithm)?;
    let token: RunToken = run.token();
    let mut outcome: SolveOutcome = SolveOutcome::ExhaustedNoPath;

    for event in run.by_ref() {
        engine.apply(token, &event);
        println!("{}", serde_json::to_string(&event)?);
        if let VisitEvent::SolutionFound(path) = event {
            outcome = SolveOutcome::SolutionFound(path);
        }
    }
    Ok(outcome)
}

/// Print statistics about the maze and the last run.
fn print_summary(engine: &MazeEngine, algorithm: Option<Algorithm>) {
    let grid = engine.grid();
    let generator = engine.generator();
    println!(
        "
              size = {}x{}
              seed = {}
          passages = {}
   generation time = {}s
  frontier entries = {}",
        grid.width(),
        grid.height(),
        generator.seed,
        grid.num_passages(),
        generator.duration,
        generator.iteration,
    );
    if let Some(a) = algorithm {
        println!(
            "         algorithm = {a}
        expansions = {}
     visited cells = {}
       path length = {}
          distance = {}",
            engine.expansions(),
            grid.iter().filter(|(_, c)| c.is_visited).count(),
            engine.solution().map_or(0, |p| p.num_edges()),
            grid.distance(engine.start(), engine.end())
                .map_or_else(|| "unreachable".to_string(), |d| d.to_string()),
        );
    }
    println!("       finished at = {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
}
