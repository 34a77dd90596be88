/*
engine.rs

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

//! Maze engine: one maze, its generator, and the runs of the solvers.
//!
//! The engine owns the grid. The solvers do not change it directly: a run produces
//! [`VisitEvent`] objects that the caller passes back to [`MazeEngine::apply`], which updates the
//! cell annotations that the renderer displays.
//!
//! Only the latest run is active. Starting a new run, or generating a new maze, increments the
//! run counter. Events from previous runs carry an old [`RunToken`] and are dropped.

use log::{Level, debug, error, info, log_enabled};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::MazeConfig;
use crate::draw;
use crate::errors::MazeError;
use crate::generator::cell::Coord;
use crate::generator::grid::Grid;
use crate::generator::prim::PrimGenerator;
use crate::solver::algorithm::Algorithm;
use crate::solver::path::Path;
use crate::solver::search::{Search, SolveOutcome, VisitEvent};

/// Identifier of a run: the value of the run counter when the run started.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunToken(u64);

impl RunToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Solving status, for the user interface.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    #[default]
    Idle,
    Solving,
    Solved,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveStatus::Idle => write!(f, "idle"),
            SolveStatus::Solving => write!(f, "solving"),
            SolveStatus::Solved => write!(f, "solved"),
        }
    }
}

/// A solver run, as returned by [`MazeEngine::solve`].
///
/// The run is an iterator over the solver events. Pass each event to [`MazeEngine::apply`] with
/// the run token.
#[derive(Debug)]
pub struct SolveRun {
    token: RunToken,
    search: Search,
}

impl SolveRun {
    pub fn token(&self) -> RunToken {
        self.token
    }

    pub fn algorithm(&self) -> Algorithm {
        self.search.algorithm()
    }

    /// Number of cells expanded so far.
    pub fn expansions(&self) -> usize {
        self.search.expansions()
    }
}

impl Iterator for SolveRun {
    type Item = VisitEvent;

    fn next(&mut self) -> Option<VisitEvent> {
        self.search.next()
    }
}

/// [`MazeEngine`] object.
pub struct MazeEngine {
    config: MazeConfig,
    generator: PrimGenerator,
    grid: Grid,
    status: SolveStatus,

    /// Shared with the animation workers, so that they stop sending events for an old run.
    runs: Arc<AtomicU64>,

    /// Token of the active run.
    current: RunToken,

    /// Cells expanded by the active run, from the applied events.
    expansions: usize,

    /// Solution of the last completed run.
    solution: Option<Path>,
}

impl MazeEngine {
    /// Create the engine and generate a first maze.
    ///
    /// # Errors
    ///
    /// The method returns an error if the configuration is not valid. Values are never clamped.
    pub fn new(config: MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        let generator: PrimGenerator = PrimGenerator::new(config.start);
        let seed: Option<u64> = config.seed;
        let mut engine: MazeEngine = Self {
            grid: Grid::new(config.width, config.height),
            config,
            generator,
            status: SolveStatus::Idle,
            runs: Arc::new(AtomicU64::new(0)),
            current: RunToken(0),
            expansions: 0,
            solution: None,
        };
        engine.generate(seed)?;
        Ok(engine)
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coord {
        self.config.start
    }

    pub fn end(&self) -> Coord {
        self.config.end()
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Generator details for the last maze (seed, iterations, duration).
    pub fn generator(&self) -> &PrimGenerator {
        &self.generator
    }

    /// Run counter shared with the workers that replay runs.
    pub fn run_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.runs)
    }

    /// Whether the token is the one of the active run.
    pub fn is_current(&self, token: RunToken) -> bool {
        token == self.current
    }

    /// Number of cells that the active run has expanded.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Solution of the last completed run.
    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    /// Replace the maze with a new one. Any run in progress is abandoned.
    ///
    /// If `seed` is None, then a random seed is used; see [`PrimGenerator::seed`].
    ///
    /// # Errors
    ///
    /// The method returns the generator error, see [`PrimGenerator::generate`]. In that case the
    /// current maze and run are kept.
    pub fn generate(&mut self, seed: Option<u64>) -> Result<&Grid, MazeError> {
        let grid: Grid = self
            .generator
            .generate(self.config.width, self.config.height, seed)?;
        if self.status == SolveStatus::Solving {
            debug!("Run {} abandoned: new maze", self.current);
        }
        self.invalidate();
        self.grid = grid;
        self.status = SolveStatus::Idle;
        self.solution = None;
        self.expansions = 0;

        if log_enabled!(Level::Debug) {
            for line in draw::render(&self.grid, self.start(), self.end()).lines() {
                debug!("{line}");
            }
        }
        Ok(&self.grid)
    }

    /// Start a new run. The previous annotations are cleared, and any run in progress is
    /// abandoned.
    ///
    /// # Errors
    ///
    /// The method returns the solver error, see [`Search::new`]. In that case the current run, if
    /// any, continues.
    pub fn solve(&mut self, algorithm: Algorithm) -> Result<SolveRun, MazeError> {
        let search: Search = Search::new(&self.grid, self.start(), self.end(), algorithm)?;
        if self.status == SolveStatus::Solving {
            debug!("Run {} abandoned: new {algorithm} run", self.current);
        }
        let token: RunToken = self.invalidate();
        self.grid.clear_annotations();
        self.status = SolveStatus::Solving;
        self.solution = None;
        self.expansions = 0;
        debug!("Run {token}: {algorithm}");

        Ok(SolveRun { token, search })
    }

    /// Start a new run for the algorithm with the given identifier.
    ///
    /// # Errors
    ///
    /// The method returns [`MazeError::UnknownAlgorithm`] if the identifier is not known. The
    /// current run, if any, continues.
    pub fn solve_named(&mut self, name: &str) -> Result<SolveRun, MazeError> {
        let algorithm: Algorithm = name.parse()?;
        self.solve(algorithm)
    }

    /// Update the cell annotations and the status from a run event.
    ///
    /// Return `false` if the event belongs to an old run. In that case nothing changes.
    pub fn apply(&mut self, token: RunToken, event: &VisitEvent) -> bool {
        if !self.is_current(token) {
            debug!("Stale event from run {token} dropped (active run {})", self.current);
            return false;
        }

        match event {
            VisitEvent::Discovered(c) => self.grid.cell_mut(*c).is_visited = true,
            VisitEvent::Exploring(cells) => {
                self.expansions += cells.len();
                for c in cells {
                    self.grid.cell_mut(*c).is_exploring = true;
                }
            }
            VisitEvent::Expanded(cells) => {
                for c in cells {
                    let cell = self.grid.cell_mut(*c);
                    cell.is_exploring = false;
                    cell.is_visited = true;
                }
            }
            VisitEvent::PathStep(c) => {
                let cell = self.grid.cell_mut(*c);
                cell.is_exploring = false;
                cell.is_path = true;
            }
            VisitEvent::SolutionFound(path) => {
                self.stop_exploring();
                for c in path.get() {
                    self.grid.cell_mut(*c).is_path = true;
                }
                info!("Run {token}: solved in {} moves", path.num_edges());
                self.solution = Some(path.clone());
                self.status = SolveStatus::Solved;
            }
            VisitEvent::ExhaustedNoPath => {
                self.stop_exploring();
                error!(
                    "Run {token}: no path from {} to {}, the maze is corrupted",
                    self.start(),
                    self.end()
                );
                self.status = SolveStatus::Idle;
            }
        }
        true
    }

    /// Start a run and apply all its events without any delay.
    ///
    /// # Errors
    ///
    /// The method returns an error if the run cannot start, see [`MazeEngine::solve`].
    pub fn solve_to_end(&mut self, algorithm: Algorithm) -> Result<SolveOutcome, MazeError> {
        let mut run: SolveRun = self.solve(algorithm)?;
        let token: RunToken = run.token();
        let mut outcome: SolveOutcome = SolveOutcome::ExhaustedNoPath;

        for event in run.by_ref() {
            self.apply(token, &event);
            if let VisitEvent::SolutionFound(path) = event {
                outcome = SolveOutcome::SolutionFound(path);
            }
        }
        debug!("Run {token}: {} cells expanded", run.expansions());
        Ok(outcome)
    }

    /// Start a new run identifier and return it.
    fn invalidate(&mut self) -> RunToken {
        let value: u64 = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        self.current = RunToken(value);
        self.current
    }

    fn stop_exploring(&mut self) {
        for i in 0..self.grid.num_cells() {
            let c: Coord = self.grid.coord(i);
            self.grid.cell_mut(c).is_exploring = false;
        }
    }
}
