/*
config.rs

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

//! Build constants and maze configuration.
//!
//! The configuration can be read from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!     "width": 30,
//!     "height": 15,
//!     "start": {"x": 0, "y": 0},
//!     "seed": 1234,
//!     "algorithm": "astar",
//!     "animation": {"explore_ms": 10, "path_ms": 20}
//! }
//! ```
//!
//! When `end` is not provided, it is the bottom-right corner of the grid.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::errors::MazeError;
use crate::generator::cell::Coord;
use crate::solver::algorithm::{Algorithm, Expansion};
use crate::solver::search::VisitEvent;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 20;

/// Pauses between the animation steps, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationDelays {
    /// Sequential algorithms: after a cell starts being expanded.
    pub explore_ms: u64,

    /// Sequential algorithms: after a cell is expanded.
    pub expand_ms: u64,

    /// BFS-parallel: after a level starts being expanded.
    pub level_explore_ms: u64,

    /// BFS-parallel: between two levels.
    pub level_expand_ms: u64,

    /// DFS-parallel: after the active branches start being expanded.
    pub branch_explore_ms: u64,

    /// DFS-parallel: between two rounds.
    pub branch_expand_ms: u64,

    /// After each cell of the solution path.
    pub path_ms: u64,
}

impl Default for AnimationDelays {
    fn default() -> Self {
        Self {
            explore_ms: 30,
            expand_ms: 50,
            level_explore_ms: 100,
            level_expand_ms: 150,
            branch_explore_ms: 80,
            branch_expand_ms: 120,
            path_ms: 50,
        }
    }
}

impl AnimationDelays {
    /// No pause at all.
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            explore_ms: 0,
            expand_ms: 0,
            level_explore_ms: 0,
            level_expand_ms: 0,
            branch_explore_ms: 0,
            branch_expand_ms: 0,
            path_ms: 0,
        }
    }

    /// Pause to apply after the event has been displayed.
    pub fn delay(&self, algorithm: Algorithm, event: &VisitEvent) -> Duration {
        let ms: u64 = match (event, algorithm.expansion(), algorithm) {
            (VisitEvent::Exploring(_), Expansion::Sequential, _) => self.explore_ms,
            (VisitEvent::Exploring(_), Expansion::LevelSynchronous, Algorithm::DfsParallel) => {
                self.branch_explore_ms
            }
            (VisitEvent::Exploring(_), Expansion::LevelSynchronous, _) => self.level_explore_ms,
            (VisitEvent::Expanded(_), Expansion::Sequential, _) => self.expand_ms,
            (VisitEvent::Expanded(_), Expansion::LevelSynchronous, Algorithm::DfsParallel) => {
                self.branch_expand_ms
            }
            (VisitEvent::Expanded(_), Expansion::LevelSynchronous, _) => self.level_expand_ms,
            (VisitEvent::PathStep(_), _, _) => self.path_ms,
            (
                VisitEvent::Discovered(_)
                | VisitEvent::SolutionFound(_)
                | VisitEvent::ExhaustedNoPath,
                _,
                _,
            ) => 0,
        };
        Duration::from_millis(ms)
    }
}

/// Maze configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Starting cell. The maze also grows from this cell.
    pub start: Coord,

    /// Ending cell. Bottom-right corner when not set.
    pub end: Option<Coord>,

    /// Seed for the maze generator. Random when not set.
    pub seed: Option<u64>,

    /// Solving algorithm.
    pub algorithm: Algorithm,

    /// Animation pacing.
    pub animation: AnimationDelays,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start: Coord::new(0, 0),
            end: None,
            seed: None,
            algorithm: Algorithm::default(),
            animation: AnimationDelays::default(),
        }
    }
}

impl MazeConfig {
    /// Create a configuration for the given size, with the start and the end at opposite corners.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Configuration file: {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: MazeConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Ending cell.
    pub fn end(&self) -> Coord {
        self.end.unwrap_or(Coord::new(
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        ))
    }

    /// Verify that the grid is not empty and that the start and end cells are inside the grid.
    ///
    /// # Errors
    ///
    /// Values are never clamped: the first invalid value is returned as an error.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let inside = |c: Coord| c.x < self.width && c.y < self.height;
        if !inside(self.start) {
            return Err(MazeError::StartOutOfBounds(self.start));
        }
        let end: Coord = self.end();
        if !inside(end) {
            return Err(MazeError::EndOutOfBounds(end));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: MazeConfig = MazeConfig::default();
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.start, Coord::new(0, 0));
        assert_eq!(config.end(), Coord::new(19, 19));
        assert_eq!(config.algorithm, Algorithm::Bfs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json() {
        let config: MazeConfig =
            MazeConfig::from_json(r#"{"width": 8, "height": 4, "algorithm": "dfs-parallel"}"#)
                .expect("valid configuration");
        assert_eq!(config.end(), Coord::new(7, 3));
        assert_eq!(config.algorithm, Algorithm::DfsParallel);
        assert_eq!(config.seed, None);
        assert_eq!(config.animation, AnimationDelays::default());
    }

    #[test]
    fn full_json() {
        let config: MazeConfig = MazeConfig::from_json(
            r#"{
                "width": 5, "height": 6,
                "start": {"x": 4, "y": 0}, "end": {"x": 0, "y": 5},
                "seed": 99, "algorithm": "astar",
                "animation": {"path_ms": 7}
            }"#,
        )
        .expect("valid configuration");
        assert_eq!(config.start, Coord::new(4, 0));
        assert_eq!(config.end(), Coord::new(0, 5));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.algorithm, Algorithm::AStar);
        assert_eq!(config.animation.path_ms, 7);
        assert_eq!(config.animation.explore_ms, 30);
    }

    #[test]
    fn unknown_algorithm_in_json() {
        assert!(MazeConfig::from_json(r#"{"algorithm": "greedy"}"#).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(MazeConfig::from_file(Path::new("/nonexistent/maze.json")).is_err());
    }

    #[test]
    fn invalid_configurations() {
        assert_eq!(
            MazeConfig::with_size(0, 3).validate(),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );

        let mut config: MazeConfig = MazeConfig::with_size(4, 4);
        config.start = Coord::new(4, 0);
        assert_eq!(
            config.validate(),
            Err(MazeError::StartOutOfBounds(Coord::new(4, 0)))
        );

        config.start = Coord::new(0, 0);
        config.end = Some(Coord::new(1, 9));
        assert_eq!(
            config.validate(),
            Err(MazeError::EndOutOfBounds(Coord::new(1, 9)))
        );
    }

    #[test]
    fn delays_follow_the_algorithm() {
        let delays: AnimationDelays = AnimationDelays::default();
        let exploring: VisitEvent = VisitEvent::Exploring(vec![Coord::new(0, 0)]);
        let expanded: VisitEvent = VisitEvent::Expanded(vec![Coord::new(0, 0)]);

        assert_eq!(delays.delay(Algorithm::Bfs, &exploring).as_millis(), 30);
        assert_eq!(delays.delay(Algorithm::AStar, &expanded).as_millis(), 50);
        assert_eq!(delays.delay(Algorithm::BfsParallel, &exploring).as_millis(), 100);
        assert_eq!(delays.delay(Algorithm::BfsParallel, &expanded).as_millis(), 150);
        assert_eq!(delays.delay(Algorithm::DfsParallel, &exploring).as_millis(), 80);
        assert_eq!(delays.delay(Algorithm::DfsParallel, &expanded).as_millis(), 120);
        assert_eq!(
            delays
                .delay(Algorithm::Dfs, &VisitEvent::PathStep(Coord::new(0, 0)))
                .as_millis(),
            50
        );
        assert_eq!(
            AnimationDelays::none()
                .delay(Algorithm::Dfs, &exploring)
                .as_millis(),
            0
        );
    }
}
