/*
errors.rs

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

//! Configuration errors.
//!
//! Invariant violations found while solving are not errors: the solver reports them with the
//! [`crate::solver::search::VisitEvent::ExhaustedNoPath`] terminal event.

use std::error::Error;
use std::fmt;

use crate::generator::cell::Coord;

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The width or the height of the grid is zero.
    InvalidDimensions { width: usize, height: usize },

    /// The starting cell is outside the grid.
    StartOutOfBounds(Coord),

    /// The ending cell is outside the grid.
    EndOutOfBounds(Coord),

    /// The algorithm identifier is not one of the known algorithms.
    UnknownAlgorithm(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { width, height } => {
                write!(f, "invalid maze size {width}x{height}: both must be positive")
            }
            MazeError::StartOutOfBounds(c) => write!(f, "start cell {c} is outside the maze"),
            MazeError::EndOutOfBounds(c) => write!(f, "end cell {c} is outside the maze"),
            MazeError::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm `{name}` (expected bfs, dfs, bfs-parallel, dfs-parallel, dijkstra, or astar)"
            ),
        }
    }
}

impl Error for MazeError {}
