/*
path.rs

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

//! Path through the maze.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::generator::cell::Coord;
use crate::generator::grid::Grid;

/// Path object.
///
/// In JSON, the path is the list of its cells. The lookup set is rebuilt when reading it back.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Coord>", into = "Vec<Coord>")]
pub struct Path {
    /// Path as an ordered list of cells, from the start to the end.
    path: Vec<Coord>,

    /// Cells in the path.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    cells: HashSet<Coord>,
}

impl From<Vec<Coord>> for Path {
    fn from(path: Vec<Coord>) -> Self {
        let cells: HashSet<Coord> = path.iter().copied().collect();
        Self { path, cells }
    }
}

impl From<Path> for Vec<Coord> {
    fn from(path: Path) -> Self {
        path.path
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object from a list of cells.
    pub fn from_vec(path: &[Coord]) -> Self {
        Self::from(path.to_vec())
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of moves to walk the path, which is one less than the number of cells.
    pub fn num_edges(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<Coord> {
        &self.path
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Coord> {
        self.path.last().copied()
    }

    /// Whether the path can be walked in the given maze: consecutive cells share a side and
    /// there is no wall between them.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        if !self.path.iter().all(|c| grid.contains(*c)) {
            return false;
        }
        self.path
            .windows(2)
            .all(|w| w[0].is_adjacent(w[1]) && grid.is_open_between(w[0], w[1]))
    }

    /// Whether the path is valid and goes from `start` to `end`.
    pub fn connects(&self, grid: &Grid, start: Coord, end: Coord) -> bool {
        self.get_first() == Some(start) && self.get_last() == Some(end) && self.is_valid(grid)
    }
}
