/*
cell.rs

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

//! Cells of the maze grid.
//!
//! A cell is addressed by a [`Coord`] and stores its four walls in the order given by
//! [`Direction`]: up, right, down, left.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Position of a cell in the grid. `x` is the column and `y` the row, `(0, 0)` is the top-left
/// corner.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// Create a [`Coord`] object.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether the two cells share a side.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Side of a cell. The discriminant is the index of the wall in [`Cell::walls`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(usize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All the sides, in the order in which the solvers examine them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Index of the side in the wall array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side of the neighbor that faces this side.
    pub fn opposite(self) -> Self {
        match Direction::from_repr((self.index() + 2) % 4) {
            Some(d) => d,
            None => unreachable!("wall indexes are always in 0..4"),
        }
    }

    /// Move one step from `coord` in this direction, or return None when leaving a
    /// `width` x `height` grid.
    pub fn step(self, coord: Coord, width: usize, height: usize) -> Option<Coord> {
        match self {
            Direction::Up => coord.y.checked_sub(1).map(|y| Coord::new(coord.x, y)),
            Direction::Right => (coord.x + 1 < width).then(|| Coord::new(coord.x + 1, coord.y)),
            Direction::Down => (coord.y + 1 < height).then(|| Coord::new(coord.x, coord.y + 1)),
            Direction::Left => coord.x.checked_sub(1).map(|x| Coord::new(x, coord.y)),
        }
    }
}

/// Cell object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cell {
    /// Walls around the cell: up, right, down, left. `true` means that the wall is present.
    pub walls: [bool; 4],

    /// Whether the generator has already added the cell to the maze.
    pub visited: bool,

    /// Whether the cell is on the solution path.
    pub is_path: bool,

    /// Whether the solver has reached the cell.
    pub is_visited: bool,

    /// Whether the solver is currently expanding the cell.
    pub is_exploring: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Create a [`Cell`] object with all its walls.
    pub fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
            is_path: false,
            is_visited: false,
            is_exploring: false,
        }
    }

    /// Whether there is a wall on the given side.
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Number of open sides.
    pub fn num_openings(&self) -> usize {
        self.walls.iter().filter(|w| !**w).count()
    }

    /// Reset the annotations that the solvers set.
    pub fn clear_annotations(&mut self) {
        self.is_path = false;
        self.is_visited = false;
        self.is_exploring = false;
    }
}
