/*
draw.rs

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

//! Draw the maze as text.
//!
//! Each cell is three characters wide. Walls are drawn with `+`, `-`, and `|`. The cell content
//! shows the start (`S`), the end (`E`), and the solver annotations:
//!
//! ```text
//! +---+---+---+
//! | S   *   @ |
//! +---+   +   +
//! | .   * | E |
//! +---+---+---+
//! ```

use crate::generator::cell::{Cell, Coord, Direction};
use crate::generator::grid::Grid;

/// Cell currently expanded.
const EXPLORING: &str = " @ ";

/// Cell on the solution path.
const PATH: &str = " * ";

/// Cell reached by the solver.
const VISITED: &str = " . ";

const EMPTY: &str = "   ";

/// Return the content of the cell. When several annotations are set, the exploring state wins
/// over the path, which wins over the visited state.
fn cell_content(cell: &Cell, coord: Coord, start: Coord, end: Coord) -> &'static str {
    if coord == start {
        " S "
    } else if coord == end {
        " E "
    } else if cell.is_exploring {
        EXPLORING
    } else if cell.is_path {
        PATH
    } else if cell.is_visited {
        VISITED
    } else {
        EMPTY
    }
}

/// Draw the horizontal walls on the given side (up or down) of a row.
fn horizontal_line(out: &mut String, grid: &Grid, y: usize, side: Direction) {
    for x in 0..grid.width() {
        let wall: bool = grid.cell(Coord::new(x, y)).has_wall(side);
        out.push('+');
        out.push_str(if wall { "---" } else { "   " });
    }
    out.push_str("+\n");
}

/// Return the text representation of the grid and its annotations. An empty grid gives an empty
/// string.
pub fn render(grid: &Grid, start: Coord, end: Coord) -> String {
    if grid.width() == 0 || grid.height() == 0 {
        return String::new();
    }
    let mut out: String = String::with_capacity((grid.width() * 4 + 2) * (grid.height() * 2 + 1));

    for y in 0..grid.height() {
        horizontal_line(&mut out, grid, y, Direction::Up);
        for x in 0..grid.width() {
            let coord: Coord = Coord::new(x, y);
            let cell: &Cell = grid.cell(coord);
            out.push(if cell.has_wall(Direction::Left) { '|' } else { ' ' });
            out.push_str(cell_content(cell, coord, start, end));
        }
        let last: &Cell = grid.cell(Coord::new(grid.width() - 1, y));
        out.push(if last.has_wall(Direction::Right) { '|' } else { ' ' });
        out.push('\n');
    }
    horizontal_line(&mut out, grid, grid.height() - 1, Direction::Down);
    out
}

/// Return a one-line legend for the markers.
pub fn legend() -> String {
    format!(
        "S start  E end  {} exploring  {} path  {} visited",
        EXPLORING.trim(),
        PATH.trim(),
        VISITED.trim()
    )
}
