/*
generator.rs

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

//! Build random perfect mazes.
//!
//! A maze is a [`grid::Grid`] of [`cell::Cell`] objects. Each cell has four walls, and the
//! generator removes walls until every cell can be reached from every other cell by exactly one
//! path.
//!
//! To generate a maze, create a [`prim::PrimGenerator`] object with the cell the maze grows from,
//! and use its [`prim::PrimGenerator::generate`] method. The generator uses the randomized Prim's
//! algorithm: it keeps a list of candidate walls around the cells already in the maze, and
//! repeatedly opens a random candidate that leads to a new cell.
//!
//! Generation is reproducible: the same seed always produces the same maze.

pub mod cell;
pub mod grid;
pub mod prim;
