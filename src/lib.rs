/*
lib.rs

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

//! Maze generation and solving engine.
//!
//! * [`generator`] builds random perfect mazes.
//! * [`solver`] finds a path between two cells, one step at a time.
//! * [`engine::MazeEngine`] owns a maze, starts solver runs, and applies their events to the
//!   cell annotations.
//! * [`animation::Animator`] replays a run at animation speed on a worker thread.
//! * [`draw`] renders a maze as text.

pub mod animation;
pub mod cli_options;
pub mod config;
pub mod draw;
pub mod engine;
pub mod errors;
pub mod generator;
pub mod solver;
