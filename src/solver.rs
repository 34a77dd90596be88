/*
solver.rs

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

//! Solve mazes step by step.
//!
//! All the algorithms share the same search loop, in [`search::Search`]. They only differ by the
//! order in which the waiting cells are expanded ([`algorithm::Discipline`]) and by the number of
//! cells expanded at each step ([`algorithm::Expansion`]):
//!
//! * `bfs` and `dijkstra` use a queue. Every move costs the same, so Dijkstra's algorithm expands
//!   the cells in the same order as a breadth-first search.
//! * `dfs` uses a stack.
//! * `astar` uses an open set ordered by `f = g + h`, where `h` is the Manhattan distance to the
//!   end. See [`frontier::OpenSet`].
//! * `bfs-parallel` and `dfs-parallel` expand all the active cells together, one level per step.
//!
//! A [`search::Search`] is an iterator of [`search::VisitEvent`] objects, so that the caller
//! controls the pace of the animation. Tests run it to the end without any delay.

pub mod algorithm;
pub mod frontier;
pub mod path;
pub mod search;
