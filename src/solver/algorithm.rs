/*
algorithm.rs

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

//! Solving algorithms and how they drive the search.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MazeError;

/// Solving algorithm.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Breadth-first search
    #[default]
    Bfs,

    /// Depth-first search
    Dfs,

    /// Breadth-first search, one level at a time
    BfsParallel,

    /// Expand every active branch at each round
    DfsParallel,

    /// Dijkstra's algorithm (same as BFS, every step costs 1)
    Dijkstra,

    /// A* with the Manhattan distance heuristic
    #[serde(rename = "astar")]
    #[value(name = "astar")]
    AStar,
}

/// Order in which the cells waiting in the frontier are taken.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Discipline {
    /// First in, first out.
    Fifo,

    /// Last in, first out.
    Lifo,

    /// Lowest `f = g + h` first.
    Priority,
}

/// How many cells are expanded at each step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// One cell per step.
    Sequential,

    /// The whole active set per step.
    LevelSynchronous,
}

impl Algorithm {
    /// All the algorithms, in the order they are listed on the command line.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::BfsParallel,
        Algorithm::DfsParallel,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    /// Identifier of the algorithm, as accepted by `str::parse`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::BfsParallel => "bfs-parallel",
            Algorithm::DfsParallel => "dfs-parallel",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Frontier discipline. Dijkstra runs as BFS because all the edges cost the same.
    pub fn discipline(self) -> Discipline {
        match self {
            // Level-synchronous rounds keep their levels in discovery order
            Algorithm::Bfs
            | Algorithm::Dijkstra
            | Algorithm::BfsParallel
            | Algorithm::DfsParallel => Discipline::Fifo,
            Algorithm::Dfs => Discipline::Lifo,
            Algorithm::AStar => Discipline::Priority,
        }
    }

    pub fn expansion(self) -> Expansion {
        match self {
            Algorithm::BfsParallel | Algorithm::DfsParallel => Expansion::LevelSynchronous,
            _ => Expansion::Sequential,
        }
    }

    /// Whether the algorithm always returns a shortest path.
    pub fn is_shortest(self) -> bool {
        !matches!(self, Algorithm::Dfs | Algorithm::DfsParallel)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_string()))
    }
}
