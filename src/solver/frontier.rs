/*
frontier.rs

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

//! Cells waiting to be expanded by the solver.

use log::debug;
use std::collections::VecDeque;

use super::algorithm::Discipline;
use crate::generator::cell::Coord;

/// Frontier entry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub coord: Coord,

    /// Number of moves from the start.
    pub g: usize,

    /// Estimated number of moves to the end (A* only, zero otherwise).
    pub h: usize,

    /// Insertion order, used to break ties between nodes with the same score.
    seq: usize,
}

impl Node {
    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// A* open set. At most one entry per cell.
#[derive(Debug, Default)]
pub struct OpenSet {
    nodes: Vec<Node>,
}

impl OpenSet {
    /// Insert the node, or replace the entry for the same cell if the new node has a lower `g`.
    ///
    /// Return `false` when the existing entry is kept.
    pub fn upsert(&mut self, node: Node) -> bool {
        match self.nodes.iter().position(|n| n.coord == node.coord) {
            Some(i) if self.nodes[i].g <= node.g => false,
            Some(i) => {
                debug!(
                    "    Open entry {} replaced: g {} -> {}",
                    node.coord, self.nodes[i].g, node.g
                );
                self.nodes.remove(i);
                self.nodes.push(node);
                true
            }
            None => {
                self.nodes.push(node);
                true
            }
        }
    }

    /// Remove and return the node with the lowest `f`. Ties go to the oldest entry.
    pub fn pop(&mut self) -> Option<Node> {
        let i: usize = self
            .nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, n)| (n.f(), n.seq))
            .map(|(i, _)| i)?;
        Some(self.nodes.remove(i))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Frontier for the sequential solvers.
#[derive(Debug)]
pub enum Frontier {
    Queue(VecDeque<Node>),
    Stack(Vec<Node>),
    Open(OpenSet),
}

/// Frontier and the counter that orders its entries.
#[derive(Debug)]
pub struct FrontierSet {
    frontier: Frontier,
    next_seq: usize,
}

impl FrontierSet {
    /// Create an empty frontier for the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        let frontier: Frontier = match discipline {
            Discipline::Fifo => Frontier::Queue(VecDeque::new()),
            Discipline::Lifo => Frontier::Stack(Vec::new()),
            Discipline::Priority => Frontier::Open(OpenSet::default()),
        };
        Self {
            frontier,
            next_seq: 0,
        }
    }

    /// Build a node stamped with the next insertion number.
    pub fn node(&mut self, coord: Coord, g: usize, h: usize) -> Node {
        let seq: usize = self.next_seq;
        self.next_seq += 1;
        Node { coord, g, h, seq }
    }

    /// Add a node. For the A* open set, an entry for the same cell is replaced only when the new
    /// node is cheaper.
    ///
    /// Return whether the node was added.
    pub fn push(&mut self, node: Node) -> bool {
        match &mut self.frontier {
            Frontier::Queue(q) => q.push_back(node),
            Frontier::Stack(s) => s.push(node),
            Frontier::Open(o) => return o.upsert(node),
        }
        true
    }

    /// Remove the next node to expand.
    pub fn pop(&mut self) -> Option<Node> {
        match &mut self.frontier {
            Frontier::Queue(q) => q.pop_front(),
            Frontier::Stack(s) => s.pop(),
            Frontier::Open(o) => o.pop(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.frontier {
            Frontier::Queue(q) => q.len(),
            Frontier::Stack(s) => s.len(),
            Frontier::Open(o) => o.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a cell already reached can be reached again with a lower cost.
    pub fn allows_improvement(&self) -> bool {
        matches!(self.frontier, Frontier::Open(_))
    }
}
