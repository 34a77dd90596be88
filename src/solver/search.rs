/*
search.rs

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

//! Step-by-step maze solver.
//!
//! A [`Search`] is an iterator over [`VisitEvent`] objects. Each call to `next` performs at most
//! one expansion step, so that the caller decides how fast the solve is displayed. The sequence
//! always ends with [`VisitEvent::SolutionFound`] or [`VisitEvent::ExhaustedNoPath`], and cannot
//! be restarted.

use log::{debug, error, info};
use serde::Serialize;
use std::collections::VecDeque;

use super::algorithm::{Algorithm, Discipline, Expansion};
use super::frontier::{FrontierSet, Node};
use super::path::Path;
use crate::errors::MazeError;
use crate::generator::cell::Coord;
use crate::generator::grid::Grid;

/// Visitation events, for the renderer.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "cells", rename_all = "snake_case")]
pub enum VisitEvent {
    /// The cell joined the frontier.
    Discovered(Coord),

    /// The cells are being expanded. Sequential algorithms expand one cell at a time, the
    /// parallel variants expand a whole level.
    Exploring(Vec<Coord>),

    /// The cells are fully expanded.
    Expanded(Vec<Coord>),

    /// Next cell of the solution path, from the start to the end.
    PathStep(Coord),

    /// The end was reached.
    SolutionFound(Path),

    /// The frontier is empty but the end was not reached. This only happens when the maze is not
    /// connected.
    ExhaustedNoPath,
}

impl VisitEvent {
    /// Whether this is the last event of the sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VisitEvent::SolutionFound(_) | VisitEvent::ExhaustedNoPath
        )
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    SolutionFound(Path),
    ExhaustedNoPath,
}

/// Search progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Running,
    Done,
}

/// [`Search`] object.
#[derive(Debug)]
pub struct Search {
    /// Copy of the maze. The search only reads the walls.
    grid: Grid,

    start: Coord,
    end: Coord,
    algorithm: Algorithm,

    /// Waiting cells for the sequential algorithms.
    frontier: FrontierSet,

    /// Active set for the level-synchronous algorithms.
    level: Vec<Coord>,

    /// Cells that have been added to the frontier, indexed by [`Grid::index`].
    reached: Vec<bool>,

    /// Cells that have been expanded.
    closed: Vec<bool>,

    /// Best known number of moves from the start.
    cost: Vec<usize>,

    /// Previous cell on the best known path from the start.
    parent: Vec<Option<Coord>>,

    /// Events produced by the last step and not yet returned.
    pending: VecDeque<VisitEvent>,

    state: State,

    /// Number of expanded cells.
    expansions: usize,

    /// Solution, once found.
    path: Option<Path>,
}

impl Search {
    /// Create the search. The grid is copied, so the caller can change the annotations of its
    /// own grid while the search runs.
    ///
    /// # Errors
    ///
    /// The method returns [`MazeError::StartOutOfBounds`] or [`MazeError::EndOutOfBounds`] if a
    /// cell is not inside the grid.
    pub fn new(
        grid: &Grid,
        start: Coord,
        end: Coord,
        algorithm: Algorithm,
    ) -> Result<Self, MazeError> {
        if !grid.contains(start) {
            return Err(MazeError::StartOutOfBounds(start));
        }
        if !grid.contains(end) {
            return Err(MazeError::EndOutOfBounds(end));
        }

        let n: usize = grid.num_cells();
        let mut search: Search = Self {
            grid: grid.clone(),
            start,
            end,
            algorithm,
            frontier: FrontierSet::new(algorithm.discipline()),
            level: Vec::new(),
            reached: vec![false; n],
            closed: vec![false; n],
            cost: vec![usize::MAX; n],
            parent: vec![None; n],
            pending: VecDeque::new(),
            state: State::Running,
            expansions: 0,
            path: None,
        };

        debug!("Solving from {start} to {end} with {algorithm}");
        let i: usize = grid.index(start);
        search.reached[i] = true;
        search.cost[i] = 0;
        match algorithm.expansion() {
            Expansion::Sequential => {
                let h: usize = search.heuristic(start);
                let node: Node = search.frontier.node(start, 0, h);
                search.frontier.push(node);
            }
            Expansion::LevelSynchronous => search.level.push(start),
        }
        search.pending.push_back(VisitEvent::Discovered(start));
        Ok(search)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of cells expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Run the search until the end, without any delay, and return the outcome.
    pub fn run_to_end(&mut self) -> SolveOutcome {
        while let Some(event) = self.next() {
            match event {
                VisitEvent::SolutionFound(path) => return SolveOutcome::SolutionFound(path),
                VisitEvent::ExhaustedNoPath => return SolveOutcome::ExhaustedNoPath,
                _ => (),
            }
        }
        // Already consumed by a previous call
        match &self.path {
            Some(p) => SolveOutcome::SolutionFound(p.clone()),
            None => SolveOutcome::ExhaustedNoPath,
        }
    }

    /// Manhattan distance to the end, for A*. Other algorithms do not use a heuristic.
    fn heuristic(&self, coord: Coord) -> usize {
        match self.algorithm.discipline() {
            Discipline::Priority => coord.manhattan(self.end),
            Discipline::Fifo | Discipline::Lifo => 0,
        }
    }

    /// Perform one expansion step.
    fn step(&mut self) {
        match self.algorithm.expansion() {
            Expansion::Sequential => self.step_sequential(),
            Expansion::LevelSynchronous => self.step_level(),
        }
    }

    /// Expand the next cell from the frontier.
    fn step_sequential(&mut self) {
        let Some(node) = self.frontier.pop() else {
            self.finish_exhausted();
            return;
        };
        let i: usize = self.grid.index(node.coord);
        if self.closed[i] {
            return;
        }

        self.expansions += 1;
        self.pending.push_back(VisitEvent::Exploring(vec![node.coord]));
        if node.coord == self.end {
            self.finish_found();
            return;
        }
        self.closed[i] = true;

        let neighbors: Vec<Coord> = self.grid.passages(node.coord).collect();
        for n in neighbors {
            if self.relax(node.coord, n, node.g + 1) {
                let h: usize = self.heuristic(n);
                let next: Node = self.frontier.node(n, node.g + 1, h);
                self.frontier.push(next);
            }
        }
        self.pending.push_back(VisitEvent::Expanded(vec![node.coord]));
    }

    /// Expand the whole active set.
    fn step_level(&mut self) {
        if self.level.is_empty() {
            self.finish_exhausted();
            return;
        }
        let level: Vec<Coord> = std::mem::take(&mut self.level);

        self.expansions += level.len();
        self.pending.push_back(VisitEvent::Exploring(level.clone()));
        if level.contains(&self.end) {
            self.finish_found();
            return;
        }

        let mut next: Vec<Coord> = Vec::new();
        for c in &level {
            let i: usize = self.grid.index(*c);
            self.closed[i] = true;
            let g: usize = self.cost[i] + 1;
            let neighbors: Vec<Coord> = self.grid.passages(*c).collect();
            for n in neighbors {
                if self.relax(*c, n, g) {
                    next.push(n);
                }
            }
        }
        debug!("Level of {} cells, {} in the next one", level.len(), next.len());
        self.pending.push_back(VisitEvent::Expanded(level));
        self.level = next;
    }

    /// Record that `to` can be reached from `from` in `g` moves.
    ///
    /// Return `true` if `to` must join the frontier: the cell has never been reached, or the A*
    /// open set holds it with a higher cost.
    fn relax(&mut self, from: Coord, to: Coord, g: usize) -> bool {
        let i: usize = self.grid.index(to);
        if self.closed[i] {
            return false;
        }
        if self.reached[i] && !(self.frontier.allows_improvement() && g < self.cost[i]) {
            return false;
        }
        self.reached[i] = true;
        self.cost[i] = g;
        self.parent[i] = Some(from);
        self.pending.push_back(VisitEvent::Discovered(to));
        true
    }

    /// Rebuild the path by following the parent links back from the end.
    fn build_path(&self) -> Path {
        let mut reversed: Vec<Coord> = vec![self.end];
        let mut c: Coord = self.end;
        while let Some(p) = self.parent[self.grid.index(c)] {
            reversed.push(p);
            c = p;
        }
        reversed.reverse();
        Path::from_vec(&reversed)
    }

    fn finish_found(&mut self) {
        let path: Path = self.build_path();
        info!(
            "{}: path of {} moves found after {} expansions",
            self.algorithm,
            path.num_edges(),
            self.expansions
        );
        for c in path.get() {
            self.pending.push_back(VisitEvent::PathStep(*c));
        }
        self.pending.push_back(VisitEvent::SolutionFound(path.clone()));
        self.path = Some(path);
        self.state = State::Done;
    }

    fn finish_exhausted(&mut self) {
        error!(
            "{}: no path from {} to {} after {} expansions, the maze is not connected",
            self.algorithm, self.start, self.end, self.expansions
        );
        self.pending.push_back(VisitEvent::ExhaustedNoPath);
        self.state = State::Done;
    }
}

impl Iterator for Search {
    type Item = VisitEvent;

    fn next(&mut self) -> Option<VisitEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.state == State::Done {
                return None;
            }
            self.step();
        }
    }
}

/// Solve the maze without any animation.
///
/// # Errors
///
/// The function returns an error if the start or the end cell is not inside the grid. See
/// [`Search::new`].
pub fn solve(
    grid: &Grid,
    start: Coord,
    end: Coord,
    algorithm: Algorithm,
) -> Result<SolveOutcome, MazeError> {
    Ok(Search::new(grid, start, end, algorithm)?.run_to_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::cell::Direction;
    use crate::generator::prim::PrimGenerator;

    fn open_grid(width: usize, height: usize) -> Grid {
        let mut grid: Grid = Grid::new(width, height);
        for i in 0..grid.num_cells() {
            let c: Coord = grid.coord(i);
            grid.open_wall(c, Direction::Right);
            grid.open_wall(c, Direction::Down);
        }
        grid
    }

    fn found_path(outcome: SolveOutcome) -> Path {
        match outcome {
            SolveOutcome::SolutionFound(p) => p,
            SolveOutcome::ExhaustedNoPath => panic!("no path found"),
        }
    }

    fn solved(grid: &Grid, start: Coord, end: Coord, algorithm: Algorithm) -> Path {
        found_path(solve(grid, start, end, algorithm).expect("cells inside the maze"))
    }

    #[test]
    fn shortest_path_on_generated_mazes() {
        for (w, h) in [(5, 5), (20, 20), (13, 4), (1, 9)] {
            for seed in 0..5 {
                let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
                    .generate(w, h, Some(seed))
                    .expect("valid size");
                let start: Coord = Coord::new(0, 0);
                let end: Coord = Coord::new(w - 1, h - 1);
                let expected: Option<usize> = grid.distance(start, end);

                for a in [
                    Algorithm::Bfs,
                    Algorithm::Dijkstra,
                    Algorithm::AStar,
                    Algorithm::BfsParallel,
                ] {
                    let path: Path = solved(&grid, start, end, a);
                    assert!(path.connects(&grid, start, end), "{a} {w}x{h} seed {seed}");
                    assert_eq!(Some(path.num_edges()), expected, "{a} {w}x{h} seed {seed}");
                }
            }
        }
    }

    #[test]
    fn depth_first_variants_find_a_valid_path() {
        for seed in 0..5 {
            let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
                .generate(15, 10, Some(seed))
                .expect("valid size");
            let start: Coord = Coord::new(0, 0);
            let end: Coord = Coord::new(14, 9);
            for a in [Algorithm::Dfs, Algorithm::DfsParallel] {
                let path: Path = solved(&grid, start, end, a);
                assert!(path.connects(&grid, start, end), "{a} seed {seed}");
            }
        }
    }

    #[test]
    fn shortest_path_with_loops() {
        let grid: Grid = open_grid(6, 5);
        let start: Coord = Coord::new(0, 0);
        let end: Coord = Coord::new(5, 4);
        for a in Algorithm::ALL {
            let path: Path = solved(&grid, start, end, a);
            assert!(path.connects(&grid, start, end), "{a}");
            if a.is_shortest() {
                assert_eq!(path.num_edges(), 9, "{a}");
            }
        }
    }

    #[test]
    fn astar_follows_the_heuristic() {
        let grid: Grid = open_grid(5, 5);
        let mut search: Search =
            Search::new(&grid, Coord::new(0, 0), Coord::new(4, 0), Algorithm::AStar)
                .expect("cells inside the maze");
        let path: Path = found_path(search.run_to_end());
        assert_eq!(path.num_edges(), 4);
        assert_eq!(search.expansions(), 5);
    }

    #[test]
    fn disconnected_maze_is_exhausted() {
        let grid: Grid = Grid::new(3, 3);
        for a in Algorithm::ALL {
            let mut search: Search = Search::new(&grid, Coord::new(0, 0), Coord::new(2, 2), a)
                .expect("cells inside the maze");
            let events: Vec<VisitEvent> = search.by_ref().collect();
            assert_eq!(events.last(), Some(&VisitEvent::ExhaustedNoPath), "{a}");
            assert_eq!(search.expansions(), 1, "{a}");
            assert_eq!(search.run_to_end(), SolveOutcome::ExhaustedNoPath, "{a}");
        }
    }

    #[test]
    fn cells_outside_the_maze_are_rejected() {
        let grid: Grid = open_grid(3, 3);
        assert_eq!(
            solve(&grid, Coord::new(9, 9), Coord::new(2, 2), Algorithm::Bfs),
            Err(MazeError::StartOutOfBounds(Coord::new(9, 9)))
        );
        assert_eq!(
            solve(&grid, Coord::new(0, 0), Coord::new(3, 0), Algorithm::AStar),
            Err(MazeError::EndOutOfBounds(Coord::new(3, 0)))
        );
        assert!(matches!(
            Search::new(&Grid::new(0, 3), Coord::new(0, 0), Coord::new(0, 0), Algorithm::Dfs),
            Err(MazeError::StartOutOfBounds(_))
        ));
    }

    #[test]
    fn single_cell_events() {
        let grid: Grid = Grid::new(1, 1);
        let c: Coord = Coord::new(0, 0);
        let events: Vec<VisitEvent> = Search::new(&grid, c, c, Algorithm::Bfs)
            .expect("cells inside the maze")
            .collect();
        assert_eq!(
            events,
            vec![
                VisitEvent::Discovered(c),
                VisitEvent::Exploring(vec![c]),
                VisitEvent::PathStep(c),
                VisitEvent::SolutionFound(Path::from_vec(&[c])),
            ]
        );
    }

    #[test]
    fn sequential_event_order() {
        // 2x1 corridor
        let mut grid: Grid = Grid::new(2, 1);
        grid.open_wall(Coord::new(0, 0), Direction::Right);
        let a: Coord = Coord::new(0, 0);
        let b: Coord = Coord::new(1, 0);
        let events: Vec<VisitEvent> = Search::new(&grid, a, b, Algorithm::Dfs)
            .expect("cells inside the maze")
            .collect();
        assert_eq!(
            events,
            vec![
                VisitEvent::Discovered(a),
                VisitEvent::Exploring(vec![a]),
                VisitEvent::Discovered(b),
                VisitEvent::Expanded(vec![a]),
                VisitEvent::Exploring(vec![b]),
                VisitEvent::PathStep(a),
                VisitEvent::PathStep(b),
                VisitEvent::SolutionFound(Path::from_vec(&[a, b])),
            ]
        );
    }

    #[test]
    fn parallel_search_expands_one_level_per_step() {
        let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
            .generate(10, 10, Some(5))
            .expect("valid size");
        let start: Coord = Coord::new(0, 0);
        let end: Coord = Coord::new(9, 9);
        let distance: usize = grid.distance(start, end).expect("connected maze");

        for a in [Algorithm::BfsParallel, Algorithm::DfsParallel] {
            let levels: usize = Search::new(&grid, start, end, a)
                .expect("cells inside the maze")
                .filter(|e| matches!(e, VisitEvent::Exploring(_)))
                .count();
            assert_eq!(levels, distance + 1, "{a}");
        }
    }

    #[test]
    fn search_is_finite_and_not_restartable() {
        let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
            .generate(8, 8, Some(1))
            .expect("valid size");
        for a in Algorithm::ALL {
            let mut search: Search = Search::new(&grid, Coord::new(0, 0), Coord::new(7, 7), a)
                .expect("cells inside the maze");
            let events: Vec<VisitEvent> = search.by_ref().collect();
            assert!(events.last().is_some_and(VisitEvent::is_terminal), "{a}");
            assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
            assert!(search.expansions() <= grid.num_cells());
            assert_eq!(search.next(), None);
            assert!(matches!(search.run_to_end(), SolveOutcome::SolutionFound(_)));
        }
    }

    #[test]
    fn cells_are_expanded_once() {
        let grid: Grid = open_grid(7, 7);
        for a in Algorithm::ALL {
            let mut expanded: Vec<Coord> = Vec::new();
            let search: Search = Search::new(&grid, Coord::new(0, 0), Coord::new(6, 6), a)
                .expect("cells inside the maze");
            for event in search {
                if let VisitEvent::Expanded(cells) = event {
                    expanded.extend(cells);
                }
            }
            let total: usize = expanded.len();
            expanded.sort_by_key(|c| (c.y, c.x));
            expanded.dedup();
            assert_eq!(expanded.len(), total, "{a}");
        }
    }

    #[test]
    fn events_serialize_for_the_renderer() {
        let json: String =
            serde_json::to_string(&VisitEvent::Exploring(vec![Coord::new(1, 2)])).expect("json");
        assert_eq!(json, r#"{"event":"exploring","cells":[{"x":1,"y":2}]}"#);
        let json: String = serde_json::to_string(&VisitEvent::ExhaustedNoPath).expect("json");
        assert_eq!(json, r#"{"event":"exhausted_no_path"}"#);
    }
}
