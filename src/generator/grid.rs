/*
grid.rs

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

//! Rectangular grid of maze cells.

use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

use super::cell::{Cell, Coord, Direction};

/// Grid object. The shape does not change after creation.
///
/// The grid is written to JSON for the renderer but never read back, so the cell vector always
/// has `width * height` entries.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Cells, row by row.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a [`Grid`] object where every cell has its four walls.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::new(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Whether the coordinates are inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Index of the cell in the internal vector. Solvers use it to address their own
    /// direct-indexed tables.
    pub fn index(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }

    /// Coordinates of the cell stored at the given index.
    pub fn coord(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let i: usize = self.index(coord);
        &mut self.cells[i]
    }

    /// Iterate over all the cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.coord(i), c))
    }

    /// Neighbor cell on the given side, if inside the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        direction.step(coord, self.width, self.height)
    }

    /// Neighbor cell on the given side, if there is no wall between the two cells.
    pub fn passage(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if self.cell(coord).has_wall(direction) {
            return None;
        }
        self.neighbor(coord, direction)
    }

    /// Cells reachable in one step from the given cell, in the up, right, down, left order.
    pub fn passages(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.passage(coord, d))
    }

    /// Whether two adjacent cells are connected by an open passage.
    pub fn is_open_between(&self, a: Coord, b: Coord) -> bool {
        Direction::ALL
            .into_iter()
            .any(|d| self.passage(a, d) == Some(b))
    }

    /// Remove the wall between the cell and its neighbor on the given side. Both cells are
    /// updated.
    ///
    /// Return the neighbor, or None if the side is the grid border.
    pub fn open_wall(&mut self, coord: Coord, direction: Direction) -> Option<Coord> {
        let n: Coord = self.neighbor(coord, direction)?;
        self.cell_mut(coord).walls[direction.index()] = false;
        self.cell_mut(n).walls[direction.opposite().index()] = false;
        Some(n)
    }

    /// Number of open passages. Each passage is shared by two cells and is counted once.
    pub fn num_passages(&self) -> usize {
        self.cells.iter().map(Cell::num_openings).sum::<usize>() / 2
    }

    /// Number of cells reachable from the given cell, by following open passages.
    pub fn num_reachable(&self, from: Coord) -> usize {
        let mut seen: Vec<bool> = vec![false; self.num_cells()];
        let mut queue: VecDeque<Coord> = VecDeque::from([from]);
        let mut count: usize = 0;

        seen[self.index(from)] = true;
        while let Some(c) = queue.pop_front() {
            count += 1;
            for n in self.passages(c) {
                let i: usize = self.index(n);
                if !seen[i] {
                    seen[i] = true;
                    queue.push_back(n);
                }
            }
        }
        count
    }

    /// Number of moves between two cells, by following open passages, or None if `to` cannot be
    /// reached from `from`.
    pub fn distance(&self, from: Coord, to: Coord) -> Option<usize> {
        let mut dist: Vec<Option<usize>> = vec![None; self.num_cells()];
        let mut queue: VecDeque<Coord> = VecDeque::from([from]);

        dist[self.index(from)] = Some(0);
        while let Some(c) = queue.pop_front() {
            let d: usize = dist[self.index(c)]?;
            if c == to {
                return Some(d);
            }
            for n in self.passages(c) {
                let i: usize = self.index(n);
                if dist[i].is_none() {
                    dist[i] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        None
    }

    /// Whether the passage graph is a spanning tree of the grid: all the cells are connected and
    /// there is no loop.
    pub fn is_perfect(&self) -> bool {
        let passages: usize = self.num_passages();
        let reachable: usize = self.num_reachable(Coord::new(0, 0));
        debug!(
            "Passages = {passages}  Reachable = {reachable}  Cells = {}",
            self.num_cells()
        );
        passages + 1 == self.num_cells() && reachable == self.num_cells()
    }

    /// Reset the solver annotations of all the cells.
    pub fn clear_annotations(&mut self) {
        for cell in &mut self.cells {
            cell.clear_annotations();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_wall_updates_both_cells() {
        let mut grid: Grid = Grid::new(3, 2);
        let n = grid.open_wall(Coord::new(1, 0), Direction::Down);

        assert_eq!(n, Some(Coord::new(1, 1)));
        assert!(!grid.cell(Coord::new(1, 0)).has_wall(Direction::Down));
        assert!(!grid.cell(Coord::new(1, 1)).has_wall(Direction::Up));
        assert!(grid.is_open_between(Coord::new(1, 1), Coord::new(1, 0)));
        assert_eq!(grid.num_passages(), 1);
    }

    #[test]
    fn border_walls_cannot_be_opened() {
        let mut grid: Grid = Grid::new(2, 2);
        assert_eq!(grid.open_wall(Coord::new(0, 0), Direction::Up), None);
        assert_eq!(grid.open_wall(Coord::new(1, 1), Direction::Right), None);
        assert_eq!(grid.num_passages(), 0);
    }

    #[test]
    fn index_round_trip() {
        let grid: Grid = Grid::new(4, 3);
        for i in 0..grid.num_cells() {
            assert_eq!(grid.index(grid.coord(i)), i);
        }
        assert_eq!(grid.coord(5), Coord::new(1, 1));
    }

    #[test]
    fn loop_is_not_perfect() {
        let mut grid: Grid = Grid::new(2, 2);
        grid.open_wall(Coord::new(0, 0), Direction::Right);
        grid.open_wall(Coord::new(0, 0), Direction::Down);
        grid.open_wall(Coord::new(1, 0), Direction::Down);
        assert!(grid.is_perfect());

        grid.open_wall(Coord::new(0, 1), Direction::Right);
        assert_eq!(grid.num_passages(), 4);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn disconnected_is_not_perfect() {
        let grid: Grid = Grid::new(2, 1);
        assert_eq!(grid.num_reachable(Coord::new(0, 0)), 1);
        assert!(!grid.is_perfect());
        assert!(Grid::new(1, 1).is_perfect());
    }

    #[test]
    fn distances() {
        let mut grid: Grid = Grid::new(3, 3);
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(0, 0)), Some(0));
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(2, 0)), None);

        grid.open_wall(Coord::new(0, 0), Direction::Down);
        grid.open_wall(Coord::new(0, 1), Direction::Right);
        grid.open_wall(Coord::new(1, 1), Direction::Up);
        grid.open_wall(Coord::new(1, 0), Direction::Right);
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(2, 0)), Some(4));
    }

    #[test]
    fn annotations_are_cleared() {
        let mut grid: Grid = Grid::new(2, 2);
        grid.cell_mut(Coord::new(1, 1)).is_path = true;
        grid.cell_mut(Coord::new(0, 1)).is_visited = true;
        grid.cell_mut(Coord::new(0, 0)).is_exploring = true;
        grid.clear_annotations();
        assert!(
            grid.iter()
                .all(|(_, c)| !c.is_path && !c.is_visited && !c.is_exploring)
        );
    }

    #[test]
    fn json_for_the_renderer() {
        let grid: Grid = Grid::new(2, 3);
        let value: serde_json::Value = serde_json::to_value(&grid).expect("serialize");
        assert_eq!(value["width"], 2);
        assert_eq!(value["height"], 3);
        assert_eq!(value["cells"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["cells"][0]["walls"], serde_json::json!([true, true, true, true]));
    }
}
