/*
prim.rs

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

//! Generate a random perfect maze with the randomized Prim's algorithm.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::cell::{Coord, Direction};
use super::grid::Grid;
use crate::errors::MazeError;

/// Candidate wall: a side of a cell already in the maze.
#[derive(Debug, Copy, Clone)]
struct Wall {
    coord: Coord,
    direction: Direction,
}

/// [`PrimGenerator`] object.
pub struct PrimGenerator {
    /// Cell from which the maze grows.
    pub starting_cell: Coord,

    /// Seed used for the last generated maze.
    pub seed: u64,

    /// Number of candidate walls taken from the frontier for the last generated maze.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last maze.
    pub duration: f32,
}

impl PrimGenerator {
    /// Create the object. The maze grows from `starting_cell`.
    pub fn new(starting_cell: Coord) -> Self {
        Self {
            starting_cell,
            seed: 0,
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Generate and return a new maze.
    ///
    /// If `seed` is None, then a random seed is used. The seed is kept in [`PrimGenerator::seed`]
    /// so that the maze can be generated again.
    ///
    /// # Errors
    ///
    /// The method returns [`MazeError::InvalidDimensions`] if the width or the height is zero, and
    /// [`MazeError::StartOutOfBounds`] if the starting cell is not inside the grid.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        seed: Option<u64>,
    ) -> Result<Grid, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if self.starting_cell.x >= width || self.starting_cell.y >= height {
            return Err(MazeError::StartOutOfBounds(self.starting_cell));
        }

        let start: Instant = Instant::now();
        self.seed = seed.unwrap_or_else(|| rand::rng().random());
        self.iteration = 0;
        debug!(
            "Generating {width}x{height} maze from {}  Seed = {}",
            self.starting_cell, self.seed
        );

        let mut rng: StdRng = StdRng::seed_from_u64(self.seed);
        let mut grid: Grid = Grid::new(width, height);
        let mut frontier: Vec<Wall> = Vec::with_capacity(width * height * 2);

        grid.cell_mut(self.starting_cell).visited = true;
        Self::push_walls(&grid, self.starting_cell, &mut frontier);

        while !frontier.is_empty() {
            self.iteration += 1;

            // Order in the frontier does not matter, so swap_remove is enough
            let wall: Wall = frontier.swap_remove(rng.random_range(0..frontier.len()));

            // Candidates were pushed without looking at the neighbor, so check it now
            let Some(n) = grid.neighbor(wall.coord, wall.direction) else {
                continue;
            };
            if grid.cell(n).visited {
                continue;
            }

            grid.open_wall(wall.coord, wall.direction);
            grid.cell_mut(n).visited = true;
            Self::push_walls(&grid, n, &mut frontier);
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}  Passages = {}",
            self.iteration,
            self.duration,
            grid.num_passages()
        );
        Ok(grid)
    }

    /// Add the sides of the cell that have a neighbor in the grid.
    fn push_walls(grid: &Grid, coord: Coord, frontier: &mut Vec<Wall>) {
        for direction in Direction::ALL {
            if grid.neighbor(coord, direction).is_some() {
                frontier.push(Wall { coord, direction });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_mazes_are_perfect() {
        let sizes: [(usize, usize); 6] = [(1, 1), (1, 7), (7, 1), (2, 2), (5, 5), (20, 20)];
        for (w, h) in sizes {
            for seed in 0..10 {
                let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
                    .generate(w, h, Some(seed))
                    .expect("valid size");
                assert_eq!(grid.num_passages(), w * h - 1, "{w}x{h} seed {seed}");
                assert!(grid.is_perfect(), "{w}x{h} seed {seed}");
            }
        }
    }

    #[test]
    fn every_cell_is_visited() {
        let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
            .generate(9, 6, Some(3))
            .expect("valid size");
        assert!(grid.iter().all(|(_, c)| c.visited));
    }

    #[test]
    fn flood_fill_from_any_cell() {
        let grid: Grid = PrimGenerator::new(Coord::new(0, 0))
            .generate(6, 4, Some(11))
            .expect("valid size");
        for i in 0..grid.num_cells() {
            assert_eq!(grid.num_reachable(grid.coord(i)), grid.num_cells());
        }
    }

    #[test]
    fn single_cell_opens_nothing() {
        let mut generator: PrimGenerator = PrimGenerator::new(Coord::new(0, 0));
        let grid: Grid = generator.generate(1, 1, None).expect("valid size");
        assert_eq!(grid.num_passages(), 0);
        assert_eq!(generator.iteration, 0);
        assert!(grid.cell(Coord::new(0, 0)).visited);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut generator: PrimGenerator = PrimGenerator::new(Coord::new(0, 0));
        let a: Grid = generator.generate(12, 9, Some(42)).expect("valid size");
        let b: Grid = generator.generate(12, 9, Some(42)).expect("valid size");
        assert_eq!(a, b);

        let c: Grid = generator.generate(12, 9, Some(43)).expect("valid size");
        assert_ne!(a, c);
    }

    #[test]
    fn random_seed_is_recorded() {
        let mut generator: PrimGenerator = PrimGenerator::new(Coord::new(2, 1));
        let a: Grid = generator.generate(8, 8, None).expect("valid size");
        let seed: u64 = generator.seed;
        let b: Grid = generator.generate(8, 8, Some(seed)).expect("valid size");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut generator: PrimGenerator = PrimGenerator::new(Coord::new(0, 0));
        assert_eq!(
            generator.generate(0, 4, Some(1)),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            generator.generate(3, 0, None),
            Err(MazeError::InvalidDimensions {
                width: 3,
                height: 0
            })
        );
    }

    #[test]
    fn starting_cell_outside_the_grid_is_rejected() {
        let mut generator: PrimGenerator = PrimGenerator::new(Coord::new(5, 1));
        assert_eq!(
            generator.generate(5, 5, Some(1)),
            Err(MazeError::StartOutOfBounds(Coord::new(5, 1)))
        );
        assert!(generator.generate(6, 2, Some(1)).is_ok());
    }
}
