// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Square maze carved by a randomized depth first search (recursive backtracker).
//!
//! Rooms sit on odd coordinates and walls on even ones, so a maze of side `n` (odd)
//! has `(n / 2)²` rooms. Carving knocks out the wall between a room and a random
//! unvisited neighbor two cells away, backtracking when it hits a dead end. The result
//! is a perfect maze: every open cell is reachable, with exactly one path between any
//! two of them.
//!
//! ```text
//! #######
//! #@    #
//! ### # #
//! #   # #
//! # ### #
//! #    X#
//! #######
//! ```

use rand::{Rng, seq::SliceRandom};

pub const MIN_MAZE_SIZE: usize = 5;
pub const MAX_MAZE_SIZE: usize = 101;
pub const DEFAULT_MAZE_SIZE: usize = 21;

/// Clamp to `MIN_MAZE_SIZE..=MAX_MAZE_SIZE` and round even sizes up, since the
/// carving scheme needs a wall on both borders.
#[must_use]
pub fn normalize_maze_size(requested: usize) -> usize {
    let clamped = requested.clamp(MIN_MAZE_SIZE, MAX_MAZE_SIZE);
    if clamped.is_multiple_of(2) {
        clamped + 1
    } else {
        clamped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[must_use]
pub fn pos(row: usize, col: usize) -> Pos { Pos { row, col } }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
    start: Pos,
    goal: Pos,
}

impl Maze {
    /// `size` is normalized with [`normalize_maze_size`] first.
    pub fn generate(size: usize, rng: &mut impl Rng) -> Self {
        let size = normalize_maze_size(size);
        let mut maze = Self {
            size,
            cells: vec![Cell::Wall; size * size],
            start: pos(1, 1),
            goal: pos(size - 2, size - 2),
        };

        let mut stack = vec![maze.start];
        maze.set(maze.start, Cell::Open);

        while let Some(&current) = stack.last() {
            let mut candidates = maze.uncarved_rooms_next_to(current);
            candidates.shuffle(rng);
            match candidates.first() {
                Some(&next) => {
                    let between = pos(
                        usize::midpoint(current.row, next.row),
                        usize::midpoint(current.col, next.col),
                    );
                    maze.set(between, Cell::Open);
                    maze.set(next, Cell::Open);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        tracing::debug!(
            message = "maze generated",
            size,
            open_cells = maze.cells.iter().filter(|it| **it == Cell::Open).count()
        );

        maze
    }

    #[must_use]
    pub fn size(&self) -> usize { self.size }

    #[must_use]
    pub fn start(&self) -> Pos { self.start }

    #[must_use]
    pub fn goal(&self) -> Pos { self.goal }

    /// `None` when `at` is off the grid.
    #[must_use]
    pub fn cell(&self, at: Pos) -> Option<Cell> {
        (at.row < self.size && at.col < self.size)
            .then(|| self.cells[at.row * self.size + at.col])
    }

    #[must_use]
    pub fn is_open(&self, at: Pos) -> bool { self.cell(at) == Some(Cell::Open) }

    /// One row, left to right. Panics if `row` is off the grid.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    fn set(&mut self, at: Pos, cell: Cell) { self.cells[at.row * self.size + at.col] = cell; }

    fn uncarved_rooms_next_to(&self, at: Pos) -> Vec<Pos> {
        let last_room = self.size - 2;
        let mut it = Vec::with_capacity(4);
        if at.row >= 3 {
            it.push(pos(at.row - 2, at.col));
        }
        if at.row + 2 <= last_room {
            it.push(pos(at.row + 2, at.col));
        }
        if at.col >= 3 {
            it.push(pos(at.row, at.col - 2));
        }
        if at.col + 2 <= last_room {
            it.push(pos(at.row, at.col + 2));
        }
        it.retain(|room| self.cell(*room) == Some(Cell::Wall));
        it
    }
}
