// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key bindings and the single movement rule: you can only step onto open cells.
//!
//! | Direction | WASD | vi  | Arrow (Windows console) | Arrow (ANSI, after `ESC [`) |
//! | :-------- | :--- | :-- | :---------------------- | :-------------------------- |
//! | Up        | `w`  | `k` | `U+E048`                | `A`                         |
//! | Down      | `s`  | `j` | `U+E050`                | `B`                         |
//! | Left      | `a`  | `h` | `U+E04B`                | `D`                         |
//! | Right     | `d`  | `l` | `U+E04D`                | `C`                         |

use super::{Maze, Pos};
use keypress::{ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Letter keys are matched case insensitively.
    #[must_use]
    pub fn from_key(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'w' | 'k' | ARROW_UP => Some(Direction::Up),
            's' | 'j' | ARROW_DOWN => Some(Direction::Down),
            'a' | 'h' | ARROW_LEFT => Some(Direction::Left),
            'd' | 'l' | ARROW_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    /// Final byte of an ANSI cursor key sequence (`ESC [ A` and friends).
    #[must_use]
    pub fn from_ansi_final_byte(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Direction::Up),
            'B' => Some(Direction::Down),
            'C' => Some(Direction::Right),
            'D' => Some(Direction::Left),
            _ => None,
        }
    }
}

impl Pos {
    /// `None` if the step would leave the first row or column.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Pos> {
        let Pos { row, col } = self;
        Some(match direction {
            Direction::Up => Pos {
                row: row.checked_sub(1)?,
                col,
            },
            Direction::Down => Pos { row: row + 1, col },
            Direction::Left => Pos {
                row,
                col: col.checked_sub(1)?,
            },
            Direction::Right => Pos { row, col: col + 1 },
        })
    }
}

impl Maze {
    /// Where `from` ends up after moving in `direction`, or `None` if the way is
    /// blocked by a wall or the edge of the grid.
    #[must_use]
    pub fn step(&self, from: Pos, direction: Direction) -> Option<Pos> {
        from.step(direction).filter(|to| self.is_open(*to))
    }
}
