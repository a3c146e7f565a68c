// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Plain text frames. The whole screen is redrawn on every change; at the largest
//! maze size a frame is about 10 KB, so diffing isn't worth it.

use super::{Cell, Maze, Pos};
use crate::ui_str;
use crossterm::{cursor::MoveTo,
                queue,
                terminal::{Clear, ClearType}};
use std::{fmt::Write as _,
          io::{self, Write},
          time::Duration};

pub const WALL_GLYPH: char = '#';
pub const OPEN_GLYPH: char = ' ';
pub const PLAYER_GLYPH: char = '@';
pub const GOAL_GLYPH: char = 'X';

/// The maze with the player and goal drawn in, one line per row.
#[must_use]
pub fn render_maze(maze: &Maze, player: Pos) -> String {
    let mut acc = String::with_capacity((maze.size() + 1) * maze.size());
    for row in 0..maze.size() {
        for (col, cell) in maze.row(row).iter().enumerate() {
            let here = Pos { row, col };
            acc.push(if here == player {
                PLAYER_GLYPH
            } else if here == maze.goal() {
                GOAL_GLYPH
            } else {
                match cell {
                    Cell::Wall => WALL_GLYPH,
                    Cell::Open => OPEN_GLYPH,
                }
            });
        }
        acc.push('\n');
    }
    acc
}

#[must_use]
pub fn render_status_line(elapsed: Duration, moves: usize) -> String {
    let mut acc = String::new();
    // Writing into a `String` can't fail.
    _ = write!(
        acc,
        "{} {}s  {} {moves}  {}",
        ui_str::STATUS_TIME,
        elapsed.as_secs(),
        ui_str::STATUS_MOVES,
        ui_str::KEY_HELP
    );
    acc
}

/// Clear the screen and draw a full frame.
///
/// # Errors
///
/// Any error from writing to `out`.
pub fn paint_frame(
    out: &mut impl Write,
    maze: &Maze,
    player: Pos,
    elapsed: Duration,
    moves: usize,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(render_maze(maze, player).as_bytes())?;
    writeln!(out, "{}", render_status_line(elapsed, moves))?;
    out.flush()
}
