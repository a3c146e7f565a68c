// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The turn loop: wait for a key, move, redraw, until the goal is reached or the
//! player gives up.
//!
//! The loop blocks in [`KeySource::next_key`] between turns. While it waits the
//! terminal is in raw mode, so keys typed on the game screen are never echoed over
//! the maze. The clock in the status line is refreshed on every redraw, and the final
//! time is part of the [`GameOutcome::Won`] report.
//!
//! ```text
//! ┌─▶ next_key(true) ─┬─ Invalid / NoKeyAvailable ─▶ ignore
//! │                   ├─ EndOfInput ───────────────▶ return EndOfInput
//! │                   └─ Char(ch) ─────────────────▶ quit? move? ignore?
//! │                                                     │
//! └──────────────────── redraw ◀────────────────────────┘  goal reached ─▶ return Won
//! ```

use super::{Direction, Maze, Pos, paint_frame};
use crate::CommonResult;
use keypress::{KeyRead, KeypressError, RawInputDriver};
use miette::IntoDiagnostic;
use std::{io::Write,
          time::{Duration, Instant}};

pub const ESCAPE: char = '\u{1b}';

/// Where the game loop gets its keys. The real one is [`RawInputDriver`].
pub trait KeySource {
    /// # Errors
    ///
    /// Fatal input errors, which end the game.
    fn next_key(&mut self, wait: bool) -> Result<KeyRead, KeypressError>;
}

impl KeySource for RawInputDriver {
    fn next_key(&mut self, wait: bool) -> Result<KeyRead, KeypressError> {
        self.read_and_reset(wait)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won { elapsed: Duration, moves: usize },
    Quit,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Quit,
    Ignore,
    EndOfInput,
}

/// Map one key to an action. `ESC` needs a look at what follows, since it also starts
/// ANSI cursor key sequences (`ESC [ A`): a lone `ESC` quits, `ESC [ A..D` moves, and
/// anything else (Alt+key and friends) is ignored. Input ending right after `ESC` is
/// reported as [`KeyAction::EndOfInput`].
///
/// # Errors
///
/// Fatal input errors while peeking past `ESC`.
pub fn classify_key(
    key: char,
    keys: &mut impl KeySource,
) -> Result<KeyAction, KeypressError> {
    if key == 'q' || key == 'Q' {
        return Ok(KeyAction::Quit);
    }
    if key != ESCAPE {
        return Ok(Direction::from_key(key).map_or(KeyAction::Ignore, KeyAction::Move));
    }

    Ok(match keys.next_key(false)? {
        KeyRead::NoKeyAvailable => KeyAction::Quit,
        KeyRead::EndOfInput => KeyAction::EndOfInput,
        KeyRead::Char('[') => match keys.next_key(false)? {
            KeyRead::Char(ch) => {
                Direction::from_ansi_final_byte(ch).map_or(KeyAction::Ignore, KeyAction::Move)
            }
            KeyRead::EndOfInput => KeyAction::EndOfInput,
            KeyRead::NoKeyAvailable | KeyRead::Invalid => KeyAction::Ignore,
        },
        KeyRead::Char(_) | KeyRead::Invalid => KeyAction::Ignore,
    })
}

#[derive(Debug)]
pub struct GameState {
    pub maze: Maze,
    pub player: Pos,
    pub moves: usize,
    pub started: Instant,
}

impl GameState {
    #[must_use]
    pub fn new(maze: Maze) -> Self {
        Self {
            player: maze.start(),
            maze,
            moves: 0,
            started: Instant::now(),
        }
    }

    /// Returns `true` if the player moved.
    pub fn apply(&mut self, direction: Direction) -> bool {
        match self.maze.step(self.player, direction) {
            Some(to) => {
                self.player = to;
                self.moves += 1;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_won(&self) -> bool { self.player == self.maze.goal() }
}

/// Play one game on `out`.
///
/// # Errors
///
/// Fatal input errors from `keys`, and write errors on `out`.
pub fn run_game_loop(
    maze: Maze,
    keys: &mut impl KeySource,
    out: &mut impl Write,
) -> CommonResult<GameOutcome> {
    let mut state = GameState::new(maze);
    repaint(out, &state)?;

    loop {
        let action = match keys.next_key(true)? {
            KeyRead::NoKeyAvailable | KeyRead::Invalid => continue,
            KeyRead::EndOfInput => KeyAction::EndOfInput,
            KeyRead::Char(ch) => classify_key(ch, keys)?,
        };

        match action {
            KeyAction::EndOfInput => {
                tracing::debug!(message = "game over: end of input", moves = state.moves);
                return Ok(GameOutcome::EndOfInput);
            }
            KeyAction::Quit => {
                tracing::debug!(message = "game over: quit", moves = state.moves);
                return Ok(GameOutcome::Quit);
            }
            KeyAction::Ignore => {}
            KeyAction::Move(direction) => {
                if state.apply(direction) {
                    if state.is_won() {
                        let elapsed = state.started.elapsed();
                        repaint(out, &state)?;
                        tracing::debug!(
                            message = "game over: won",
                            moves = state.moves,
                            ?elapsed
                        );
                        return Ok(GameOutcome::Won {
                            elapsed,
                            moves: state.moves,
                        });
                    }
                    repaint(out, &state)?;
                }
            }
        }
    }
}

fn repaint(out: &mut impl Write, state: &GameState) -> CommonResult<()> {
    paint_frame(
        out,
        &state.maze,
        state.player,
        state.started.elapsed(),
        state.moves,
    )
    .into_diagnostic()
}
