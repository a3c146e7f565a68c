// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::GameOutcome;

pub const STATUS_TIME: &str = "Time:";
pub const STATUS_MOVES: &str = "Moves:";
pub const KEY_HELP: &str = "[wasd / hjkl / arrows] move  [q / Esc] quit";

pub const REPORT_FOOTER: &str =
    "If the terminal looks wrong after this error, run `reset` (or `stty sane`).";

#[must_use]
pub fn outcome_msg(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Won { elapsed, moves } => format!(
            "You reached the goal in {:.1}s with {moves} moves!",
            elapsed.as_secs_f64()
        ),
        GameOutcome::Quit => "Gave up? The maze will still be here.".to_string(),
        GameOutcome::EndOfInput => "Input ended before the goal was reached.".to_string(),
    }
}
