// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # maze
//!
//! A terminal maze game built on the [`keypress`] raw input driver. A random perfect
//! maze is generated, and the player walks from `@` to `X` with single key presses
//! (no Enter, no echo) while a clock runs in the status line.
//!
//! - [`game`]: maze generation, movement, rendering, and the turn loop.
//! - [`clap_config`]: command line arguments.
//! - [`log`]: optional file logging (`--enable-logging`).
//! - [`common`]: the [`CommonResult`] alias and the miette report handler.

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod clap_config;
pub mod common;
pub mod game;
pub mod log;
pub mod ui_str;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use clap_config::*;
pub use common::*;
pub use game::*;
pub use log::*;
