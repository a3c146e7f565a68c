// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_MAZE_SIZE, MAX_MAZE_SIZE, MIN_MAZE_SIZE, normalize_maze_size};
use clap::{Args, Parser};

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "maze")]
#[command(about = "Find your way from @ to X, one key press at a time")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version}\n\nUSAGE:\n  maze [\x1b[32msize\x1b[0m] [\x1b[34moptions\x1b[0m]\n\n{positionals}\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(
        value_name = "size",
        default_value_t = DEFAULT_MAZE_SIZE,
        help = format!(
            "Side length of the maze. Clamped to {MIN_MAZE_SIZE}..={MAX_MAZE_SIZE}, even sizes are rounded up."
        )
    )]
    pub size: usize,

    #[arg(long, help = "Seed for the maze generator, to replay the same maze.")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

impl CLIArg {
    /// The requested size, made playable.
    #[must_use]
    pub fn maze_size(&self) -> usize { normalize_maze_size(self.size) }
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,
}
