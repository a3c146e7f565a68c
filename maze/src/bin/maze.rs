// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use keypress::RawInputDriver;
use maze::{CLIArg, CommonResult, Maze, run_game_loop,
           setup_default_miette_global_report_handler, try_initialize_logging_global,
           ui_str};
use rand::{SeedableRng, rngs::StdRng};

fn main() -> CommonResult<()> {
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.global_options.enable_logging;
    enable_logging.then(|| {
        try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    });

    setup_default_miette_global_report_handler(ui_str::REPORT_FOOTER);

    let mut rng = cli_arg
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let maze = Maze::generate(cli_arg.maze_size(), &mut rng);

    let outcome = {
        let mut driver = RawInputDriver::new()?;
        run_game_loop(maze, &mut driver, &mut std::io::stdout())?
    };

    println!("{}", ui_str::outcome_msg(&outcome));

    enable_logging.then(|| {
        tracing::debug!(message = "Stop logging...", ?outcome);
    });

    Ok(())
}
