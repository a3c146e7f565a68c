// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! File logging for the game. stdout is the game screen, so log output only ever goes
//! to a file, and only when `--enable-logging` is passed.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
