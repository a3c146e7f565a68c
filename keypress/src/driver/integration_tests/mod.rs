// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tests against a real terminal. Each one spawns the test binary again on the slave
//! side of a PTY (see [`crate::generate_pty_test`]) and checks the termios flags the
//! driver leaves behind.
//!
//! Run with: `cargo test -p keypress --lib integration_tests -- --nocapture`

mod test_intermediate_mode;
mod test_non_blocking_poll;
mod test_read_and_reset;
mod test_restore_on_exit;

use rustix::termios::{self, LocalModes, Termios};

/// Flags the driver touches. Comparing only these keeps the tests independent of
/// whatever else the PTY defaults to.
const DRIVER_LOCAL_MODES: LocalModes = LocalModes::ICANON
    .union(LocalModes::ECHO)
    .union(LocalModes::ECHONL)
    .union(LocalModes::ISIG);

fn stdin_termios() -> Result<Termios, String> {
    termios::tcgetattr(std::io::stdin()).map_err(|e| format!("tcgetattr: {e}"))
}

fn driver_flags(termios: &Termios) -> LocalModes {
    termios.local_modes & DRIVER_LOCAL_MODES
}

fn ensure(condition: bool, what: &str) -> Result<(), String> {
    if condition { Ok(()) } else { Err(what.to_string()) }
}
