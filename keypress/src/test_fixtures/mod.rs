// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fakes for the backend seams, and PTY plumbing for tests that need a real terminal.

// Attach sources.
mod mock_tty;
mod scripted_console;

#[cfg(unix)]
mod generate_pty_test;
#[cfg(unix)]
mod pty_slave_report;

// Re-export.
pub use mock_tty::*;
pub use scripted_console::*;

#[cfg(unix)]
pub use pty_slave_report::*;
