// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The raw input driver: one "read a key" operation over three very different input
//! sources, plus the bookkeeping that guarantees the terminal is put back the way it
//! was found.
//!
//! ## Backends
//!
//! The backend is picked once, when the [`RawInputDriver`] is created:
//!
//! ```text
//! stdin is a terminal?
//!   │
//!   ├─ no  ─▶ Backend::NonInteractive   decode bytes, never touch modes
//!   │
//!   └─ yes ─▶ OS name?
//!               ├─ unix    ─▶ Backend::Posix     termios + poll + read
//!               └─ windows ─▶ Backend::Windows   console mode + _kbhit + _getwch
//! ```
//!
//! Only the selected backend holds any platform state. The other one simply isn't
//! constructed, so there are no "unused handle" fields to guard.
//!
//! ## Mode lifecycle
//!
//! ```text
//!                read()                      read()
//!   Original ──────────▶ Raw ──▶ Intermediate ──────▶ Raw ──▶ Intermediate
//!      ▲                 (POSIX, per read)                          │
//!      │                                                            │
//!      └──────────────── reset_console_mode() ◀─────────────────────┘
//! ```
//!
//! On Windows there is no intermediate step: the console stays raw after a read until
//! it is reset. Either way [`RawInputDriver::read_and_reset`] leaves the terminal in
//! its original mode when it returns, which is what interactive callers should use.
//!
//! Restoration is guaranteed on three paths:
//!
//! 1. Explicitly, through [`RawInputDriver::reset_console_mode`] (idempotent).
//! 2. On drop of the driver, which also covers panics that unwind.
//! 3. On termination signals / console control events, through the [`ExitHook`].

// Attach sources.
mod backend_non_interactive;
mod backend_posix;
mod backend_windows;
mod driver_core;
mod exit_hook;
mod terminal_mode;

#[cfg(unix)]
mod termios_tty;

#[cfg(windows)]
mod win32_console;

// Re-export.
pub use backend_non_interactive::*;
pub use backend_posix::*;
pub use backend_windows::*;
pub use driver_core::*;
pub use exit_hook::*;
pub use terminal_mode::*;

#[cfg(unix)]
pub use termios_tty::*;

#[cfg(windows)]
pub use win32_console::*;

// PTY based tests against a real terminal.
#[cfg(all(unix, test))]
mod integration_tests;
