// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Restore the original terminal mode when the process is terminated.
//!
//! [`Drop`] on [`crate::RawInputDriver`] covers normal returns and panics (unwinding).
//! Termination that skips destructors is covered here:
//!
//! | Platform | Trigger                                  | Mechanism                    |
//! | :------- | :--------------------------------------- | :--------------------------- |
//! | Unix     | `SIGHUP`, `SIGINT`, `SIGQUIT`, `SIGTERM` | `signal-hook` low level hook |
//! | Windows  | Ctrl+C / Ctrl+Break / console close      | `SetConsoleCtrlHandler()`    |
//!
//! The handler restores the snapshot only if the process wide "mode altered" flag is
//! set, then lets the default disposition run (the process still terminates). The
//! snapshot lives in a [`std::sync::OnceLock`] and the flag in an
//! [`std::sync::atomic::AtomicBool`], so the handler never takes a lock.
//!
//! An [`ExitHook`] is an RAII registration: dropping it unregisters the handlers.

#[cfg(not(any(unix, windows)))]
compile_error!("keypress only supports unix and windows terminals");

#[cfg(unix)]
mod exit_hook_unix;
#[cfg(windows)]
mod exit_hook_windows;

#[cfg(unix)]
pub use exit_hook_unix::*;
#[cfg(windows)]
pub use exit_hook_windows::*;
