// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGHUP SIGINT SIGQUIT SIGTERM tcsetattr termios

use crate::KeypressError;
use rustix::termios::{self, OptionalActions, Termios};
use signal_hook::{SigId,
                  consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM},
                  low_level};
use std::{os::fd::{BorrowedFd, RawFd},
          sync::{OnceLock,
                 atomic::{AtomicBool, Ordering}}};

/// Signals whose default action terminates the process without running destructors.
pub const RESTORE_ON_SIGNALS: [i32; 4] = [SIGHUP, SIGINT, SIGQUIT, SIGTERM];

const STDIN_FD: RawFd = 0;

static MODE_ALTERED: AtomicBool = AtomicBool::new(false);

/// First capture wins: every driver in the process snapshots the same terminal.
static ORIGINAL_TERMIOS: OnceLock<Termios> = OnceLock::new();

#[derive(Debug)]
pub struct ExitHook {
    signal_ids: Vec<SigId>,
}

impl ExitHook {
    /// Remember `original` and register the restore handler for
    /// [`RESTORE_ON_SIGNALS`].
    ///
    /// # Errors
    ///
    /// [`KeypressError::ExitHook`] if any handler can't be registered. Handlers that
    /// were registered before the failure are removed again.
    pub fn install(original: &Termios) -> Result<Self, KeypressError> {
        ORIGINAL_TERMIOS.get_or_init(|| original.clone());

        let mut hook = Self {
            signal_ids: Vec::with_capacity(RESTORE_ON_SIGNALS.len()),
        };

        for signal in RESTORE_ON_SIGNALS {
            // SAFETY: the action only does async-signal-safe work: atomic swap,
            // `OnceLock::get()` (an atomic load once initialized), `tcsetattr()` (an
            // ioctl), and `emulate_default_handler()`.
            let id = unsafe {
                low_level::register(signal, move || {
                    restore_original_mode();
                    drop(low_level::emulate_default_handler(signal));
                })
            }
            .map_err(KeypressError::ExitHook)?;
            hook.signal_ids.push(id);
        }

        tracing::debug!(
            message = "keypress: exit hook installed",
            signals = ?RESTORE_ON_SIGNALS
        );

        Ok(hook)
    }

    pub fn set_mode_altered(&self, altered: bool) {
        MODE_ALTERED.store(altered, Ordering::SeqCst);
    }
}

impl Drop for ExitHook {
    fn drop(&mut self) {
        for id in self.signal_ids.drain(..) {
            let _was_registered = low_level::unregister(id);
        }
    }
}

/// Put the original settings back if they are currently altered. Returns `true` if
/// they were restored.
///
/// Runs in signal handler context, so no allocation, no locks, no logging.
pub fn restore_original_mode() -> bool {
    if !MODE_ALTERED.swap(false, Ordering::SeqCst) {
        return false;
    }
    let Some(original) = ORIGINAL_TERMIOS.get() else {
        return false;
    };
    // SAFETY: fd 0 stays open for the life of the process.
    let stdin = unsafe { BorrowedFd::borrow_raw(STDIN_FD) };
    termios::tcsetattr(stdin, OptionalActions::Now, original).is_ok()
}
