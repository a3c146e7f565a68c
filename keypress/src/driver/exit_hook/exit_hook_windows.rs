// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::KeypressError;
use std::{io,
          sync::{OnceLock,
                 atomic::{AtomicBool, Ordering}}};
use windows::Win32::{Foundation::{BOOL, FALSE, TRUE},
                     System::Console::{CONSOLE_MODE, GetStdHandle, STD_INPUT_HANDLE,
                                       SetConsoleCtrlHandler, SetConsoleMode}};

static MODE_ALTERED: AtomicBool = AtomicBool::new(false);

/// First capture wins: every driver in the process snapshots the same console.
static ORIGINAL_CONSOLE_MODE: OnceLock<u32> = OnceLock::new();

#[derive(Debug)]
pub struct ExitHook {
    _private: (),
}

impl ExitHook {
    /// Remember `original` and add the console control handler.
    ///
    /// # Errors
    ///
    /// [`KeypressError::ExitHook`] if the handler can't be added.
    pub fn install(original: u32) -> Result<Self, KeypressError> {
        ORIGINAL_CONSOLE_MODE.get_or_init(|| original);

        // SAFETY: `console_ctrl_handler` is a `'static` fn with the expected ABI.
        unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), TRUE) }
            .map_err(|e| KeypressError::ExitHook(io::Error::other(e)))?;

        tracing::debug!(message = "keypress: exit hook installed", original);

        Ok(Self { _private: () })
    }

    pub fn set_mode_altered(&self, altered: bool) {
        MODE_ALTERED.store(altered, Ordering::SeqCst);
    }
}

impl Drop for ExitHook {
    fn drop(&mut self) {
        // SAFETY: removes the handler added in `install()`.
        let _removed = unsafe { SetConsoleCtrlHandler(Some(console_ctrl_handler), FALSE) };
    }
}

/// Put the original console mode back if it is currently altered. Returns `true` if
/// it was restored.
pub fn restore_original_mode() -> bool {
    if !MODE_ALTERED.swap(false, Ordering::SeqCst) {
        return false;
    }
    let Some(original) = ORIGINAL_CONSOLE_MODE.get() else {
        return false;
    };
    // SAFETY: Console API calls with a handle owned by the process.
    unsafe {
        GetStdHandle(STD_INPUT_HANDLE)
            .and_then(|handle| SetConsoleMode(handle, CONSOLE_MODE(*original)))
            .is_ok()
    }
}

/// Runs on a thread the OS creates for the control event. Returning `FALSE` passes the
/// event on to the default handler, which terminates the process.
unsafe extern "system" fn console_ctrl_handler(_ctrl_type: u32) -> BOOL {
    restore_original_mode();
    FALSE
}
