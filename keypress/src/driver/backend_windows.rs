// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words getwch kbhit

//! Windows read path: console mode flags plus wide character reads.
//!
//! The console hands out UTF-16 code units, not bytes, so there is no decoder here.
//! Function and arrow keys arrive as a prefix unit (`0` or `0xE0`) followed by a scan
//! code, which is folded into the private use area by [`extended_key`]:
//!
//! ```text
//! first unit      second unit        result
//! ──────────      ───────────        ──────────────────────────
//! 0 / 0xE0        0..=0x18FF         Char(0xE000 + second)
//! 0 / 0xE0        > 0x18FF           Invalid
//! 0xFFFF (WEOF)   -                  EndOfInput
//! surrogate       -                  Invalid
//! other           -                  Char(unit)
//! ```
//!
//! This module only depends on the [`WinConsole`] trait, so the combination logic is
//! exercised on every platform with a scripted console. The real console lives in
//! `win32_console` and only builds on Windows.

use super::{ModeControl, ModeState, TerminalMode};
use crate::{KeyRead, KeypressError, extended_key};
use std::io;

/// `_getwch()` prefix for function keys.
pub const FUNCTION_KEY_PREFIX: u16 = 0x0000;
/// `_getwch()` prefix for arrow / navigation keys.
pub const ARROW_KEY_PREFIX: u16 = 0x00E0;
/// `_getwch()` returns `WEOF` when the console has no more input.
pub const WIDE_EOF: u16 = 0xFFFF;

/// The console operations the Windows read path needs.
pub trait WinConsole: ModeControl {
    /// Is a key waiting? Must not block.
    fn key_pending(&mut self) -> bool;

    /// Blocking read of one UTF-16 code unit, without echo.
    fn read_wide(&mut self) -> u16;
}

pub struct WindowsBackend {
    console: Box<dyn WinConsole>,
}

impl std::fmt::Debug for WindowsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsBackend").finish_non_exhaustive()
    }
}

impl WindowsBackend {
    #[must_use]
    pub fn new(console: Box<dyn WinConsole>) -> Self { Self { console } }

    /// Unlike the POSIX path the console stays raw after the read, until the caller
    /// resets it.
    ///
    /// # Errors
    ///
    /// [`KeypressError::SetMode`] if the console rejects raw mode.
    pub fn read(
        &mut self,
        wait: bool,
        mode_state: &mut ModeState,
    ) -> Result<KeyRead, KeypressError> {
        mode_state.apply(self.console.as_mut(), TerminalMode::Raw)?;

        if !wait && !self.console.key_pending() {
            return Ok(KeyRead::NoKeyAvailable);
        }

        Ok(match self.console.read_wide() {
            FUNCTION_KEY_PREFIX | ARROW_KEY_PREFIX => {
                let code = self.console.read_wide();
                let key = extended_key(code);
                tracing::debug!(message = "keypress: extended key", code, key = %key);
                key
            }
            WIDE_EOF => KeyRead::EndOfInput,
            unit => {
                char::from_u32(u32::from(unit)).map_or(KeyRead::Invalid, KeyRead::Char)
            }
        })
    }
}

impl ModeControl for WindowsBackend {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        self.console.apply_mode(mode)
    }
}
