// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! POSIX read path: a scoped trip into raw mode for every read.
//!
//! ```text
//! read(wait)
//!   │
//!   ├─▶ apply Raw ──────────────────────────────┐
//!   │                                           │
//!   ├─▶ wait == false && nothing pending?       │ scoped: the
//!   │     └─ yes → NoKeyAvailable               │ Intermediate
//!   │                                           │ restore runs on
//!   ├─▶ decode bytes (blocking, ≤ 4 bytes)      │ every exit path
//!   │                                           │
//!   └─▶ apply Intermediate ◀────────────────────┘
//! ```
//!
//! The terminal is fully raw only for the duration of one read. Between reads it sits
//! in intermediate mode, so keys typed while the caller is busy are still not echoed,
//! and if the process dies between reads it leaves behind a line-buffered terminal.

use super::{ModeControl, ModeState, TerminalMode};
use crate::{KeyRead, KeypressError, SharedDecoder};
use std::io;

/// The terminal device operations the POSIX read path needs.
pub trait PosixTty: ModeControl {
    /// Is at least one byte readable right now? Must not block.
    ///
    /// # Errors
    ///
    /// Returns the OS error from the readiness check.
    fn has_pending_input(&mut self) -> io::Result<bool>;

    /// Blocking read of one byte, `Ok(None)` at end of file.
    ///
    /// # Errors
    ///
    /// Returns the OS error from the read.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

pub struct PosixBackend {
    tty: Box<dyn PosixTty>,
}

impl std::fmt::Debug for PosixBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosixBackend").finish_non_exhaustive()
    }
}

impl PosixBackend {
    #[must_use]
    pub fn new(tty: Box<dyn PosixTty>) -> Self { Self { tty } }

    /// # Errors
    ///
    /// Mode, poll, and read failures are fatal. Undecodable input is not an error.
    pub fn read(
        &mut self,
        wait: bool,
        decoder: &SharedDecoder,
        mode_state: &mut ModeState,
    ) -> Result<KeyRead, KeypressError> {
        mode_state.apply(self.tty.as_mut(), TerminalMode::Raw)?;

        let read_result = self.read_in_raw_mode(wait, decoder);

        // Leave raw mode even if the read failed.
        let restore_result = mode_state.apply(self.tty.as_mut(), TerminalMode::Intermediate);

        let key = read_result?;
        restore_result?;
        Ok(key)
    }

    fn read_in_raw_mode(
        &mut self,
        wait: bool,
        decoder: &SharedDecoder,
    ) -> Result<KeyRead, KeypressError> {
        if !wait
            && !self
                .tty
                .has_pending_input()
                .map_err(KeypressError::PollInput)?
        {
            return Ok(KeyRead::NoKeyAvailable);
        }

        let tty = &mut self.tty;
        decoder.decode_next(|| tty.read_byte())
    }
}

impl ModeControl for PosixBackend {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> { self.tty.apply_mode(mode) }
}
