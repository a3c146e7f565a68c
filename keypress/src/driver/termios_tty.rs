// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcgetattr tcsetattr ICANON ECHONL ISIG VMIN VTIME EINTR

//! Unix/Linux/macOS terminal device using rustix's safe termios API.
//!
//! The original settings are captured once with `tcgetattr()`. The raw and
//! intermediate settings are derived from that snapshot up front, so switching modes
//! later is a single `tcsetattr()` with no read-modify-write.
//!
//! | Flag       | Original | Raw   | Intermediate |
//! | :--------- | :------- | :---- | :----------- |
//! | `ICANON`   | as is    | off   | as is        |
//! | `ECHO`     | as is    | off   | off          |
//! | `ECHONL`   | as is    | off   | off          |
//! | `ISIG`     | as is    | off   | as is        |
//! | `VMIN`     | as is    | 1     | as is        |
//! | `VTIME`    | as is    | 0     | as is        |
//!
//! Unlike `cfmakeraw()`, output processing (`OPOST`) is left alone so the caller can
//! keep printing `\n` terminated lines while a read is in flight.

use super::{ModeControl, PosixTty, TerminalMode};
use crate::KeypressError;
use rustix::{event::{PollFd, PollFlags, Timespec, poll},
             io::Errno,
             termios::{self, LocalModes, OptionalActions, SpecialCodeIndex, Termios}};
use std::io;

/// Zero timeout turns `poll()` into a readiness check.
const NO_WAIT: Timespec = Timespec {
    tv_sec: 0,
    tv_nsec: 0,
};

/// stdin attached to a terminal, with the three mode snapshots.
#[derive(Debug)]
pub struct TermiosTty {
    stdin: io::Stdin,
    original: Termios,
    raw: Termios,
    intermediate: Termios,
}

impl TermiosTty {
    /// Capture the current settings of stdin.
    ///
    /// # Errors
    ///
    /// [`KeypressError::CaptureMode`] if `tcgetattr()` fails, which is fatal: without
    /// the snapshot the terminal could never be restored.
    pub fn open() -> Result<Self, KeypressError> {
        let stdin = io::stdin();
        let original = termios::tcgetattr(&stdin)
            .map_err(|e| KeypressError::CaptureMode(e.into()))?;

        Ok(Self {
            raw: derive_raw_mode(&original),
            intermediate: derive_intermediate_mode(&original),
            original,
            stdin,
        })
    }

    #[must_use]
    pub fn original(&self) -> &Termios { &self.original }
}

#[must_use]
pub fn derive_raw_mode(original: &Termios) -> Termios {
    let mut it = original.clone();
    it.local_modes.remove(
        LocalModes::ICANON | LocalModes::ECHO | LocalModes::ECHONL | LocalModes::ISIG,
    );
    // Return from read() as soon as one byte is available.
    it.special_codes[SpecialCodeIndex::VMIN] = 1;
    it.special_codes[SpecialCodeIndex::VTIME] = 0;
    it
}

#[must_use]
pub fn derive_intermediate_mode(original: &Termios) -> Termios {
    let mut it = original.clone();
    it.local_modes.remove(LocalModes::ECHO | LocalModes::ECHONL);
    it
}

impl ModeControl for TermiosTty {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        let settings = match mode {
            TerminalMode::Original => &self.original,
            TerminalMode::Raw => &self.raw,
            TerminalMode::Intermediate => &self.intermediate,
        };
        termios::tcsetattr(&self.stdin, OptionalActions::Now, settings)?;
        Ok(())
    }
}

impl PosixTty for TermiosTty {
    fn has_pending_input(&mut self) -> io::Result<bool> {
        let mut fds = [PollFd::new(&self.stdin, PollFlags::IN)];
        loop {
            match poll(&mut fds, Some(&NO_WAIT)) {
                Ok(0) => return Ok(false),
                // A hang up is "readable" too: the next read reports end of input.
                Ok(_) => {
                    return Ok(fds[0]
                        .revents()
                        .intersects(PollFlags::IN | PollFlags::HUP | PollFlags::ERR));
                }
                Err(Errno::INTR) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        // Unbuffered on purpose: bytes parked in `Stdin`'s internal buffer would be
        // invisible to `poll()`.
        let mut buffer = [0_u8; 1];
        loop {
            match rustix::io::read(&self.stdin, &mut buffer[..]) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buffer[0])),
                Err(Errno::INTR) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Open stdin as an interactive POSIX backend.
pub(super) fn open_posix_backend()
-> Result<(super::Backend, Option<super::ExitHook>), KeypressError> {
    let tty = TermiosTty::open()?;
    let exit_hook = super::ExitHook::install(tty.original())?;
    Ok((
        super::Backend::Posix(super::PosixBackend::new(Box::new(tty))),
        Some(exit_hook),
    ))
}
