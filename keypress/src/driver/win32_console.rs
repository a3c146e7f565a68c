// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words getwch kbhit

//! Windows console device: console mode flags via the Console API, and key reads via
//! the CRT's `_kbhit()` / `_getwch()`, which read one key without echo regardless of
//! the line input flag.

use super::{ModeControl, TerminalMode, WinConsole};
use crate::KeypressError;
use std::io;
use windows::Win32::{Foundation::HANDLE,
                     System::Console::{CONSOLE_MODE, ENABLE_ECHO_INPUT,
                                       ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT,
                                       GetConsoleMode, GetStdHandle, STD_INPUT_HANDLE,
                                       SetConsoleMode}};

unsafe extern "C" {
    fn _kbhit() -> i32;
    fn _getwch() -> u16;
}

/// Flags cleared for raw mode. Clearing `ENABLE_PROCESSED_INPUT` is what lets Ctrl+C
/// arrive as a key instead of a control event.
const RAW_MODE_CLEARED: CONSOLE_MODE = CONSOLE_MODE(
    ENABLE_PROCESSED_INPUT.0 | ENABLE_LINE_INPUT.0 | ENABLE_ECHO_INPUT.0,
);

#[derive(Debug)]
pub struct Win32Console {
    handle: HANDLE,
    original: CONSOLE_MODE,
    raw: CONSOLE_MODE,
}

impl Win32Console {
    /// Capture the current console input mode.
    ///
    /// # Errors
    ///
    /// [`KeypressError::CaptureMode`] if the handle or mode can't be queried.
    pub fn open() -> Result<Self, KeypressError> {
        let capture_error = |e: windows::core::Error| {
            KeypressError::CaptureMode(io::Error::other(e))
        };

        // SAFETY: `GetStdHandle` has no preconditions; the mode is written into a
        // local that outlives the call.
        let (handle, original) = unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE).map_err(capture_error)?;
            let mut mode = CONSOLE_MODE::default();
            GetConsoleMode(handle, &raw mut mode).map_err(capture_error)?;
            (handle, mode)
        };

        Ok(Self {
            handle,
            original,
            raw: CONSOLE_MODE(original.0 & !RAW_MODE_CLEARED.0),
        })
    }

    #[must_use]
    pub fn original_mode(&self) -> u32 { self.original.0 }
}

impl ModeControl for Win32Console {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        let settings = match mode {
            TerminalMode::Raw => self.raw,
            TerminalMode::Original | TerminalMode::Intermediate => self.original,
        };
        // SAFETY: `handle` was returned by `GetStdHandle` and is owned by the process.
        unsafe { SetConsoleMode(self.handle, settings) }.map_err(io::Error::other)
    }
}

impl WinConsole for Win32Console {
    fn key_pending(&mut self) -> bool {
        // SAFETY: CRT console function with no arguments.
        unsafe { _kbhit() != 0 }
    }

    fn read_wide(&mut self) -> u16 {
        // SAFETY: CRT console function with no arguments.
        unsafe { _getwch() }
    }
}

/// Open stdin as an interactive Windows backend.
pub(super) fn open_windows_backend()
-> Result<(super::Backend, Option<super::ExitHook>), KeypressError> {
    let console = Win32Console::open()?;
    let exit_hook = super::ExitHook::install(console.original_mode())?;
    Ok((
        super::Backend::Windows(super::WindowsBackend::new(Box::new(console))),
        Some(exit_hook),
    ))
}
