// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mode names, the [`ModeControl`] seam, and the altered-flag bookkeeping shared by
//! both backends.

use super::ExitHook;
use crate::KeypressError;
use std::{fmt::{Display, Formatter},
          io};

/// Set to `true` to log every mode transition at debug level.
pub const DEBUG_KEYPRESS_SHOW_MODE_CHANGES: bool = false;

/// The three modes the driver moves the terminal between. Each backend derives the
/// concrete settings (termios struct or console mode word) from the snapshot it
/// captured at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalMode {
    /// Snapshot captured when the driver was created.
    Original,
    /// No line buffering, no echo, no signal keys.
    Raw,
    /// Canonical processing back on, echo still off. POSIX only: the Windows
    /// console treats this the same as [`TerminalMode::Original`].
    Intermediate,
}

impl TerminalMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TerminalMode::Original => "original",
            TerminalMode::Raw => "raw",
            TerminalMode::Intermediate => "intermediate",
        }
    }
}

impl Display for TerminalMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Which family of terminal APIs the running OS provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// Checks the OS name once; the answer never changes for the life of the process.
    #[must_use]
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            _ => Platform::Posix,
        }
    }
}

/// Applies one of the derived modes to the underlying terminal.
pub trait ModeControl {
    /// # Errors
    ///
    /// Returns the OS error if the terminal rejects the new settings.
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()>;
}

/// Tracks whether the terminal is currently away from its original mode, and mirrors
/// that into the process wide flag read by the [`ExitHook`].
#[derive(Debug, Default)]
pub struct ModeState {
    altered: bool,
    exit_hook: Option<ExitHook>,
}

impl ModeState {
    #[must_use]
    pub fn new(exit_hook: Option<ExitHook>) -> Self {
        Self {
            altered: false,
            exit_hook,
        }
    }

    #[must_use]
    pub fn is_altered(&self) -> bool { self.altered }

    /// Apply `mode` to `device` and record the result.
    ///
    /// The altered flag is raised *before* leaving the original mode and lowered only
    /// *after* it is back, so a signal arriving in between restores too often rather
    /// than too rarely.
    ///
    /// # Errors
    ///
    /// [`KeypressError::SetMode`] if the device rejects the mode. This is fatal.
    pub fn apply<D: ModeControl + ?Sized>(
        &mut self,
        device: &mut D,
        mode: TerminalMode,
    ) -> Result<(), KeypressError> {
        let leaving_original = mode != TerminalMode::Original;
        if leaving_original {
            self.set_altered(true);
        }

        device
            .apply_mode(mode)
            .map_err(|source| KeypressError::SetMode {
                mode: mode.as_str(),
                source,
            })?;

        if !leaving_original {
            self.set_altered(false);
        }

        DEBUG_KEYPRESS_SHOW_MODE_CHANGES.then(|| {
            tracing::debug!(message = "keypress: mode applied", mode = %mode);
        });

        Ok(())
    }

    fn set_altered(&mut self, altered: bool) {
        self.altered = altered;
        if let Some(hook) = &self.exit_hook {
            hook.set_mode_altered(altered);
        }
    }
}
