// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fatal driver errors.
//!
//! Every variant here means the driver can no longer guarantee that the terminal will
//! be restored, so callers are expected to propagate it and exit. Per-read outcomes
//! that are *not* errors (no key, end of input, undecodable bytes) are reported as
//! [`crate::KeyRead`] values instead.

use crate::Platform;
use miette::Diagnostic;
use std::io;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum KeypressError {
    /// The baseline mode could not be read, so it could never be restored.
    #[error("Failed to capture the original terminal mode")]
    #[diagnostic(
        code(keypress::init::capture_mode),
        help("Is stdin attached to a terminal that supports termios / console modes?")
    )]
    CaptureMode(#[source] io::Error),

    #[error("Failed to set the terminal to {mode} mode")]
    #[diagnostic(
        code(keypress::mode::set),
        help("The terminal may be left in an unusable state, try running `stty sane`")
    )]
    SetMode {
        mode: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to check the terminal for pending input")]
    #[diagnostic(code(keypress::read::poll))]
    PollInput(#[source] io::Error),

    #[error("Failed to read from the terminal")]
    #[diagnostic(code(keypress::read::input))]
    ReadInput(#[source] io::Error),

    #[error("Failed to register the terminal restore hook")]
    #[diagnostic(
        code(keypress::init::exit_hook),
        help("Signal or console control handler registration was refused by the OS")
    )]
    ExitHook(#[source] io::Error),

    #[error("No terminal backend for {0:?} in this build")]
    #[diagnostic(code(keypress::init::unsupported_platform))]
    UnsupportedPlatform(Platform),

    #[error("Character decoder lock poisoned")]
    #[diagnostic(code(keypress::decoder::poisoned))]
    DecoderPoisoned,
}
