// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios getwch kbhit

//! # keypress
//!
//! Read one key at a time from the terminal, without waiting for Enter and without
//! echo, on both POSIX terminals (termios) and the Windows console. The terminal is
//! always handed back in the mode it was found in: after every
//! [`RawInputDriver::read_and_reset`], when the driver is dropped (including on
//! panic), and when the process is killed by a termination signal or console control
//! event.
//!
//! ```no_run
//! use keypress::{KeyRead, RawInputDriver};
//!
//! # fn main() -> miette::Result<()> {
//! let mut driver = RawInputDriver::new()?;
//! // Poll without blocking; a game loop would do this once per tick.
//! if let KeyRead::Char(ch) = driver.read_and_reset(false)? {
//!     println!("pressed {ch:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Two channels for two kinds of outcome
//!
//! | Outcome                                | Channel                             |
//! | :------------------------------------- | :---------------------------------- |
//! | A key was read                         | `Ok(KeyRead::Char(_))`              |
//! | Nothing pending (`wait == false`)      | `Ok(KeyRead::NoKeyAvailable)`       |
//! | Input stream exhausted                 | `Ok(KeyRead::EndOfInput)`           |
//! | Bytes that don't form a character      | `Ok(KeyRead::Invalid)`              |
//! | Mode capture / set, poll, or read fail | `Err(KeypressError)`: stop the app  |
//!
//! ## Module layout
//!
//! - [`key_read`]: the [`KeyRead`] outcome and extended (arrow / function) key codes.
//! - [`decoder`]: bytes to [`char`], bounded at 4 bytes per key.
//! - [`driver`]: [`RawInputDriver`], its backends, and the exit hook.
//! - [`error`]: [`KeypressError`].

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod decoder;
pub mod driver;
pub mod error;
pub mod key_read;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use decoder::*;
pub use driver::*;
pub use error::*;
pub use key_read::*;
