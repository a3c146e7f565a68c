// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The outcome of a single key read.
//!
//! A read either produces a character or one of three sentinels. The sentinels are
//! enum variants, so they can never collide with a valid [`char`] value the way a
//! reserved integer code could.
//!
//! ## Extended keys
//!
//! The Windows console reports function and arrow keys as a two-step sequence: a
//! prefix (`0` or `0xE0`) followed by a scan code. These are folded into the Unicode
//! private use area starting at [`EXTENDED_KEY_BASE`], so an arrow key is still a
//! plain [`KeyRead::Char`] to the caller:
//!
//! ```text
//! Scan code   Key          Folded char
//! ─────────   ──────────   ───────────
//! 72          Arrow up     U+E048
//! 80          Arrow down   U+E050
//! 75          Arrow left   U+E04B
//! 77          Arrow right  U+E04D
//! ```

use std::fmt::{Display, Formatter, Result};

/// First code point of the private range used for extended (function / arrow) keys.
pub const EXTENDED_KEY_BASE: u32 = 0xE000;

/// Largest scan code that can be folded into the extended key range. `0xE000 +
/// 0x18FF = 0xF8FF` is the last code point of the private use area.
pub const EXTENDED_KEY_MAX_OFFSET: u16 = 0x18FF;

pub const ARROW_UP: char = '\u{E048}';
pub const ARROW_DOWN: char = '\u{E050}';
pub const ARROW_LEFT: char = '\u{E04B}';
pub const ARROW_RIGHT: char = '\u{E04D}';

/// Result of one call to [`crate::RawInputDriver::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRead {
    /// A decoded character (including folded extended keys).
    Char(char),
    /// Only returned when polling (`wait == false`) and nothing is staged.
    NoKeyAvailable,
    /// The input stream is exhausted. Callers usually treat this like a quit key.
    EndOfInput,
    /// The bytes (or wide chars) read did not form a valid key.
    Invalid,
}

impl Display for KeyRead {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            KeyRead::Char(ch) if ch.is_control() => {
                write!(f, "U+{:04X}", u32::from(*ch))
            }
            KeyRead::Char(ch) => write!(f, "{ch}"),
            KeyRead::NoKeyAvailable => f.write_str("<no key>"),
            KeyRead::EndOfInput => f.write_str("<end of input>"),
            KeyRead::Invalid => f.write_str("<invalid key>"),
        }
    }
}

/// Fold the scan code that follows an extended key prefix into the private range.
///
/// Returns [`KeyRead::Invalid`] if `code` is larger than [`EXTENDED_KEY_MAX_OFFSET`].
#[must_use]
pub fn extended_key(code: u16) -> KeyRead {
    if code > EXTENDED_KEY_MAX_OFFSET {
        return KeyRead::Invalid;
    }
    char::from_u32(EXTENDED_KEY_BASE + u32::from(code))
        .map_or(KeyRead::Invalid, KeyRead::Char)
}
