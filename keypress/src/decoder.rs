// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words multibyte

//! Byte-to-character decoding for the byte oriented input paths (POSIX terminal and
//! redirected stdin).
//!
//! Bytes are pulled one at a time into a fixed [`MAX_ENCODED_CHAR_LEN`] byte buffer.
//! After each byte the accumulated prefix is decoded as UTF-8 (the default text
//! encoding of the terminals this crate targets):
//!
//! ```text
//! bytes so far        outcome
//! ─────────────────   ─────────────────────────────────────────
//! (EOF, 0 bytes)      KeyRead::EndOfInput
//! complete scalar     KeyRead::Char(ch)               → return
//! incomplete prefix   keep reading
//! malformed prefix    keep reading (until the buffer is full)
//! 4 bytes, no scalar  KeyRead::Invalid                → return
//! (EOF, 1..=3 bytes)  KeyRead::Invalid
//! ```
//!
//! ## Buffer size is an encoding limit
//!
//! No UTF-8 encoded scalar value is longer than 4 bytes, so [`MAX_ENCODED_CHAR_LEN`]
//! bounds every read: a key never consumes more than 4 bytes, and a stream of garbage
//! can't turn a single read into an unbounded loop. Supporting an encoding with longer
//! units would require raising this constant.
//!
//! The bound applies to good bytes too. Once a prefix is malformed, the bytes after
//! it are pulled into the same buffer, so a single stray byte can take up to 3 real
//! keystrokes with it into the [`KeyRead::Invalid`] result:
//!
//! ```text
//! input: FF 'w' 'a' 's' 'd'
//!        └──── Invalid ──┘  'd'
//! ```
//!
//! ## Exclusive access
//!
//! The decoder keeps its buffer between the individual byte pulls of one decode, so
//! two interleaved decodes would corrupt each other. [`SharedDecoder`] wraps it in a
//! [`Mutex`] that is held for exactly one decode.

use crate::{KeyRead, KeypressError};
use std::{io,
          sync::{Arc, Mutex}};

/// Longest byte sequence a single key may occupy.
pub const MAX_ENCODED_CHAR_LEN: usize = 4;

#[derive(Debug, Default)]
pub struct CharDecoder {
    buffer: [u8; MAX_ENCODED_CHAR_LEN],
    len: usize,
}

impl CharDecoder {
    /// Decode the next key from `next_byte`, which returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Only I/O errors from `next_byte` are returned. Malformed input is reported as
    /// [`KeyRead::Invalid`].
    pub fn decode_next<F>(&mut self, mut next_byte: F) -> io::Result<KeyRead>
    where
        F: FnMut() -> io::Result<Option<u8>>,
    {
        self.len = 0;

        while self.len < MAX_ENCODED_CHAR_LEN {
            let Some(byte) = next_byte()? else {
                return Ok(if self.len == 0 {
                    KeyRead::EndOfInput
                } else {
                    KeyRead::Invalid
                });
            };

            self.buffer[self.len] = byte;
            self.len += 1;

            if let Some(ch) = self.decode_buffered() {
                return Ok(KeyRead::Char(ch));
            }
        }

        // Overflow.
        Ok(KeyRead::Invalid)
    }

    /// Number of bytes consumed by the last call to [`Self::decode_next`].
    #[must_use]
    pub fn bytes_consumed(&self) -> usize { self.len }

    fn decode_buffered(&self) -> Option<char> {
        let text = std::str::from_utf8(&self.buffer[..self.len]).ok()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

/// Process wide handle to one [`CharDecoder`]. Cloning shares the same decoder.
#[derive(Debug, Clone, Default)]
pub struct SharedDecoder {
    inner: Arc<Mutex<CharDecoder>>,
}

impl SharedDecoder {
    /// Run one decode while holding the decoder lock.
    ///
    /// # Errors
    ///
    /// - [`KeypressError::DecoderPoisoned`] if a previous decode panicked.
    /// - [`KeypressError::ReadInput`] if `next_byte` fails.
    pub fn decode_next<F>(&self, next_byte: F) -> Result<KeyRead, KeypressError>
    where
        F: FnMut() -> io::Result<Option<u8>>,
    {
        let mut decoder = self
            .inner
            .lock()
            .map_err(|_| KeypressError::DecoderPoisoned)?;
        decoder.decode_next(next_byte).map_err(KeypressError::ReadInput)
    }
}
