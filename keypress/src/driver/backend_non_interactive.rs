// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Input that is not a terminal (file, pipe, here-doc). There is no mode to switch,
//! so reads simply decode the next bytes until the stream ends.

use crate::{KeyRead, KeypressError, SharedDecoder};
use std::io::{self, ErrorKind, Read};

pub struct NonInteractiveInput {
    reader: Box<dyn Read + Send>,
}

impl std::fmt::Debug for NonInteractiveInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonInteractiveInput").finish_non_exhaustive()
    }
}

impl NonInteractiveInput {
    #[must_use]
    pub fn stdin() -> Self { Self::from_reader(io::stdin()) }

    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// `wait` has no meaning here: a redirected stream is either readable or at EOF.
    ///
    /// # Errors
    ///
    /// [`KeypressError::ReadInput`] if the underlying reader fails.
    pub fn read(&mut self, decoder: &SharedDecoder) -> Result<KeyRead, KeypressError> {
        let reader = &mut self.reader;
        decoder.decode_next(|| read_one_byte(reader.as_mut()))
    }
}

fn read_one_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buffer = [0_u8; 1];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_decodes_until_end_of_stream() {
        let decoder = SharedDecoder::default();
        let mut input = NonInteractiveInput::from_reader(Cursor::new("wé".as_bytes()));

        assert_eq!(input.read(&decoder).unwrap(), KeyRead::Char('w'));
        assert_eq!(input.read(&decoder).unwrap(), KeyRead::Char('é'));
        assert_eq!(input.read(&decoder).unwrap(), KeyRead::EndOfInput);
        assert_eq!(input.read(&decoder).unwrap(), KeyRead::EndOfInput);
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        struct InterruptOnce {
            interrupted: bool,
        }
        impl Read for InterruptOnce {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(ErrorKind::Interrupted));
                }
                buf[0] = b'k';
                Ok(1)
            }
        }

        let decoder = SharedDecoder::default();
        let mut input =
            NonInteractiveInput::from_reader(InterruptOnce { interrupted: false });
        assert_eq!(input.read(&decoder).unwrap(), KeyRead::Char('k'));
    }
}
