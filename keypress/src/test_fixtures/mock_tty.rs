// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ModeControl, PosixTty, TerminalMode};
use std::{cell::RefCell, collections::VecDeque, io, rc::Rc};

/// Everything a [`MockTty`] was asked to do, readable after the tty has been moved
/// into a backend.
#[derive(Debug, Default)]
pub struct TtyCallLog {
    pub applied: Vec<TerminalMode>,
    pub polls: usize,
    pub reads: usize,
}

/// In-memory [`PosixTty`] with staged input bytes.
#[derive(Debug)]
pub struct MockTty {
    input: VecDeque<u8>,
    log: Rc<RefCell<TtyCallLog>>,
    fail_read: bool,
    reject_mode: Option<TerminalMode>,
}

impl MockTty {
    pub fn new(input: &[u8]) -> (Self, Rc<RefCell<TtyCallLog>>) {
        let log = Rc::new(RefCell::new(TtyCallLog::default()));
        let it = Self {
            input: input.iter().copied().collect(),
            log: log.clone(),
            fail_read: false,
            reject_mode: None,
        };
        (it, log)
    }

    #[must_use]
    pub fn with_failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    #[must_use]
    pub fn with_rejected_mode(mut self, mode: TerminalMode) -> Self {
        self.reject_mode = Some(mode);
        self
    }
}

impl ModeControl for MockTty {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        if self.reject_mode == Some(mode) {
            return Err(io::Error::from_raw_os_error(25)); // ENOTTY
        }
        self.log.borrow_mut().applied.push(mode);
        Ok(())
    }
}

impl PosixTty for MockTty {
    fn has_pending_input(&mut self) -> io::Result<bool> {
        self.log.borrow_mut().polls += 1;
        Ok(!self.input.is_empty())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.log.borrow_mut().reads += 1;
        if self.fail_read {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        Ok(self.input.pop_front())
    }
}
