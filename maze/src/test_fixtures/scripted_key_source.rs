// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::KeySource;
use keypress::{KeyRead, KeypressError};
use std::{collections::VecDeque, io};

/// Replays a fixed list of reads. Once the script runs out it reports
/// [`KeyRead::EndOfInput`], or a fatal read error if built with
/// [`Self::failing_after_script`].
#[derive(Debug)]
pub struct ScriptedKeySource {
    script: VecDeque<KeyRead>,
    fail_when_done: bool,
    waits: Vec<bool>,
}

impl ScriptedKeySource {
    pub fn new(script: Vec<KeyRead>) -> Self {
        Self {
            script: script.into(),
            fail_when_done: false,
            waits: vec![],
        }
    }

    #[must_use]
    pub fn failing_after_script(mut self) -> Self {
        self.fail_when_done = true;
        self
    }

    /// The `wait` argument of every call, in order.
    pub fn waits(&self) -> &[bool] { &self.waits }

    pub fn all_reads_were_blocking(&self) -> bool { self.waits.iter().all(|it| *it) }
}

impl KeySource for ScriptedKeySource {
    fn next_key(&mut self, wait: bool) -> Result<KeyRead, KeypressError> {
        self.waits.push(wait);
        match self.script.pop_front() {
            Some(it) => Ok(it),
            None if self.fail_when_done => Err(KeypressError::ReadInput(io::Error::from(
                io::ErrorKind::BrokenPipe,
            ))),
            None => Ok(KeyRead::EndOfInput),
        }
    }
}
