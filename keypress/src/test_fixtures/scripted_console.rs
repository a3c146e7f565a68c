// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ModeControl, TerminalMode, WIDE_EOF, WinConsole};
use std::{cell::RefCell, collections::VecDeque, io, rc::Rc};

#[derive(Debug, Default)]
pub struct ConsoleCallLog {
    pub applied: Vec<TerminalMode>,
    pub reads: usize,
}

/// [`WinConsole`] that replays a fixed list of UTF-16 units, then `WEOF`.
#[derive(Debug)]
pub struct ScriptedConsole {
    units: VecDeque<u16>,
    log: Rc<RefCell<ConsoleCallLog>>,
}

impl ScriptedConsole {
    pub fn new(units: &[u16]) -> (Self, Rc<RefCell<ConsoleCallLog>>) {
        let log = Rc::new(RefCell::new(ConsoleCallLog::default()));
        let it = Self {
            units: units.iter().copied().collect(),
            log: log.clone(),
        };
        (it, log)
    }
}

impl ModeControl for ScriptedConsole {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        self.log.borrow_mut().applied.push(mode);
        Ok(())
    }
}

impl WinConsole for ScriptedConsole {
    fn key_pending(&mut self) -> bool { !self.units.is_empty() }

    fn read_wide(&mut self) -> u16 {
        self.log.borrow_mut().reads += 1;
        self.units.pop_front().unwrap_or(WIDE_EOF)
    }
}
