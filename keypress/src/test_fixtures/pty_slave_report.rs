// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line protocol between a PTY slave and its master: the slave prints `READY`
//! once it is about to read, then exactly one `SUCCESS: ...` or `FAILED: ...` line.

use std::{io::{BufRead, BufReader, Write},
          sync::mpsc,
          thread,
          time::Duration};

pub const SLAVE_READY: &str = "READY";
pub const SLAVE_SUCCESS: &str = "SUCCESS:";
pub const SLAVE_FAILED: &str = "FAILED:";

const REPORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Slave side: print the verdict and exit the process.
pub fn exit_with_report(result: Result<String, String>) -> ! {
    let code = match result {
        Ok(detail) => {
            println!("{SLAVE_SUCCESS} {detail}");
            0
        }
        Err(detail) => {
            println!("{SLAVE_FAILED} {detail}");
            1
        }
    };
    std::io::stdout().flush().expect("Failed to flush stdout");
    std::process::exit(code);
}

/// Slave side: tell the master it may start typing.
pub fn announce_ready() {
    println!("{SLAVE_READY}");
    std::io::stdout().flush().expect("Failed to flush stdout");
}

/// Master side: a reader thread forwarding slave lines, so every wait can time out.
#[derive(Debug)]
pub struct SlaveLines {
    lines: mpsc::Receiver<String>,
}

impl SlaveLines {
    pub fn spawn(pty_pair: &portable_pty::PtyPair) -> Self {
        let reader = pty_pair
            .master
            .try_clone_reader()
            .expect("Failed to get reader");
        let (sender, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(reader).lines() {
                let Ok(line) = line else { break };
                if sender.send(line.trim().to_string()).is_err() {
                    break;
                }
            }
        });
        Self { lines }
    }

    /// Block until a line containing `marker` shows up.
    pub fn wait_for(&self, marker: &str) {
        loop {
            let line = self
                .lines
                .recv_timeout(REPORT_TIMEOUT)
                .unwrap_or_else(|_| panic!("Timed out waiting for {marker:?}"));
            eprintln!("  ← slave: {line}");
            assert!(!line.contains(SLAVE_FAILED), "Slave failed: {line}");
            if line.contains(marker) {
                return;
            }
        }
    }

    /// Block until the slave's verdict, panicking on `FAILED:`.
    pub fn expect_success(&self) { self.wait_for(SLAVE_SUCCESS); }
}

/// Master side: give the slave a moment to switch modes after `READY`.
pub fn settle() { thread::sleep(Duration::from_millis(100)); }

/// Master side: reap the child, asserting a clean exit.
pub fn wait_for_clean_exit(mut child: Box<dyn portable_pty::Child + Send + Sync>) {
    let status = child.wait().expect("Failed to wait for slave");
    assert!(status.success(), "Slave exited with {status:?}");
}
