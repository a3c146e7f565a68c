// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{driver_flags, ensure, stdin_termios};
use crate::{KeyRead, RawInputDriver, generate_pty_test,
            test_fixtures::{SlaveLines, exit_with_report, wait_for_clean_exit}};
use std::time::{Duration, Instant};

/// Far above a zero timeout `poll()`, far below "blocked on read".
const POLL_DEADLINE: Duration = Duration::from_millis(500);

generate_pty_test! {
    /// Nothing is typed: a non-blocking read must come straight back.
    test_fn: test_non_blocking_read_returns_without_input,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

fn pty_master_entry_point(
    pty_pair: portable_pty::PtyPair,
    child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    let lines = SlaveLines::spawn(&pty_pair);
    lines.expect_success();
    wait_for_clean_exit(child);
}

fn pty_slave_entry_point() -> ! { exit_with_report(run_slave()) }

fn run_slave() -> Result<String, String> {
    let before = stdin_termios()?;
    let mut driver = RawInputDriver::new().map_err(|e| format!("new: {e}"))?;

    let start = Instant::now();
    for _ in 0..10 {
        let key = driver.read_and_reset(false).map_err(|e| format!("read: {e}"))?;
        ensure(
            key == KeyRead::NoKeyAvailable,
            &format!("expected no key, got {key:?}"),
        )?;
    }
    let elapsed = start.elapsed();
    ensure(
        elapsed < POLL_DEADLINE,
        &format!("10 polls took {elapsed:?}"),
    )?;

    let after = stdin_termios()?;
    ensure(
        driver_flags(&after) == driver_flags(&before),
        "local modes not restored",
    )?;

    Ok(format!("10 polls in {elapsed:?}"))
}
