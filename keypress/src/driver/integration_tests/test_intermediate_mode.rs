// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{driver_flags, ensure, stdin_termios};
use crate::{KeyRead, RawInputDriver, generate_pty_test,
            test_fixtures::{SLAVE_READY, SlaveLines, announce_ready, exit_with_report,
                            settle, wait_for_clean_exit}};
use rustix::termios::LocalModes;
use std::io::Write;

generate_pty_test! {
    /// After a plain `read()` the terminal is line buffered again but still silent.
    /// Only `reset_console_mode()` brings echo back.
    test_fn: test_pty_read_leaves_intermediate_mode,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

fn pty_master_entry_point(
    pty_pair: portable_pty::PtyPair,
    child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    let lines = SlaveLines::spawn(&pty_pair);
    lines.wait_for(SLAVE_READY);
    settle();

    let mut writer = pty_pair.master.take_writer().expect("Failed to get writer");
    writer.write_all("é".as_bytes()).expect("Failed to write");
    writer.flush().expect("Failed to flush");

    lines.expect_success();
    wait_for_clean_exit(child);
}

fn pty_slave_entry_point() -> ! { exit_with_report(run_slave()) }

fn run_slave() -> Result<String, String> {
    let before = stdin_termios()?;
    let mut driver = RawInputDriver::new().map_err(|e| format!("new: {e}"))?;

    announce_ready();
    let key = driver.read(true).map_err(|e| format!("read: {e}"))?;
    ensure(key == KeyRead::Char('é'), &format!("expected 'é', got {key:?}"))?;
    ensure(driver.is_mode_altered(), "altered flag not set after read")?;

    let between = stdin_termios()?;
    ensure(
        between.local_modes.contains(LocalModes::ICANON),
        "ICANON should be back on between reads",
    )?;
    ensure(
        !between.local_modes.contains(LocalModes::ECHO),
        "ECHO should stay off between reads",
    )?;
    ensure(
        between.local_modes.contains(LocalModes::ISIG),
        "ISIG should be back on between reads",
    )?;

    driver
        .reset_console_mode()
        .map_err(|e| format!("reset: {e}"))?;
    driver
        .reset_console_mode()
        .map_err(|e| format!("second reset: {e}"))?;

    let after = stdin_termios()?;
    ensure(
        driver_flags(&after) == driver_flags(&before),
        "local modes not restored by reset",
    )?;

    Ok("intermediate mode between reads, original after reset".to_string())
}
