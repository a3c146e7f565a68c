// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{driver_flags, ensure, stdin_termios};
use crate::{KeyRead, RawInputDriver, generate_pty_test,
            test_fixtures::{SLAVE_READY, SlaveLines, announce_ready, exit_with_report,
                            settle, wait_for_clean_exit}};
use rustix::termios::SpecialCodeIndex;
use std::io::Write;

generate_pty_test! {
    /// Type `w` into a real terminal: `read_and_reset(true)` returns it and the
    /// terminal ends up back in its original mode.
    test_fn: test_read_and_reset_w_restores_original_mode,
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
    writer.write_all(b"w").expect("Failed to write");
    writer.flush().expect("Failed to flush");

    lines.expect_success();
    wait_for_clean_exit(child);
}

fn pty_slave_entry_point() -> ! { exit_with_report(run_slave()) }

fn run_slave() -> Result<String, String> {
    let before = stdin_termios()?;
    let mut driver = RawInputDriver::new().map_err(|e| format!("new: {e}"))?;
    ensure(driver.is_interactive(), "driver did not detect the PTY")?;

    announce_ready();
    let key = driver.read_and_reset(true).map_err(|e| format!("read: {e}"))?;
    ensure(key == KeyRead::Char('w'), &format!("expected 'w', got {key:?}"))?;
    ensure(!driver.is_mode_altered(), "altered flag still set")?;

    let after = stdin_termios()?;
    ensure(
        driver_flags(&after) == driver_flags(&before),
        &format!(
            "local modes not restored: {:?} != {:?}",
            driver_flags(&after),
            driver_flags(&before)
        ),
    )?;
    for index in [SpecialCodeIndex::VMIN, SpecialCodeIndex::VTIME] {
        ensure(
            after.special_codes[index] == before.special_codes[index],
            &format!("{index:?} not restored"),
        )?;
    }

    Ok("read 'w' and restored the original mode".to_string())
}
