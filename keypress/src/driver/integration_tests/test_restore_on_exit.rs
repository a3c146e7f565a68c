// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGTERM

use super::{driver_flags, ensure, stdin_termios};
use crate::{RawInputDriver, generate_pty_test,
            test_fixtures::{SlaveLines, exit_with_report, wait_for_clean_exit}};

generate_pty_test! {
    /// A panic that unwinds through the driver still restores the terminal.
    test_fn: test_panic_restores_original_mode,
    master: pty_master_expects_success,
    slave: panic_slave_entry_point
}

fn pty_master_expects_success(
    pty_pair: portable_pty::PtyPair,
    child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    let lines = SlaveLines::spawn(&pty_pair);
    lines.expect_success();
    wait_for_clean_exit(child);
}

fn panic_slave_entry_point() -> ! { exit_with_report(run_panic_slave()) }

fn run_panic_slave() -> Result<String, String> {
    let before = stdin_termios()?;

    let outcome = std::panic::catch_unwind(|| {
        let mut driver = RawInputDriver::new().expect("Failed to create driver");
        // Nothing typed: leaves the terminal in intermediate mode.
        driver.read(false).expect("Failed to poll");
        assert!(driver.is_mode_altered());
        panic!("unwinding with the terminal altered");
    });
    ensure(outcome.is_err(), "closure was expected to panic")?;

    let after = stdin_termios()?;
    ensure(
        driver_flags(&after) == driver_flags(&before),
        "local modes not restored after unwinding",
    )?;

    Ok("restored on unwind".to_string())
}

#[cfg(target_os = "linux")]
mod on_signal {
    use super::super::ensure;
    use crate::{RawInputDriver, generate_pty_test,
                test_fixtures::{SLAVE_READY, SlaveLines, announce_ready}};
    use rustix::termios::{self, LocalModes};
    use signal_hook::{consts::SIGTERM, low_level};
    use std::os::fd::BorrowedFd;

    generate_pty_test! {
        /// `SIGTERM` skips destructors: the exit hook has to restore the terminal.
        /// The master checks the slave's settings through its own end of the PTY once
        /// the slave is gone.
        test_fn: test_sigterm_restores_original_mode,
        master: pty_master_entry_point,
        slave: pty_slave_entry_point
    }

    fn pty_master_entry_point(
        pty_pair: portable_pty::PtyPair,
        mut child: Box<dyn portable_pty::Child + Send + Sync>,
    ) {
        let lines = SlaveLines::spawn(&pty_pair);
        lines.wait_for(SLAVE_READY);

        let status = child.wait().expect("Failed to wait for slave");
        assert!(!status.success(), "slave should have been killed by SIGTERM");

        let master_fd = pty_pair
            .master
            .as_raw_fd()
            .expect("PTY master has no fd");
        // SAFETY: `pty_pair` owns the fd and outlives this borrow.
        let master_fd = unsafe { BorrowedFd::borrow_raw(master_fd) };
        let settings = termios::tcgetattr(master_fd).expect("Failed to read termios");

        assert!(
            settings.local_modes.contains(LocalModes::ECHO),
            "ECHO still off after SIGTERM"
        );
        assert!(
            settings.local_modes.contains(LocalModes::ICANON),
            "ICANON still off after SIGTERM"
        );
    }

    fn pty_slave_entry_point() -> ! {
        let result = (|| {
            let mut driver = RawInputDriver::new().map_err(|e| format!("new: {e}"))?;
            driver.read(false).map_err(|e| format!("read: {e}"))?;
            ensure(driver.is_mode_altered(), "altered flag not set")?;
            announce_ready();
            low_level::raise(SIGTERM).map_err(|e| format!("raise: {e}"))?;
            Err::<(), String>("still alive after SIGTERM".to_string())
        })();
        if let Err(detail) = result {
            println!("FAILED: {detail}");
        }
        std::process::exit(1);
    }
}
