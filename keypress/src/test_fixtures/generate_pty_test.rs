// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Generate a test that re-runs itself inside a pseudo terminal.
///
/// The test binary is spawned again as the *slave*, with its stdin/stdout attached to
/// the slave side of a fresh 24x80 PTY. The *master* (the original test process) gets
/// the PTY pair and the child handle, and decides what to type and what to check.
///
/// ```text
/// master (cargo test)                    slave (same binary, env var set)
/// ───────────────────                    ────────────────────────────────
/// open PTY pair
/// spawn self ─────────────────────────▶  SLAVE_STARTING
/// write keys to PTY ──────────────────▶  RawInputDriver::read...()
/// read report lines ◀─────────────────── SUCCESS: ... / FAILED: ...
/// wait for exit ◀─────────────────────── std::process::exit()
/// ```
///
/// - Skipped in CI, where there is no terminal to open.
/// - The slave function must never return (call `std::process::exit`), otherwise the
///   slave would go on to run the master path and recurse.
/// - In a PTY, stdout and stderr are one stream. Slaves report with `println!` and
///   the master filters by content.
#[macro_export]
macro_rules! generate_pty_test {
    (
        $(#[$meta:meta])*
        test_fn: $test_name:ident,
        master: $master_fn:expr,
        slave: $slave_fn:expr
    ) => {
        $(#[$meta])*
        #[test]
        fn $test_name() {
            use std::io::Write;
            use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};

            const PTY_SLAVE_ENV_VAR: &str = "KEYPRESS_PTY_TEST_SLAVE";

            let is_slave = std::env::var(PTY_SLAVE_ENV_VAR).is_ok();

            if !is_slave && is_ci::cached() {
                println!("Skipped in CI (requires a terminal)");
                return;
            }

            if is_slave {
                println!("SLAVE_STARTING");
                std::io::stdout().flush().expect("Failed to flush stdout");
                $slave_fn();
            }

            let pty_pair = NativePtySystem::default()
                .openpty(PtySize {
                    rows: 24,
                    cols: 80,
                    pixel_width: 0,
                    pixel_height: 0,
                })
                .expect("Failed to create PTY pair");

            let test_binary =
                std::env::current_exe().expect("Failed to get current executable");
            let mut cmd = CommandBuilder::new(&test_binary);
            cmd.env(PTY_SLAVE_ENV_VAR, "1");
            cmd.env("RUST_BACKTRACE", "1");
            cmd.args(&["--test-threads", "1", "--nocapture", stringify!($test_name)]);

            let child = pty_pair
                .slave
                .spawn_command(cmd)
                .expect("Failed to spawn slave process");

            $master_fn(pty_pair, child);
        }
    };
}
