// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`RawInputDriver`] context object and the [`Backend`] it dispatches to.

use super::{ExitHook, ModeControl, ModeState, NonInteractiveInput, Platform,
            PosixBackend, TerminalMode, WindowsBackend};
use crate::{KeyRead, KeypressError, SharedDecoder};
use std::io::{self, IsTerminal as _};

/// A backend together with the exit hook protecting it (if it can alter modes).
pub type OpenedBackend = (Backend, Option<ExitHook>);

/// The input source selected at init. Only the variant in use holds platform state.
#[derive(Debug)]
pub enum Backend {
    /// stdin is a file or pipe: decode bytes, never switch modes.
    NonInteractive(NonInteractiveInput),
    Posix(PosixBackend),
    Windows(WindowsBackend),
}

impl Backend {
    #[must_use]
    pub fn is_interactive(&self) -> bool { !matches!(self, Backend::NonInteractive(_)) }
}

impl ModeControl for Backend {
    fn apply_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        match self {
            Backend::NonInteractive(_) => Ok(()),
            Backend::Posix(it) => it.apply_mode(mode),
            Backend::Windows(it) => it.apply_mode(mode),
        }
    }
}

/// Reads one key at a time from stdin, owning every piece of terminal state needed to
/// put the terminal back afterwards.
///
/// Create one per process, up front, and pass it by `&mut` to whatever reads keys.
/// See the [module docs](super) for the mode lifecycle.
///
/// ```no_run
/// use keypress::{KeyRead, RawInputDriver};
///
/// # fn main() -> miette::Result<()> {
/// let mut driver = RawInputDriver::new()?;
/// loop {
///     match driver.read_and_reset(true)? {
///         KeyRead::Char('q') | KeyRead::EndOfInput => break,
///         KeyRead::Char(ch) => println!("got {ch:?}"),
///         KeyRead::NoKeyAvailable | KeyRead::Invalid => {}
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RawInputDriver {
    platform: Platform,
    backend: Backend,
    decoder: SharedDecoder,
    mode_state: ModeState,
}

impl RawInputDriver {
    /// Detect the platform and whether stdin is a terminal, then pick the backend. For
    /// a terminal this captures the original mode and installs the [`ExitHook`].
    ///
    /// # Errors
    ///
    /// Any failure to capture the original mode or install the hook. The caller must
    /// not continue without a driver, since the terminal could not be restored.
    pub fn new() -> Result<Self, KeypressError> {
        let platform = Platform::detect();
        let interactive = io::stdin().is_terminal();

        let (backend, exit_hook) =
            select_backend(interactive, || open_interactive_backend(platform))?;

        tracing::debug!(
            message = "keypress: driver initialized",
            ?platform,
            interactive
        );

        Ok(Self {
            platform,
            backend,
            decoder: SharedDecoder::default(),
            mode_state: ModeState::new(exit_hook),
        })
    }

    /// Use the given backend with no exit hook. For tests and for callers that supply
    /// their own input source.
    #[must_use]
    pub fn with_backend(backend: Backend) -> Self {
        let platform = match backend {
            Backend::Posix(_) => Platform::Posix,
            Backend::Windows(_) => Platform::Windows,
            Backend::NonInteractive(_) => Platform::detect(),
        };
        Self {
            platform,
            backend,
            decoder: SharedDecoder::default(),
            mode_state: ModeState::default(),
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform { self.platform }

    #[must_use]
    pub fn is_interactive(&self) -> bool { self.backend.is_interactive() }

    /// Is the terminal currently away from its original mode?
    #[must_use]
    pub fn is_mode_altered(&self) -> bool { self.mode_state.is_altered() }

    /// Read one key.
    ///
    /// When `wait` is `false` and nothing is pending this returns
    /// [`KeyRead::NoKeyAvailable`] without issuing a blocking call. When `wait` is
    /// `true` it blocks until a key (or end of input) arrives; there is no timeout.
    ///
    /// The terminal may be left in a non-original mode afterwards (intermediate on
    /// POSIX, raw on Windows). Use [`Self::read_and_reset`] unless you are about to
    /// read again right away.
    ///
    /// # Errors
    ///
    /// Mode and I/O failures, all fatal. Undecodable input is [`KeyRead::Invalid`].
    pub fn read(&mut self, wait: bool) -> Result<KeyRead, KeypressError> {
        match &mut self.backend {
            Backend::NonInteractive(input) => input.read(&self.decoder),
            Backend::Posix(posix) => posix.read(wait, &self.decoder, &mut self.mode_state),
            Backend::Windows(windows) => windows.read(wait, &mut self.mode_state),
        }
    }

    /// Put the original mode back. Does nothing if the mode isn't altered, so calling
    /// it any number of times is the same as calling it once.
    ///
    /// # Errors
    ///
    /// [`KeypressError::SetMode`] if the terminal rejects the original settings.
    pub fn reset_console_mode(&mut self) -> Result<(), KeypressError> {
        if !self.mode_state.is_altered() {
            return Ok(());
        }
        self.mode_state.apply(&mut self.backend, TerminalMode::Original)
    }

    /// [`Self::read`] followed by [`Self::reset_console_mode`], which runs even if the
    /// read failed. This is the entry point for game loops and other interactive
    /// callers: the terminal is never left altered between calls.
    ///
    /// # Errors
    ///
    /// The read error if there was one, otherwise the reset error.
    pub fn read_and_reset(&mut self, wait: bool) -> Result<KeyRead, KeypressError> {
        let read_result = self.read(wait);
        let reset_result = self.reset_console_mode();
        let key = read_result?;
        reset_result?;
        Ok(key)
    }
}

impl Drop for RawInputDriver {
    fn drop(&mut self) {
        if let Err(error) = self.reset_console_mode() {
            tracing::error!(
                message = "keypress: failed to restore terminal on drop",
                ?error
            );
        }
    }
}

/// Only opens the terminal when stdin is one. A redirected stdin never sees a mode
/// call, not even the initial capture.
///
/// # Errors
///
/// Whatever `open_interactive` returns.
pub fn select_backend<F>(
    interactive: bool,
    open_interactive: F,
) -> Result<OpenedBackend, KeypressError>
where
    F: FnOnce() -> Result<OpenedBackend, KeypressError>,
{
    if interactive {
        open_interactive()
    } else {
        Ok((Backend::NonInteractive(NonInteractiveInput::stdin()), None))
    }
}

fn open_interactive_backend(platform: Platform) -> Result<OpenedBackend, KeypressError> {
    match platform {
        #[cfg(unix)]
        Platform::Posix => super::termios_tty::open_posix_backend(),
        #[cfg(windows)]
        Platform::Windows => super::win32_console::open_windows_backend(),
        other => Err(KeypressError::UnsupportedPlatform(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ARROW_RIGHT, ARROW_UP,
                test_fixtures::{MockTty, ScriptedConsole}};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use test_case::test_case;

    fn posix_driver(tty: MockTty) -> RawInputDriver {
        RawInputDriver::with_backend(Backend::Posix(PosixBackend::new(Box::new(tty))))
    }

    fn windows_driver(console: ScriptedConsole) -> RawInputDriver {
        RawInputDriver::with_backend(Backend::Windows(WindowsBackend::new(Box::new(
            console,
        ))))
    }

    #[test]
    fn test_read_and_reset_returns_w_and_restores_original() {
        let (tty, log) = MockTty::new(b"w");
        let mut driver = posix_driver(tty);

        assert_eq!(driver.read_and_reset(true).unwrap(), KeyRead::Char('w'));
        assert!(!driver.is_mode_altered());
        assert_eq!(
            log.borrow().applied,
            vec![
                TerminalMode::Raw,
                TerminalMode::Intermediate,
                TerminalMode::Original
            ]
        );
    }

    #[test]
    fn test_read_leaves_intermediate_mode_until_reset() {
        let (tty, log) = MockTty::new(b"ab");
        let mut driver = posix_driver(tty);

        assert_eq!(driver.read(true).unwrap(), KeyRead::Char('a'));
        assert!(driver.is_mode_altered());
        assert_eq!(log.borrow().applied.last(), Some(&TerminalMode::Intermediate));

        assert_eq!(driver.read(true).unwrap(), KeyRead::Char('b'));
        driver.reset_console_mode().unwrap();
        assert_eq!(log.borrow().applied.len(), 5);
        assert_eq!(log.borrow().applied.last(), Some(&TerminalMode::Original));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (tty, log) = MockTty::new(b"x");
        let mut driver = posix_driver(tty);

        // Never altered: nothing to do.
        driver.reset_console_mode().unwrap();
        assert!(log.borrow().applied.is_empty());

        driver.read(true).unwrap();
        driver.reset_console_mode().unwrap();
        let after_first = log.borrow().applied.clone();
        driver.reset_console_mode().unwrap();

        assert_eq!(log.borrow().applied, after_first);
        assert!(!driver.is_mode_altered());
    }

    #[test]
    fn test_non_blocking_read_without_input_never_reads() {
        let (tty, log) = MockTty::new(b"");
        let mut driver = posix_driver(tty);

        assert_eq!(driver.read_and_reset(false).unwrap(), KeyRead::NoKeyAvailable);
        assert_eq!(log.borrow().polls, 1);
        assert_eq!(log.borrow().reads, 0);
        assert!(!driver.is_mode_altered());
    }

    #[test]
    fn test_non_blocking_read_with_input_decodes() {
        let (tty, log) = MockTty::new("é".as_bytes());
        let mut driver = posix_driver(tty);

        assert_eq!(driver.read_and_reset(false).unwrap(), KeyRead::Char('é'));
        assert_eq!(log.borrow().reads, 2);
    }

    #[test]
    fn test_blocking_read_at_eof_is_end_of_input() {
        let (tty, _log) = MockTty::new(b"");
        let mut driver = posix_driver(tty);
        assert_eq!(driver.read_and_reset(true).unwrap(), KeyRead::EndOfInput);
    }

    #[test]
    fn test_failed_read_still_leaves_raw_mode() {
        let (tty, log) = MockTty::new(b"w");
        let mut driver = posix_driver(tty.with_failing_read());

        let result = driver.read_and_reset(true);

        assert!(matches!(result, Err(KeypressError::ReadInput(_))));
        assert_eq!(
            log.borrow().applied,
            vec![
                TerminalMode::Raw,
                TerminalMode::Intermediate,
                TerminalMode::Original
            ]
        );
        assert!(!driver.is_mode_altered());
    }

    #[test]
    fn test_rejected_raw_mode_is_fatal() {
        let (tty, log) = MockTty::new(b"w");
        let mut driver = posix_driver(tty.with_rejected_mode(TerminalMode::Raw));

        let result = driver.read(true);

        assert!(matches!(
            result,
            Err(KeypressError::SetMode { mode: "raw", .. })
        ));
        assert_eq!(log.borrow().reads, 0);
    }

    #[test]
    fn test_drop_restores_original_mode() {
        let (tty, log) = MockTty::new(b"w");
        {
            let mut driver = posix_driver(tty);
            driver.read(true).unwrap();
        }
        assert_eq!(log.borrow().applied.last(), Some(&TerminalMode::Original));
    }

    #[test_case(&[0, 72], KeyRead::Char(ARROW_UP) ; "function prefix")]
    #[test_case(&[0xE0, 77], KeyRead::Char(ARROW_RIGHT) ; "arrow prefix")]
    #[test_case(&[0, 0x18FF], KeyRead::Char('\u{F8FF}') ; "last in range")]
    #[test_case(&[0, 0x2000], KeyRead::Invalid ; "out of range")]
    #[test_case(&[0x77], KeyRead::Char('w') ; "plain char")]
    #[test_case(&[0xD800], KeyRead::Invalid ; "lone surrogate")]
    #[test_case(&[], KeyRead::EndOfInput ; "weof")]
    fn test_windows_read(units: &[u16], expected: KeyRead) {
        let (console, log) = ScriptedConsole::new(units);
        let mut driver = windows_driver(console);

        assert_eq!(driver.read_and_reset(true).unwrap(), expected);
        assert_eq!(
            log.borrow().applied,
            vec![TerminalMode::Raw, TerminalMode::Original]
        );
    }

    #[test]
    fn test_windows_stays_raw_until_reset() {
        let (console, log) = ScriptedConsole::new(&[0x61]);
        let mut driver = windows_driver(console);

        assert_eq!(driver.read(true).unwrap(), KeyRead::Char('a'));
        assert!(driver.is_mode_altered());
        assert_eq!(log.borrow().applied, vec![TerminalMode::Raw]);
    }

    #[test]
    fn test_windows_non_blocking_without_key() {
        let (console, log) = ScriptedConsole::new(&[]);
        let mut driver = windows_driver(console);

        assert_eq!(driver.read_and_reset(false).unwrap(), KeyRead::NoKeyAvailable);
        assert_eq!(log.borrow().reads, 0);
        assert_eq!(driver.platform(), Platform::Windows);
    }

    #[test]
    fn test_non_interactive_never_switches_modes() {
        let input = NonInteractiveInput::from_reader(Cursor::new(b"wa".to_vec()));
        let mut driver = RawInputDriver::with_backend(Backend::NonInteractive(input));

        assert!(!driver.is_interactive());
        assert_eq!(driver.read_and_reset(false).unwrap(), KeyRead::Char('w'));
        assert_eq!(driver.read_and_reset(true).unwrap(), KeyRead::Char('a'));
        assert_eq!(driver.read_and_reset(true).unwrap(), KeyRead::EndOfInput);
        assert!(!driver.is_mode_altered());
    }

    #[test]
    fn test_select_backend_skips_terminal_when_not_interactive() {
        let (backend, exit_hook) =
            select_backend(false, || panic!("terminal must not be opened")).unwrap();

        assert!(matches!(backend, Backend::NonInteractive(_)));
        assert!(exit_hook.is_none());
    }
}
