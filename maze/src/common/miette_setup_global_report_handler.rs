// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fatal errors end up here, printed by `main() -> miette::Result<()>`. By that time
//! the input driver has already been dropped, so the terminal is back in its original
//! mode and the report renders normally.

use miette::MietteHandlerOpts;

/// Used when the terminal width can't be queried (output redirected).
pub const FALLBACK_REPORT_WIDTH: u16 = 80;

/// The hook is lazy: the terminal width is only measured when a report is actually
/// printed.
pub fn setup_default_miette_global_report_handler(footer: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = crossterm::terminal::size()
            .map_or(FALLBACK_REPORT_WIDTH, |(columns, _rows)| columns);
        tracing::debug!(message = "miette::set_hook", terminal_width);
        Box::new(
            MietteHandlerOpts::new()
                .width(usize::from(terminal_width))
                .wrap_lines(true)
                .force_graphical(true)
                .unicode(true)
                .context_lines(3)
                .break_words(true)
                .with_cause_chain()
                .footer(footer.to_string())
                .build(),
        )
    }))
    .ok();
}
