// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Written to the current working directory.
pub const LOG_FILE_NAME: &str = "log.txt";

/// Where logs go and how much of them.
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level_filter`: the most verbose level that is recorded.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    File(String /* log file path */),
}

impl TracingConfig {
    /// Debug level logs to [`LOG_FILE_NAME`].
    #[must_use]
    pub fn new_file(file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                file_path.unwrap_or_else(|| LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<LevelFilter> for TracingConfig {
    /// `OFF` means no writer at all.
    fn from(level_filter: LevelFilter) -> Self {
        if level_filter == LevelFilter::OFF {
            Self {
                writer_config: WriterConfig::None,
                level_filter,
            }
        } else {
            Self {
                level_filter,
                ..Self::new_file(None)
            }
        }
    }
}
