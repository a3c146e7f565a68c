// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// A file appender that never rotates, so the whole session lands in one file.
///
/// # Errors
///
/// If `path_str` has no parent folder or no file name.
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't use {} as a log file, it has no file name.",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        // A bare file name has an empty parent: the current folder.
        Some(it) if it.as_os_str().is_empty() => PathBuf::from("."),
        Some(it) => it.to_path_buf(),
        None => miette::bail!(
            "Can't access the folder of {}. It might not exist, or you might not have the required permissions.",
            path.display()
        ),
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}
