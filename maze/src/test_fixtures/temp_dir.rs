// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use rand::Rng;
use std::{ops::Deref,
          path::{Path, PathBuf}};

/// A fresh directory under the system temp dir, deleted on drop.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

impl Deref for TempDir {
    type Target = Path;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl Drop for TempDir {
    fn drop(&mut self) { drop(std::fs::remove_dir_all(&self.inner)); }
}

pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let id: u64 = rand::rng().random();
    let inner = std::env::temp_dir().join(format!("maze_test_{id:016x}"));
    std::fs::create_dir(&inner).into_diagnostic()?;
    Ok(TempDir { inner })
}
