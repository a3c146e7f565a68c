// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
mod scripted_key_source;
mod temp_dir;

// Re-export.
pub use scripted_key_source::*;
pub use temp_dir::*;
