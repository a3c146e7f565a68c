// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod game_loop;
pub mod grid;
pub mod movement;
pub mod render;

// Re-export.
pub use game_loop::*;
pub use grid::*;
pub use movement::*;
pub use render::*;
