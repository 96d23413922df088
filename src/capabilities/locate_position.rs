// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Locate-position iteration: used by formats without ordered enumeration
//! ([`crate::levels::Hashed`]). Iteration order over the underlying
//! associative container is not guaranteed, so `locate` is the preferred —
//! and, inside co-iteration, the only used — access path.

use super::LevelCursor;
use crate::levels::Hashed;

/// A cursor over an unordered, `locate`-only level.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    level: &'a Hashed,
    parent_pos: usize,
}

impl<'a> Cursor<'a> {
    /// Binds the cursor to `level` under `parent_pos`.
    #[must_use]
    pub fn new(level: &'a Hashed, parent_pos: usize) -> Self {
        Self { level, parent_pos }
    }
}

impl LevelCursor for Cursor<'_> {
    fn ordered(&self) -> bool {
        false
    }

    fn current(&self) -> Option<usize> {
        None
    }

    fn current_pos(&self) -> Option<usize> {
        None
    }

    fn advance(&mut self) {
        // Unordered levels are never advanced; co-iteration only ever
        // calls `locate` on them.
    }

    fn locate(&self, coordinate: usize) -> Option<usize> {
        self.level.locate(self.parent_pos, coordinate)
    }
}
