//! Cursor and expansion state for the raw tree view.

use std::collections::BTreeSet;

use lexvis_core::{RawTreeRenderer, Token, TreeLine};

#[derive(Debug, Default)]
pub struct RawViewer {
    toggled: BTreeSet<Vec<usize>>,
    cursor: usize,
    revision: u64,
}

impl RawViewer {
    /// Drops per-stream state when a new token stream arrives.
    pub fn sync(&mut self, revision: u64) {
        if self.revision != revision {
            self.revision = revision;
            self.toggled.clear();
            self.cursor = 0;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lines(&self, renderer: &RawTreeRenderer, tokens: &[Token]) -> Vec<TreeLine> {
        renderer.render(tokens, &self.toggled)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, line_count: usize) {
        if self.cursor + 1 < line_count {
            self.cursor += 1;
        }
    }

    /// Expands or collapses the container under the cursor.
    pub fn toggle(&mut self, lines: &[TreeLine]) {
        let Some(line) = lines.get(self.cursor) else {
            return;
        };
        if !line.is_toggleable() {
            return;
        }
        if !self.toggled.remove(&line.path) {
            self.toggled.insert(line.path.clone());
        }
    }

    /// Keeps the cursor inside the rendered lines after a collapse.
    pub fn clamp(&mut self, line_count: usize) {
        self.cursor = self.cursor.min(line_count.saturating_sub(1));
    }
}
