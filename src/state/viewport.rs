//! Console viewport scroll state.
//!
//! Tracks which console rows are visible and whether the view follows new
//! output. One line is one row; lines are never wrapped.

use super::stream_buffer::{AppendOutcome, ViewportMetrics, ViewportProbe};
use std::ops::Range;

/// Scroll position of the console pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleViewport {
    scroll_top: usize,
    viewport_height: usize,
    content_height: usize,
    /// Derived; recomputed on append and on manual scroll
    at_bottom: bool,
}

impl Default for ConsoleViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleViewport {
    /// Empty viewport following the bottom.
    pub fn new() -> Self {
        Self {
            scroll_top: 0,
            viewport_height: 0,
            content_height: 0,
            at_bottom: true,
        }
    }

    /// Whether the view follows new output.
    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    /// First visible row.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Visible rows as a range over the content.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll_top + self.viewport_height).min(self.content_height);
        self.scroll_top.min(end)..end
    }

    /// Update after a buffer append.
    ///
    /// A view that was at the bottom follows the new bottom. Otherwise the
    /// position is shifted up by the number of evicted lines so the same
    /// content stays in view.
    pub fn after_append(&mut self, outcome: AppendOutcome, content_height: usize) {
        self.content_height = content_height;
        if outcome.was_at_bottom {
            self.pin_to_bottom();
        } else {
            self.scroll_top = self.scroll_top.saturating_sub(outcome.evicted);
            self.clamp();
            self.at_bottom = self.metrics().is_at_bottom();
        }
    }

    /// Apply a new pane height, keeping the bottom pinned if it was.
    pub fn set_viewport_height(&mut self, height: usize) {
        if height == self.viewport_height {
            return;
        }
        self.viewport_height = height;
        if self.at_bottom {
            self.scroll_top = self.metrics().bottom_top();
        } else {
            self.clamp();
            self.at_bottom = self.metrics().is_at_bottom();
        }
    }

    /// Scroll to the last row and follow new output.
    pub fn pin_to_bottom(&mut self) {
        self.scroll_top = self.metrics().bottom_top();
        self.at_bottom = true;
    }

    /// Scroll up by `rows`.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_top = self.scroll_top.saturating_sub(rows);
        self.at_bottom = self.metrics().is_at_bottom();
    }

    /// Scroll down by `rows`.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_top = self.scroll_top.saturating_add(rows);
        self.clamp();
        self.at_bottom = self.metrics().is_at_bottom();
    }

    /// Scroll up one page.
    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0;
        self.at_bottom = self.metrics().is_at_bottom();
    }

    fn page_size(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }

    fn clamp(&mut self) {
        let max = self.metrics().bottom_top();
        if self.scroll_top > max {
            self.scroll_top = max;
        }
    }
}

impl ViewportProbe for ConsoleViewport {
    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            scroll_top: self.scroll_top,
            viewport_height: self.viewport_height,
            content_height: self.content_height,
        }
    }
}
