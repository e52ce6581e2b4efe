//! Bounded console line buffer.
//!
//! A ring buffer of decorated lines, oldest at the front. Appends never
//! reorder; overflow evicts from the front so the buffer always holds the
//! most recent `max_lines` lines in arrival order.

use crate::model::DecoratedLine;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "stream_buffer_tests.rs"]
mod tests;

/// Default retained line count.
pub const DEFAULT_MAX_LINES: usize = 4000;

/// Scroll geometry of the console viewport, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportMetrics {
    /// Index of the first visible row.
    pub scroll_top: usize,
    /// Number of visible rows.
    pub viewport_height: usize,
    /// Total rows of content.
    pub content_height: usize,
}

impl ViewportMetrics {
    /// Whether the last row of content is visible.
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + self.viewport_height >= self.content_height
    }

    /// The `scroll_top` that shows the last row of content.
    pub fn bottom_top(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

/// Capability supplied by the presentation layer to report scroll geometry.
pub trait ViewportProbe {
    /// Current viewport metrics.
    fn metrics(&self) -> ViewportMetrics;
}

impl ViewportProbe for ViewportMetrics {
    fn metrics(&self) -> ViewportMetrics {
        *self
    }
}

/// Result of appending one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Lines evicted from the front to honor the limit.
    pub evicted: usize,
    /// Whether the viewport was at the bottom immediately before the append;
    /// if so the presentation follows the new bottom.
    pub was_at_bottom: bool,
}

/// Append-only ordered buffer of decorated lines with a fixed maximum size.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    /// Oldest at front, newest at back
    lines: VecDeque<DecoratedLine>,
    max_lines: usize,
    /// Lines ever appended, including evicted ones
    total_appended: u64,
}

impl StreamBuffer {
    /// Create an empty buffer retaining at most `max_lines` lines.
    ///
    /// A limit of zero is raised to one.
    pub fn new(max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            lines: VecDeque::with_capacity(max_lines.min(DEFAULT_MAX_LINES)),
            max_lines,
            total_appended: 0,
        }
    }

    /// Append a line, sampling the viewport position first.
    pub fn push(&mut self, line: DecoratedLine, probe: &dyn ViewportProbe) -> AppendOutcome {
        let was_at_bottom = self.currently_at_bottom(probe.metrics());
        let evicted = self.append(line);
        AppendOutcome {
            evicted,
            was_at_bottom,
        }
    }

    /// Append a line and trim the front. Returns the number of lines evicted.
    pub fn append(&mut self, line: DecoratedLine) -> usize {
        self.lines.push_back(line);
        self.total_appended += 1;
        self.evict_overflow()
    }

    /// Remove lines from the front until `len <= max_lines`.
    pub fn evict_overflow(&mut self) -> usize {
        let excess = self.lines.len().saturating_sub(self.max_lines);
        self.lines.drain(..excess);
        excess
    }

    /// Whether the viewport described by `metrics` shows the last line.
    pub fn currently_at_bottom(&self, metrics: ViewportMetrics) -> bool {
        metrics.is_at_bottom()
    }

    /// Retained lines, oldest first.
    pub fn lines(&self) -> &VecDeque<DecoratedLine> {
        &self.lines
    }

    /// Owned copy of the retained lines, oldest first.
    pub fn snapshot(&self) -> Vec<DecoratedLine> {
        self.lines.iter().cloned().collect()
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are retained.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The retention limit.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Lines appended over the buffer's lifetime.
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}
