//! Decorated console lines.
//!
//! A `DecoratedLine` is produced once by the line classifier from a single
//! sanitized log line and is immutable afterwards. Highlighting is carried as
//! byte ranges over the raw text rather than embedded markup, so rendering
//! never re-interprets the text.

use std::ops::Range;

/// Semantic highlight class for a segment of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Name of the player who issued a server command.
    Actor,
    /// The " issued server command" notice following the actor.
    Command,
    /// A `WARN]` level token.
    Warn,
    /// An `ERROR]` level token.
    Error,
}

impl Highlight {
    /// Parse the configuration name of a highlight class.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "actor" => Some(Self::Actor),
            "command" => Some(Self::Command),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A highlighted byte range within a line's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte range into [`DecoratedLine::text`]. Always on char boundaries.
    pub range: Range<usize>,
    /// Highlight class applied to the range.
    pub highlight: Highlight,
}

impl Segment {
    /// Whether two segments share at least one byte.
    pub fn overlaps(&self, other: &Range<usize>) -> bool {
        self.range.start < other.end && other.start < self.range.end
    }
}

/// A piece of a line as handed to the renderer: plain or highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Text of the fragment, borrowed from the line.
    pub text: &'a str,
    /// Highlight of the fragment, `None` for undecorated text.
    pub highlight: Option<Highlight>,
}

/// A log line enriched with highlight segments and a mention flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedLine {
    text: String,
    segments: Vec<Segment>,
    mention: bool,
}

impl DecoratedLine {
    /// Build a decorated line. Segments are sorted by start offset; callers
    /// guarantee they do not overlap and fall on char boundaries.
    pub fn new(text: String, mut segments: Vec<Segment>, mention: bool) -> Self {
        segments.sort_by_key(|s| s.range.start);
        debug_assert!(segments.windows(2).all(|w| w[0].range.end <= w[1].range.start));
        Self {
            text,
            segments,
            mention,
        }
    }

    /// Undecorated line, used for text that never went through the classifier.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text.into(), Vec::new(), false)
    }

    /// The raw (sanitized) text of the line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Highlight segments sorted by start offset.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the line matched a mention pattern.
    pub fn is_mention(&self) -> bool {
        self.mention
    }

    /// The text of the first segment with the given highlight, if any.
    pub fn highlighted(&self, highlight: Highlight) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.highlight == highlight)
            .map(|s| &self.text[s.range.clone()])
    }

    /// Split the line into consecutive plain and highlighted fragments.
    ///
    /// Concatenating the fragment texts yields exactly [`Self::text`].
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        let mut out = Vec::with_capacity(self.segments.len() * 2 + 1);
        let mut cursor = 0;
        for segment in &self.segments {
            if segment.range.start > cursor {
                out.push(Fragment {
                    text: &self.text[cursor..segment.range.start],
                    highlight: None,
                });
            }
            out.push(Fragment {
                text: &self.text[segment.range.clone()],
                highlight: Some(segment.highlight),
            });
            cursor = segment.range.end;
        }
        if cursor < self.text.len() {
            out.push(Fragment {
                text: &self.text[cursor..],
                highlight: None,
            });
        }
        out
    }
}
