//! Line classification (pure).
//!
//! Turns one sanitized log line into a [`DecoratedLine`]: mention detection
//! plus markup rules applied in a fixed order. Classification never fails;
//! a line that matches nothing is simply undecorated.

pub mod markup;
pub mod mention;

pub use markup::{default_rules, MarkupRule};
pub use mention::{
    default_mention_regexes, MentionMatcher, CHAT_SERVER_PATTERN, PRIVATE_MESSAGE_PATTERN,
};

use crate::model::DecoratedLine;
use thiserror::Error;

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

/// Errors building a classifier from configured patterns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// A mention or markup regex failed to compile.
    #[error("Invalid regex {pattern:?}: {message}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// Compiler error message.
        message: String,
    },

    /// A markup rule names a highlight class that does not exist.
    #[error("Unknown highlight class {name:?} (expected actor, command, warn or error)")]
    UnknownHighlight {
        /// The unrecognized name.
        name: String,
    },

    /// A markup rule references a capture group its pattern does not have.
    #[error("Pattern {pattern:?} has no capture group {group}")]
    GroupOutOfRange {
        /// The rule pattern.
        pattern: String,
        /// The missing group index.
        group: usize,
    },
}

/// Explicit classifier configuration, passed at construction.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Mention detection patterns.
    pub mentions: MentionMatcher,
    /// Markup rules in application order.
    pub markup_rules: Vec<MarkupRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mentions: MentionMatcher::compile(Vec::new(), &default_mention_regexes())
                .unwrap_or_default(),
            markup_rules: default_rules(),
        }
    }
}

/// Classifies raw console lines. Holds only immutable configuration.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    config: ClassifierConfig,
}

impl LineClassifier {
    /// Create a classifier from explicit configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Decorate a single line.
    ///
    /// Markup rules run in order, each on its first match only. A rule whose
    /// match would overlap an earlier rule's segment is skipped. Mention
    /// detection runs on the same text independently of markup.
    pub fn classify(&self, raw: &str) -> DecoratedLine {
        let mut segments = Vec::new();
        for rule in &self.config.markup_rules {
            rule.apply(raw, &mut segments);
        }
        let mention = self.config.mentions.matches(raw);
        DecoratedLine::new(raw.to_string(), segments, mention)
    }
}
