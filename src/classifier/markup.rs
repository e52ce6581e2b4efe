//! Markup rules: regex patterns whose capture groups receive highlight classes.

use super::ClassifierError;
use crate::model::{Highlight, Segment};
use regex::Regex;
use std::ops::Range;

/// Pattern for lines announcing that a player issued a server command.
pub const COMMAND_ISSUED_PATTERN: &str = r"(.+: )(.+)( issued server command)";
/// Pattern for the warning level token.
pub const WARN_PATTERN: &str = r"WARN\]";
/// Pattern for the error level token.
pub const ERROR_PATTERN: &str = r"ERROR\]";

/// A regex whose capture groups are highlighted on the first match.
///
/// Group 0 is the whole match. Groups that did not participate in the match
/// or matched the empty string contribute nothing.
#[derive(Debug, Clone)]
pub struct MarkupRule {
    pattern: Regex,
    groups: Vec<(usize, Highlight)>,
}

impl MarkupRule {
    /// Compile a rule, validating the pattern and that every group index exists.
    pub fn new(pattern: &str, groups: Vec<(usize, Highlight)>) -> Result<Self, ClassifierError> {
        let regex = Regex::new(pattern).map_err(|e| ClassifierError::InvalidRegex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let group_count = regex.captures_len();
        if let Some(&(group, _)) = groups.iter().find(|(g, _)| *g >= group_count) {
            return Err(ClassifierError::GroupOutOfRange {
                pattern: pattern.to_string(),
                group,
            });
        }

        Ok(Self {
            pattern: regex,
            groups,
        })
    }

    /// Compile a rule whose highlight classes are given by configuration name.
    pub fn from_names(pattern: &str, groups: &[(usize, String)]) -> Result<Self, ClassifierError> {
        let groups = groups
            .iter()
            .map(|(index, name)| {
                Highlight::from_name(name)
                    .map(|h| (*index, h))
                    .ok_or_else(|| ClassifierError::UnknownHighlight { name: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pattern, groups)
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply the rule to `text`, adding its segments unless any of them would
    /// overlap an existing segment. The rule applies atomically: either all of
    /// its groups are highlighted or none are.
    ///
    /// Returns whether the rule contributed segments.
    pub fn apply(&self, text: &str, segments: &mut Vec<Segment>) -> bool {
        let Some(captures) = self.pattern.captures(text) else {
            return false;
        };

        let mut candidates: Vec<Segment> = Vec::with_capacity(self.groups.len());
        for &(group, highlight) in &self.groups {
            let Some(m) = captures.get(group) else {
                continue;
            };
            let range: Range<usize> = m.range();
            if range.is_empty() {
                continue;
            }
            let collides = segments
                .iter()
                .chain(candidates.iter())
                .any(|s| s.overlaps(&range));
            if collides {
                return false;
            }
            candidates.push(Segment { range, highlight });
        }

        if candidates.is_empty() {
            return false;
        }
        segments.extend(candidates);
        true
    }
}

/// The built-in rules in their fixed application order.
pub fn default_rules() -> Vec<MarkupRule> {
    // Built-in patterns are checked by `default_rules_all_compile`.
    [
        (
            COMMAND_ISSUED_PATTERN,
            vec![(2, Highlight::Actor), (3, Highlight::Command)],
        ),
        (WARN_PATTERN, vec![(0, Highlight::Warn)]),
        (ERROR_PATTERN, vec![(0, Highlight::Error)]),
    ]
    .into_iter()
    .filter_map(|(pattern, groups)| MarkupRule::new(pattern, groups).ok())
    .collect()
}
