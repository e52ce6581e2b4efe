//! Mention detection: literal substrings and regexes that flag a line for
//! operator notification.

use super::ClassifierError;
use regex::Regex;

/// Default regex: a player sending a private message to the console,
/// e.g. `[Notch -> me] are you there?`.
pub const PRIVATE_MESSAGE_PATTERN: &str = r"\[[^\]]+ -> me\]";

/// Default regex: a chat line addressing the server,
/// e.g. `<Notch> hey server, can you restart?`.
///
/// Scoped to `<name> ` chat lines so command notices
/// (`... issued server command ...`) do not ring.
pub const CHAT_SERVER_PATTERN: &str = r"(?i)<[^>]+> .*\bserver\b";

/// The built-in mention regexes.
pub fn default_mention_regexes() -> Vec<String> {
    vec![
        CHAT_SERVER_PATTERN.to_string(),
        PRIVATE_MESSAGE_PATTERN.to_string(),
    ]
}

/// Matches lines against configured literals (case-sensitive) and regexes.
#[derive(Debug, Clone, Default)]
pub struct MentionMatcher {
    literals: Vec<String>,
    regexes: Vec<Regex>,
}

impl MentionMatcher {
    /// Build a matcher. Empty literals are ignored since they would match
    /// every line.
    pub fn new(literals: Vec<String>, regexes: Vec<Regex>) -> Self {
        Self {
            literals: literals.into_iter().filter(|l| !l.is_empty()).collect(),
            regexes,
        }
    }

    /// Build a matcher compiling the regex sources.
    pub fn compile(literals: Vec<String>, patterns: &[String]) -> Result<Self, ClassifierError> {
        let regexes = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ClassifierError::InvalidRegex {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(literals, regexes))
    }

    /// Whether `text` contains any literal or matches any regex.
    pub fn matches(&self, text: &str) -> bool {
        self.literals.iter().any(|l| text.contains(l.as_str()))
            || self.regexes.iter().any(|r| r.is_match(text))
    }

    /// Whether the matcher can never match.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.regexes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(literals: &[&str], patterns: &[&str]) -> MentionMatcher {
        MentionMatcher::compile(
            literals.iter().map(|s| s.to_string()).collect(),
            &patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn literal_match_is_case_sensitive() {
        let m = matcher(&["Console"], &[]);
        assert!(m.matches("hey Console, help"));
        assert!(!m.matches("hey console, help"));
    }

    #[test]
    fn regex_match_flags_line() {
        let m = matcher(&[], &[PRIVATE_MESSAGE_PATTERN]);
        assert!(m.matches("[Notch -> me] are you there?"));
        assert!(!m.matches("[Notch -> jeb] are you there?"));
    }

    #[test]
    fn chat_addressing_server_is_flagged() {
        let m = matcher(&[], &[CHAT_SERVER_PATTERN]);
        assert!(m.matches("[12:00:00 INFO]: <Notch> hey server, can you restart?"));
        assert!(m.matches("[12:00:00 INFO]: <Notch> SERVER lagging"));
        assert!(!m.matches("[12:00:00 INFO]: <Notch> the servers are fine"));
        assert!(!m.matches("[12:00:00 INFO]: jtaylor issued server command: /kick bob"));
        assert!(!m.matches("[12:00:00 INFO]: Starting minecraft server version 1.20"));
    }

    #[test]
    fn empty_literals_are_ignored() {
        let m = matcher(&[""], &[]);
        assert!(m.is_empty());
        assert!(!m.matches("anything"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = MentionMatcher::compile(vec![], &["[".to_string()]).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidRegex { ref pattern, .. } if pattern == "["));
    }
}
