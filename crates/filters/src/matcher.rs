use std::fmt;

use regex::Regex;

use crate::ConfigError;

/// Capability required of rule matchers.
///
/// The ordered rule set is generic over this trait so the same evaluation
/// policy serves both hierarchical path rules and flat string selectors.
pub trait Matches {
    /// Returns `true` when `key` satisfies the matcher.
    fn matches(&self, key: &str) -> bool;
}

/// Immutable wrapper over a single textual path pattern.
///
/// The pattern is compiled once at construction into an anchored regular
/// expression, so [`matches`](Matches::matches) reports full-string matches
/// only; a pattern never matches a substring of a longer path. Equality is
/// defined by the pattern text alone.
///
/// # Examples
///
/// ```
/// use treepack_filters::{Matches, PathMatcher};
///
/// let matcher = PathMatcher::new("/apps/site(/.*)?").unwrap();
/// assert!(matcher.matches("/apps/site"));
/// assert!(matcher.matches("/apps/site/components"));
/// assert!(!matcher.matches("/apps/sitemap"));
/// ```
#[derive(Clone, Debug)]
pub struct PathMatcher {
    pattern: String,
    regex: Regex,
}

impl PathMatcher {
    /// Compiles `pattern` into a full-string matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when the pattern is not valid
    /// regular-expression syntax.
    pub fn new(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|source| {
            ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            }
        })?;
        Ok(Self { pattern, regex })
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether the pattern is anchored at the repository root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.pattern.starts_with('/')
    }
}

impl Matches for PathMatcher {
    fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

impl PartialEq for PathMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for PathMatcher {}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::{Matches, PathMatcher};

    #[test]
    fn matches_full_string_only() {
        let matcher = PathMatcher::new("/apps/foo").unwrap();
        assert!(matcher.matches("/apps/foo"));
        assert!(!matcher.matches("/apps/foo/bar"));
        assert!(!matcher.matches("x/apps/foo"));
    }

    #[test]
    fn descendant_suffix_covers_subtree() {
        let matcher = PathMatcher::new("/apps/foo(/.*)?").unwrap();
        assert!(matcher.matches("/apps/foo"));
        assert!(matcher.matches("/apps/foo/bar/baz"));
        assert!(!matcher.matches("/apps/foobar"));
    }

    #[test]
    fn invalid_pattern_reports_config_error() {
        let error = PathMatcher::new("[").unwrap_err();
        assert!(error.to_string().contains('['));
    }

    #[test]
    fn absolute_detection_checks_leading_slash() {
        assert!(PathMatcher::new("/apps(/.*)?").unwrap().is_absolute());
        assert!(!PathMatcher::new(".*\\.tmp").unwrap().is_absolute());
    }

    #[test]
    fn equality_is_defined_by_pattern_text() {
        let left = PathMatcher::new("/apps(/.*)?").unwrap();
        let right = PathMatcher::new("/apps(/.*)?").unwrap();
        let other = PathMatcher::new("/libs(/.*)?").unwrap();
        assert_eq!(left, right);
        assert_ne!(left, other);
    }
}
