use crate::{ConfigError, PathMatcher, RuleSet};

/// Flat include/exclude selector fed from comma-separated entry lists.
///
/// This is the non-hierarchical flavor of the ordered rule set, used where
/// callers select plain names rather than repository paths. Entries arrive
/// as a comma-separated list; a leading `~` marks an exclude entry and all
/// other entries are includes. Evaluation follows the same last-match-wins
/// policy as [`RuleSet::evaluate`].
///
/// # Examples
///
/// ```
/// use treepack_filters::StringFilterSet;
///
/// let mut filter = StringFilterSet::new();
/// filter.add_entries("foo.*, ~foo-internal, bar").unwrap();
///
/// assert!(filter.contains("foo-public"));
/// assert!(!filter.contains("foo-internal"));
/// assert!(filter.contains("bar"));
/// assert!(!filter.contains("baz"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StringFilterSet {
    entries: RuleSet<PathMatcher>,
}

impl StringFilterSet {
    /// Creates an empty string filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: RuleSet::new(),
        }
    }

    /// Parses a comma-separated entry list and appends each entry in order.
    ///
    /// Surrounding whitespace is trimmed from each entry and empty segments
    /// are skipped. A leading `~` turns the remaining text into an exclude
    /// pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when an entry is not valid
    /// regular-expression syntax. Entries preceding the offending one have
    /// already been appended.
    pub fn add_entries(&mut self, entries: &str) -> Result<(), ConfigError> {
        for raw in entries.split(',') {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(pattern) = trimmed.strip_prefix('~') {
                self.entries.add_exclude(PathMatcher::new(pattern.trim())?);
            } else {
                self.entries.add_include(PathMatcher::new(trimmed)?);
            }
        }
        Ok(())
    }

    /// Returns whether `value` is selected by the filter.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.evaluate(value)
    }

    /// Returns the parsed entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &RuleSet<PathMatcher> {
        &self.entries
    }
}
