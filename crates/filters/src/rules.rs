use crate::{Matches, Rule};

/// Insertion-ordered sequence of include/exclude rules.
///
/// The sequence is append-only and never re-sorted or deduplicated;
/// evaluation order is significant. Policy evaluation works as follows:
///
/// 1. An empty set accepts everything.
/// 2. Otherwise the default result is the inverse of the first entry's
///    polarity: a leading include rule narrows a closed set open, a leading
///    exclude rule narrows an open set down.
/// 3. Every entry is consulted in order and each matching entry overwrites
///    the running result, so the last matching entry wins.
///
/// Note that this differs from the first-match-wins convention used by many
/// transfer tools; overlapping patterns are resolved in favor of the entry
/// registered later.
///
/// # Examples
///
/// ```
/// use treepack_filters::{PathMatcher, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.add_include(PathMatcher::new("/a(/.*)?").unwrap());
/// rules.add_exclude(PathMatcher::new("/a/b(/.*)?").unwrap());
/// rules.add_include(PathMatcher::new("/a/b/c(/.*)?").unwrap());
///
/// assert!(rules.evaluate("/a/b/c/d"));
/// assert!(!rules.evaluate("/a/b/x"));
/// assert!(rules.evaluate("/a/x"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleSet<M> {
    entries: Vec<Rule<M>>,
}

impl<M> RuleSet<M> {
    /// Creates an empty rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an include entry for `matcher`.
    pub fn add_include(&mut self, matcher: M) {
        self.entries.push(Rule::include(matcher));
    }

    /// Appends an exclude entry for `matcher`.
    pub fn add_exclude(&mut self, matcher: M) {
        self.entries.push(Rule::exclude(matcher));
    }

    /// Appends a pre-built entry.
    pub fn add(&mut self, rule: Rule<M>) {
        self.entries.push(rule);
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Rule<M>] {
        &self.entries
    }

    /// Returns `true` when no entry has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Matches> RuleSet<M> {
    /// Returns the last entry matching `key`, if any.
    ///
    /// This is the entry whose polarity decides [`evaluate`](Self::evaluate)
    /// for `key`; it is exposed for diagnostics.
    #[must_use]
    pub fn matching_rule(&self, key: &str) -> Option<&Rule<M>> {
        self.entries.iter().rev().find(|rule| rule.matches(key))
    }

    /// Evaluates the inclusion policy for `key`.
    #[must_use]
    pub fn evaluate(&self, key: &str) -> bool {
        let Some(first) = self.entries.first() else {
            return true;
        };
        self.matching_rule(key)
            .map_or_else(|| first.action().inverse(), Rule::action)
            .is_include()
    }
}

impl<M> Default for RuleSet<M> {
    fn default() -> Self {
        Self::new()
    }
}
