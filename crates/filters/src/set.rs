use crate::{ConfigError, ImportMode, PathMatcher, RuleSet, debug_filter};

/// Ordered include/exclude rules scoped to a sub-tree root.
///
/// A `PathFilterSet` owns a [`RuleSet`] whose entries are hierarchical path
/// patterns, restricted to paths at or below the set's `root`. The root is
/// fixed at construction; the import mode and cleanup flag can be configured
/// until the set is registered with a
/// [`WorkspaceFilter`](crate::WorkspaceFilter).
///
/// # Examples
///
/// ```
/// use treepack_filters::{PathFilterSet, PathMatcher};
///
/// let mut set = PathFilterSet::new("/apps/site").unwrap();
/// set.add_include(PathMatcher::new("/apps/site(/.*)?").unwrap());
/// set.add_exclude(PathMatcher::new("/apps/site/install(/.*)?").unwrap());
///
/// assert!(set.contains("/apps/site/components/page"));
/// assert!(!set.contains("/apps/site/install/bundle.jar"));
/// assert!(!set.contains("/libs/anything"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathFilterSet {
    root: String,
    entries: RuleSet<PathMatcher>,
    import_mode: ImportMode,
    cleanup: bool,
}

impl PathFilterSet {
    /// Creates an empty filter set rooted at `root`.
    ///
    /// A trailing slash on a non-`/` root is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRoot`] for an empty root and
    /// [`ConfigError::RelativeRoot`] when the root does not start with `/`.
    pub fn new(root: impl Into<String>) -> Result<Self, ConfigError> {
        let mut root = root.into();
        if root.is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        if !root.starts_with('/') {
            return Err(ConfigError::RelativeRoot { root });
        }
        while root.len() > 1 && root.ends_with('/') {
            root.pop();
        }
        Ok(Self {
            root,
            entries: RuleSet::new(),
            import_mode: ImportMode::default(),
            cleanup: false,
        })
    }

    /// Sets the import mode, builder style.
    #[must_use]
    pub fn with_import_mode(mut self, import_mode: ImportMode) -> Self {
        self.import_mode = import_mode;
        self
    }

    /// Marks the set as a cleanup filter, builder style.
    #[must_use]
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Sets the import mode.
    pub fn set_import_mode(&mut self, import_mode: ImportMode) {
        self.import_mode = import_mode;
    }

    /// Sets the cleanup flag.
    pub fn set_cleanup(&mut self, cleanup: bool) {
        self.cleanup = cleanup;
    }

    /// Appends an include entry for `matcher`.
    pub fn add_include(&mut self, matcher: PathMatcher) {
        debug_filter::trace_rule_added(&self.root, matcher.pattern(), true);
        self.entries.add_include(matcher);
    }

    /// Appends an exclude entry for `matcher`.
    pub fn add_exclude(&mut self, matcher: PathMatcher) {
        debug_filter::trace_rule_added(&self.root, matcher.pattern(), false);
        self.entries.add_exclude(matcher);
    }

    /// Returns the root path of the set.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the ordered rule entries.
    #[must_use]
    pub fn entries(&self) -> &RuleSet<PathMatcher> {
        &self.entries
    }

    /// Returns the persisted import mode.
    #[must_use]
    pub const fn import_mode(&self) -> ImportMode {
        self.import_mode
    }

    /// Returns whether the set removes pre-existing content at install time.
    #[must_use]
    pub const fn is_cleanup(&self) -> bool {
        self.cleanup
    }

    /// Returns whether `path` is included by this set.
    ///
    /// The path must be equal to or a descendant of the root; everything
    /// outside the root sub-tree is never contained. Within the sub-tree the
    /// ordered rule policy of [`RuleSet::evaluate`] applies, so a set without
    /// entries contains the whole sub-tree.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        if path != self.root && !descends_from(path, &self.root) {
            return false;
        }
        let included = self.entries.evaluate(path);
        debug_filter::trace_decision(path, &self.root, included);
        included
    }

    /// Returns whether `path` lies on the line from the repository root
    /// through this set's root into its sub-tree.
    ///
    /// True for the root itself, for every ancestor of the root, and for
    /// every descendant of the root. Traversal uses this to decide whether a
    /// directory can lead to content selected by this set.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        self.is_ancestor(path) || descends_from(path, &self.root)
    }

    /// Returns whether `path` is an ancestor of (or equal to) this set's
    /// root.
    ///
    /// Traversal uses this to decide whether a directory must be descended
    /// into even though it is not itself included, because the root lies
    /// below it.
    #[must_use]
    pub fn is_ancestor(&self, path: &str) -> bool {
        path == self.root || descends_from(&self.root, path)
    }
}

/// Returns whether `path` is a strict descendant of `ancestor`.
///
/// Matching is segment-aware: `/apps/foobar` does not descend from
/// `/apps/foo`.
fn descends_from(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return path.len() > 1 && path.starts_with('/');
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
