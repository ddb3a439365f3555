use std::fs;
use std::path::Path;

use crate::{
    Matches, MergeError, ParseError, PathFilterSet, PathMatcher, debug_filter, xml,
};

/// Ordered collection of path filter sets defining a packaging operation.
///
/// A `WorkspaceFilter` has two meaningful phases. While *building*, sets are
/// registered through [`add`](Self::add) and [`merge`](Self::merge). Once
/// built, the filter answers [`contains`](Self::contains),
/// [`covers`](Self::covers) and [`is_ancestor`](Self::is_ancestor) queries as
/// the union over all registered sets, consulted in registration order.
///
/// The serialized document form is cached: [`load`](Self::load) retains the
/// raw input bytes so unchanged filters re-serialize with their original
/// formatting, and every mutating call invalidates the cache so the next
/// [`source`](Self::source) read regenerates the canonical form.
///
/// # Examples
///
/// ```
/// use treepack_filters::{PathFilterSet, PathMatcher, WorkspaceFilter};
///
/// let mut set = PathFilterSet::new("/apps/site").unwrap();
/// set.add_include(PathMatcher::new("/apps/site(/.*)?").unwrap());
///
/// let mut filter = WorkspaceFilter::new();
/// filter.add(set);
///
/// assert!(filter.contains("/apps/site/components"));
/// assert!(filter.covers("/apps"));
/// assert!(!filter.contains("/libs"));
/// ```
#[derive(Clone, Debug)]
pub struct WorkspaceFilter {
    filter_sets: Vec<PathFilterSet>,
    global_ignored: Option<PathMatcher>,
    version: f64,
    source: Option<Vec<u8>>,
}

impl WorkspaceFilter {
    /// Newest document format version this engine loads.
    pub const SUPPORTED_VERSION: f64 = 1.0;

    /// Creates an empty workspace filter at the supported format version.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter_sets: Vec::new(),
            global_ignored: None,
            version: Self::SUPPORTED_VERSION,
            source: None,
        }
    }

    /// Parses `bytes` into a fresh workspace filter.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] under the same conditions as
    /// [`load`](Self::load).
    pub fn from_source(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut filter = Self::new();
        filter.load(bytes)?;
        Ok(filter)
    }

    /// Appends a filter set to the collection.
    ///
    /// No uniqueness check is applied; registering two sets with the same
    /// root is permitted here even though [`merge`](Self::merge) rejects it.
    pub fn add(&mut self, set: PathFilterSet) {
        self.filter_sets.push(set);
        self.source = None;
    }

    /// Returns the registered filter sets in registration order.
    #[must_use]
    pub fn filter_sets(&self) -> &[PathFilterSet] {
        &self.filter_sets
    }

    /// Returns the document format version.
    #[must_use]
    pub const fn version(&self) -> f64 {
        self.version
    }

    /// Installs the process-wide ignore matcher.
    ///
    /// The matcher participates in [`contains`](Self::contains) and
    /// [`covering_filter_set`](Self::covering_filter_set) but is never
    /// serialized.
    pub fn set_global_ignored(&mut self, matcher: PathMatcher) {
        self.global_ignored = Some(matcher);
    }

    /// Returns the installed ignore matcher, if any.
    #[must_use]
    pub fn global_ignored(&self) -> Option<&PathMatcher> {
        self.global_ignored.as_ref()
    }

    /// Returns whether `path` matches the process-wide ignore matcher.
    #[must_use]
    pub fn is_globally_ignored(&self, path: &str) -> bool {
        self.global_ignored
            .as_ref()
            .is_some_and(|matcher| matcher.matches(path))
    }

    /// Returns the first-registered filter set covering `path`.
    ///
    /// Registration order decides, not pattern specificity. Globally ignored
    /// paths are covered by no set.
    #[must_use]
    pub fn covering_filter_set(&self, path: &str) -> Option<&PathFilterSet> {
        if self.is_globally_ignored(path) {
            return None;
        }
        self.filter_sets.iter().find(|set| set.covers(path))
    }

    /// Returns whether any registered set includes `path`.
    ///
    /// Globally ignored paths are never contained.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        if self.is_globally_ignored(path) {
            return false;
        }
        self.filter_sets.iter().any(|set| set.contains(path))
    }

    /// Returns whether any registered set covers `path`.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        self.filter_sets.iter().any(|set| set.covers(path))
    }

    /// Returns whether `path` is an ancestor of any registered root.
    #[must_use]
    pub fn is_ancestor(&self, path: &str) -> bool {
        self.filter_sets.iter().any(|set| set.is_ancestor(path))
    }

    /// Loads a serialized filter document, replacing the in-memory state.
    ///
    /// The raw input bytes are cached as the current source so a subsequent
    /// [`source`](Self::source) read reproduces the original document
    /// byte-for-byte. The replacement is all-or-nothing: when parsing fails
    /// the previous state remains untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the document is not well-formed, the root
    /// element is not `workspaceFilter`, the version exceeds
    /// [`SUPPORTED_VERSION`](Self::SUPPORTED_VERSION), an entry pattern is
    /// missing or empty, or a mode/type/pattern value cannot be decoded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        let document = xml::parse(bytes)?;
        debug_filter::trace_document_loaded(document.version, document.filter_sets.len());
        self.version = document.version;
        self.filter_sets = document.filter_sets;
        self.source = Some(bytes.to_vec());
        Ok(())
    }

    /// Loads a serialized filter document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] when the file cannot be read, and
    /// otherwise fails under the same conditions as [`load`](Self::load).
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let bytes = fs::read(path)?;
        self.load(&bytes)
    }

    /// Rebuilds the canonical serialized form and installs it as the cached
    /// source.
    pub fn generate_source(&mut self) -> &[u8] {
        let bytes = xml::write(self.version, &self.filter_sets);
        self.source.insert(bytes).as_slice()
    }

    /// Returns the serialized document, regenerating it when no cached
    /// source exists.
    pub fn source(&mut self) -> &[u8] {
        if self.source.is_none() {
            self.source = Some(xml::write(self.version, &self.filter_sets));
        }
        self.source.as_deref().unwrap_or_default()
    }

    /// Returns the serialized document as text.
    pub fn source_as_string(&mut self) -> String {
        String::from_utf8_lossy(self.source()).into_owned()
    }

    /// Appends every filter set of `other`, rejecting duplicate roots.
    ///
    /// The merge is atomic: every incoming root is validated against the
    /// registered sets before anything is appended, so a conflict leaves the
    /// target unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::DuplicateRoot`] naming the first conflicting
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use treepack_filters::{MergeError, PathFilterSet, WorkspaceFilter};
    ///
    /// let mut target = WorkspaceFilter::new();
    /// target.add(PathFilterSet::new("/apps/foo").unwrap());
    ///
    /// let mut other = WorkspaceFilter::new();
    /// other.add(PathFilterSet::new("/apps/foo").unwrap());
    ///
    /// let error = target.merge(other).unwrap_err();
    /// assert!(matches!(error, MergeError::DuplicateRoot { root } if root == "/apps/foo"));
    /// assert_eq!(target.filter_sets().len(), 1);
    /// ```
    pub fn merge(&mut self, other: Self) -> Result<(), MergeError> {
        for set in other.filter_sets() {
            if self
                .filter_sets
                .iter()
                .any(|existing| existing.root() == set.root())
            {
                return Err(MergeError::DuplicateRoot {
                    root: set.root().to_owned(),
                });
            }
        }

        debug_filter::trace_merge(other.filter_sets.len());
        self.filter_sets.extend(other.filter_sets);
        self.source = None;
        Ok(())
    }
}

impl Default for WorkspaceFilter {
    fn default() -> Self {
        Self::new()
    }
}
