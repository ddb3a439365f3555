#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `treepack-filters` provides the workspace filter engine used when
//! hierarchical content trees are assembled into packages. A filter decides,
//! for any repository path, whether it is included in the package, whether it
//! is covered by the packaging operation at all, and whether a directory must
//! be descended into because selected content lies below it. The engine is
//! independent of any build tool: callers supply paths one at a time and the
//! engine answers from an in-memory rule model with a stable XML wire form.
//!
//! # Design
//!
//! - [`PathMatcher`] wraps a single pattern, compiled once into an anchored
//!   regular expression; only full-string matches count. The [`Matches`]
//!   trait is the seam the rule machinery is generic over.
//! - [`RuleSet`] is an insertion-ordered sequence of include/exclude entries
//!   with last-match-wins evaluation; the default for non-matching keys is
//!   derived from the first entry's polarity.
//! - [`PathFilterSet`] scopes a rule set to an absolute root and adds the
//!   hierarchy queries `contains`, `covers` and `is_ancestor`, plus the
//!   persisted [`ImportMode`] and cleanup attributes.
//! - [`StringFilterSet`] is the flat flavor fed from comma-separated entry
//!   lists where a leading `~` marks an exclude.
//! - [`WorkspaceFilter`] owns the ordered collection of path filter sets,
//!   the process-wide ignore matcher, and the load/save machinery with its
//!   invalidated-on-write source cache.
//!
//! # Invariants
//!
//! - Rule entries are evaluated in registration order and the last matching
//!   entry wins; an empty rule set accepts everything below its root.
//! - A filter set's root is fixed at construction and always absolute.
//! - A loaded document's version must not exceed
//!   [`WorkspaceFilter::SUPPORTED_VERSION`].
//! - Serialization is deterministic; the emitted byte sequence is part of
//!   the wire contract and safe to diff or hash.
//!
//! # Errors
//!
//! Construction-time validation fails with [`ConfigError`], loading a
//! serialized document fails with [`ParseError`], and merging two filters
//! with a shared root fails with [`MergeError`]. All failures carry the
//! offending pattern, root or version and are deterministic; nothing is
//! retried.
//!
//! # Examples
//!
//! Build a filter covering an application sub-tree while keeping its
//! `install` folder out of the package:
//!
//! ```
//! use treepack_filters::{PathFilterSet, PathMatcher, WorkspaceFilter};
//!
//! let mut set = PathFilterSet::new("/apps/site").unwrap();
//! set.add_include(PathMatcher::new("/apps/site(/.*)?").unwrap());
//! set.add_exclude(PathMatcher::new("/apps/site/install(/.*)?").unwrap());
//!
//! let mut filter = WorkspaceFilter::new();
//! filter.add(set);
//!
//! assert!(filter.contains("/apps/site/components/page"));
//! assert!(!filter.contains("/apps/site/install/bundle.jar"));
//!
//! // Ancestors stay reachable for traversal even though they are not
//! // included themselves.
//! assert!(filter.covers("/apps"));
//! assert!(filter.is_ancestor("/apps"));
//! ```
//!
//! # See also
//!
//! - [`debug_filter`] for feature-gated evaluation tracing.
//! - [`vcs`] for the stock globally-ignored pattern.

mod action;
pub mod debug_filter;
mod error;
mod matcher;
mod mode;
mod rule;
mod rules;
mod set;
mod string_set;
pub mod vcs;
mod workspace;
mod xml;

pub use action::RuleAction;
pub use error::{ConfigError, MergeError, ParseError};
pub use matcher::{Matches, PathMatcher};
pub use mode::ImportMode;
pub use rule::Rule;
pub use rules::RuleSet;
pub use set::PathFilterSet;
pub use string_set::StringFilterSet;
pub use workspace::WorkspaceFilter;
