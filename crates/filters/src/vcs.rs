//! Stock ignore pattern for version-control metadata.
//!
//! Content trees checked out from a working copy carry version-control
//! metadata directories that must never end up in a package. Packaging
//! layers install the stock matcher as the process-wide ignore via
//! [`WorkspaceFilter::set_global_ignored`](crate::WorkspaceFilter::set_global_ignored).

use crate::{ConfigError, PathMatcher};

/// Pattern matching version-control metadata directories at any depth.
pub const DEFAULT_IGNORED: &str = r"(.*/)?\.(svn|git|hg)(/.*)?";

/// Compiles the stock globally-ignored matcher.
///
/// # Errors
///
/// Returns [`ConfigError`] only if the constant pattern fails to compile.
pub fn default_ignored() -> Result<PathMatcher, ConfigError> {
    PathMatcher::new(DEFAULT_IGNORED)
}
