//! Error types surfaced by the workspace filter engine.

use std::io;

use thiserror::Error;

/// Error produced while building filter components from caller input.
///
/// Configuration errors are deterministic input-validation failures. They are
/// surfaced immediately to the caller that constructed the component and are
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The supplied pattern is not valid regular-expression syntax.
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text that failed to compile.
        pattern: String,
        /// Underlying compilation failure.
        source: regex::Error,
    },
    /// A path filter set was constructed with an empty root.
    #[error("filter root must not be empty")]
    EmptyRoot,
    /// A path filter set was constructed with a non-absolute root.
    #[error("filter root '{root}' must be an absolute path")]
    RelativeRoot {
        /// Offending root path.
        root: String,
    },
}

/// Error produced while loading a serialized workspace filter document.
///
/// A failed load leaves the target [`WorkspaceFilter`](crate::WorkspaceFilter)
/// in its prior state; no partial mutation is observable.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the document source failed.
    #[error("failed to read filter document: {0}")]
    Io(#[from] io::Error),
    /// The document is not well-formed XML.
    #[error("malformed filter document: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An attribute could not be decoded.
    #[error("malformed attribute in filter document: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    /// An attribute value contained an invalid escape sequence.
    #[error("invalid escape sequence in filter document: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// The document root element is not `workspaceFilter`.
    #[error("expected root element 'workspaceFilter', found '{found}'")]
    UnexpectedRootElement {
        /// Name of the element that was found instead.
        found: String,
    },
    /// The document contains an element the filter grammar does not define.
    #[error("unexpected element '{element}' in filter document")]
    UnexpectedElement {
        /// Name of the offending element.
        element: String,
    },
    /// The document contains character data outside of any element.
    #[error("unexpected character data in filter document")]
    UnexpectedText,
    /// The `version` attribute is not a floating-point number.
    #[error("invalid filter version '{value}'")]
    InvalidVersion {
        /// Raw attribute value.
        value: String,
    },
    /// The document declares a format version newer than this engine supports.
    #[error("unsupported filter version {version} (supported up to 1.0)")]
    UnsupportedVersion {
        /// Declared document version.
        version: f64,
    },
    /// An `<include>` or `<exclude>` entry has no usable `pattern` attribute.
    #[error("include/exclude entry under root '{root}' is missing a pattern")]
    MissingPattern {
        /// Root of the filter element containing the entry.
        root: String,
    },
    /// The `mode` attribute does not name a known import mode.
    #[error("unknown import mode '{mode}'")]
    InvalidMode {
        /// Raw attribute value.
        mode: String,
    },
    /// The `type` attribute carries a value other than `cleanup`.
    #[error("unknown filter type '{value}'")]
    InvalidType {
        /// Raw attribute value.
        value: String,
    },
    /// A pattern inside the document failed to compile.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error produced when merging two workspace filters collides.
///
/// The merge target is left entirely unmodified when this error is returned.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Both filters declare a set for the same root.
    #[error("duplicate filter root '{root}'")]
    DuplicateRoot {
        /// Root declared by both filters.
        root: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_preserves_pattern_and_source() {
        let source = regex::Regex::new("[").unwrap_err();
        let error = ConfigError::InvalidPattern {
            pattern: "[".to_owned(),
            source,
        };

        assert!(error.to_string().contains("invalid filter pattern '['"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn unsupported_version_names_the_version() {
        let error = ParseError::UnsupportedVersion { version: 2.0 };
        assert!(error.to_string().contains('2'));
    }

    #[test]
    fn duplicate_root_names_the_root() {
        let error = MergeError::DuplicateRoot {
            root: "/apps/foo".to_owned(),
        };
        assert_eq!(error.to_string(), "duplicate filter root '/apps/foo'");
    }
}
