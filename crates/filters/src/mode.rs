use std::fmt;

/// Install-time reconciliation policy persisted on a path filter set.
///
/// The engine only carries the tag; interpreting it against existing content
/// is the installer's concern.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImportMode {
    /// Replace existing content with the package payload.
    #[default]
    Replace,
    /// Merge the package payload into existing content, keeping what is
    /// already there.
    Merge,
    /// Update existing content with the package payload where both exist.
    Update,
    /// Merge properties only, leaving the node structure untouched.
    MergeProperties,
}

impl ImportMode {
    /// Decodes a mode name case-insensitively.
    ///
    /// Returns `None` for names outside the closed set of variants.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "replace" => Some(Self::Replace),
            "merge" => Some(Self::Merge),
            "update" => Some(Self::Update),
            "merge_properties" => Some(Self::MergeProperties),
            _ => None,
        }
    }

    /// Returns the lowercase wire token for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
            Self::Update => "update",
            Self::MergeProperties => "merge_properties",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ImportMode;

    #[test]
    fn display_variants_match_wire_tokens() {
        let cases = [
            (ImportMode::Replace, "replace"),
            (ImportMode::Merge, "merge"),
            (ImportMode::Update, "update"),
            (ImportMode::MergeProperties, "merge_properties"),
        ];

        for (mode, expected) in cases {
            assert_eq!(mode.to_string(), expected);
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(ImportMode::from_name("MERGE"), Some(ImportMode::Merge));
        assert_eq!(ImportMode::from_name("Replace"), Some(ImportMode::Replace));
        assert_eq!(
            ImportMode::from_name("Merge_Properties"),
            Some(ImportMode::MergeProperties)
        );
    }

    #[test]
    fn from_name_rejects_unknown_tokens() {
        assert_eq!(ImportMode::from_name("overwrite"), None);
        assert_eq!(ImportMode::from_name(""), None);
    }

    #[test]
    fn default_is_replace() {
        assert_eq!(ImportMode::default(), ImportMode::Replace);
    }
}
