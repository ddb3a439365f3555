use std::fmt;

/// Polarity applied to a path when a rule matches it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleAction {
    /// Include the matching path.
    Include,
    /// Exclude the matching path.
    Exclude,
}

impl RuleAction {
    /// Returns `true` for [`RuleAction::Include`].
    #[must_use]
    pub const fn is_include(self) -> bool {
        matches!(self, Self::Include)
    }

    /// Returns the polarity with the opposite effect.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Include => Self::Exclude,
            Self::Exclude => Self::Include,
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}
