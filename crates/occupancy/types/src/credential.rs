//! Bearer credential for the Density API

use std::fmt;

/// Process-wide bearer token.
///
/// An unset, empty or whitespace-only token is treated as absent. The
/// token value never appears in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    /// Build a credential from an optional raw value.
    pub fn from_optional(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::from_optional(Some(token.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Credential(<redacted>)"),
            None => f.write_str("Credential(absent)"),
        }
    }
}
