//! Occupancy readings
//!
//! One [`Reading`] is produced per room per pass. A failed fetch is a value,
//! not an error, so one bad room never stops the rest of the report.

use thiserror::Error;

/// Outcome of fetching the occupancy of one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    /// Current number of occupants.
    Count(u64),
    /// The count could not be obtained.
    Unavailable(FetchFailure),
}

impl Reading {
    pub fn count(&self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Unavailable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Count(_) => None,
            Self::Unavailable(failure) => Some(failure),
        }
    }
}

impl From<FetchFailure> for Reading {
    fn from(failure: FetchFailure) -> Self {
        Self::Unavailable(failure)
    }
}

/// Why a reading is unavailable.
///
/// The `Display` text is what the report prints in place of the count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// No bearer token configured; no request was made.
    #[error("Missing Token")]
    MissingToken,

    /// The room has no space identifier; no request was made.
    #[error("Error: space id is empty")]
    EmptySpaceId,

    /// The API answered with a non-success status.
    #[error("Error: HTTP {status} {reason}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// The request failed or the body could not be decoded.
    #[error("Error: {0}")]
    Transport(String),

    /// The body decoded but carried no usable `count`.
    #[error("No count in response")]
    MalformedResponse(String),
}
