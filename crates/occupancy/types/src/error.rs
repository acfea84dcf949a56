//! Error types for occupancy-types crate.

use thiserror::Error;

/// Errors raised while building room configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// A room was configured with a maximum capacity of zero.
    #[error("room {room:?} has max_capacity 0; capacity must be at least 1")]
    ZeroCapacity {
        /// Display name of the offending room.
        room: String,
    },

    /// A room was configured without a display name.
    #[error("room name must not be empty (space id {space_id:?})")]
    EmptyRoomName {
        /// Space identifier of the offending room.
        space_id: String,
    },
}

/// Result type for type construction.
pub type TypesResult<T> = Result<T, TypesError>;
