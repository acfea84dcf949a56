//! Occupancy source abstraction

use async_trait::async_trait;
use occupancy_types::Reading;

/// Something that can report the current headcount of a space.
///
/// Implementations never fail: every problem is folded into
/// [`Reading::Unavailable`] so callers can keep going with the next room.
#[async_trait]
pub trait OccupancySource: Send + Sync {
    /// Fetch the current occupancy of `space_id`.
    async fn fetch(&self, space_id: &str) -> Reading;
}

