//! Room configuration
//!
//! A [`Roster`] is the ordered list of rooms a report covers. Each entry
//! carries its display name, the Density space identifier and the maximum
//! capacity used to compute the percent-full ratio.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// Built-in room names and capacities, in report order.
///
/// Used when space identifiers come from `ROOM_IDS` rather than a
/// structured roster file.
pub const BUILTIN_ROOMS: [(&str, u32); 5] = [
    ("Weight Rooms (Total)", 150),
    ("Main Weight Room", 80),
    ("Extension Weight Room", 40),
    ("Annex Weight Room", 30),
    ("CMS Fitness Center", 55),
];

/// Static description of one monitored room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoom")]
pub struct RoomConfig {
    #[serde(rename = "name")]
    display_name: String,
    space_id: String,
    max_capacity: NonZeroU32,
}

/// Unvalidated room as it appears in a config file.
#[derive(Deserialize)]
struct RawRoom {
    name: String,
    space_id: String,
    max_capacity: u32,
}

impl TryFrom<RawRoom> for RoomConfig {
    type Error = TypesError;

    fn try_from(raw: RawRoom) -> TypesResult<Self> {
        Self::new(raw.name, raw.space_id, raw.max_capacity)
    }
}

impl RoomConfig {
    /// Create a room, rejecting a zero capacity or an empty name.
    pub fn new(
        display_name: impl Into<String>,
        space_id: impl Into<String>,
        max_capacity: u32,
    ) -> TypesResult<Self> {
        let display_name = display_name.into();
        let space_id = space_id.into();

        if display_name.trim().is_empty() {
            return Err(TypesError::EmptyRoomName { space_id });
        }
        let max_capacity = NonZeroU32::new(max_capacity)
            .ok_or_else(|| TypesError::ZeroCapacity {
                room: display_name.clone(),
            })?;

        Ok(Self {
            display_name,
            space_id,
            max_capacity,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity.get()
    }

    /// Percentage of capacity occupied by `count` people.
    ///
    /// Never divides by zero; may exceed 100 when a room is over capacity.
    pub fn percent_full(&self, count: u64) -> f64 {
        (count as f64 / f64::from(self.max_capacity.get())) * 100.0
    }
}

/// Ordered list of rooms covered by a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    rooms: Vec<RoomConfig>,
}

impl Roster {
    pub fn new(rooms: Vec<RoomConfig>) -> Self {
        Self { rooms }
    }

    /// Pair space identifiers with [`BUILTIN_ROOMS`] by position.
    ///
    /// Pairing stops at the shorter of the two sequences, so extra
    /// identifiers or extra built-in rooms are dropped.
    pub fn builtin_paired<S: AsRef<str>>(space_ids: &[S]) -> Self {
        let rooms = BUILTIN_ROOMS
            .iter()
            .zip(space_ids)
            .filter_map(|(&(name, capacity), space_id)| {
                RoomConfig::new(name, space_id.as_ref(), capacity).ok()
            })
            .collect();

        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoomConfig> {
        self.rooms.iter()
    }

    pub fn rooms(&self) -> &[RoomConfig] {
        &self.rooms
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RoomConfig;
    type IntoIter = std::slice::Iter<'a, RoomConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}
