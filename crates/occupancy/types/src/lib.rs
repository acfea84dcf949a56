//! Occupancy Types - core data model for the occupancy reporting client
//!
//! This crate defines the types shared by the fetcher and the renderer:
//! - [`RoomConfig`] and [`Roster`]: the static description of monitored rooms
//! - [`Credential`]: the bearer token used against the Density API
//! - [`Reading`] and [`FetchFailure`]: the tagged outcome of one fetch

pub mod credential;
pub mod error;
pub mod reading;
pub mod room;

pub use credential::Credential;
pub use error::{TypesError, TypesResult};
pub use reading::{FetchFailure, Reading};
pub use room::{RoomConfig, Roster, BUILTIN_ROOMS};
