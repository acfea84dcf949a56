//! Occupancy Client - fetches live headcounts from the Density API
//!
//! [`OccupancySource`] is the seam the report renderer drives; the
//! production implementation is [`DensityClient`].

pub mod density;
pub mod error;
pub mod source;

pub use density::{DensityClient, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use source::OccupancySource;
