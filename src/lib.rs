//! Rising tides library
//!
//! Floods a fixed elevation grid from its water sources at any query
//! height and reports what stays dry: visible land, land lost between two
//! heights, and the islands left standing.

pub mod error;
pub mod flood;
pub mod synthetic;
pub mod terrain;
pub mod tides;
pub mod tilemap;
pub mod union_find;

pub use error::{ErrorKind, TidesError, TidesResult};
pub use flood::{flooded_regions, SubmersionMask};
pub use terrain::{Cell, Terrain};
pub use tides::{water_levels, Island, LevelSummary, RisingTides};
