//! Headsign cleaning for trips, stop times and direction labels.
//!
//! Direction headsigns go through [`DirectionNormalizer`] before any generic
//! cleaning: a matching override is already canonical and must not be
//! cleaned again.

pub mod direction;
pub mod stop;
pub mod trip;

pub use direction::{DirectionNormalizer, Selection, select_direction_headsign};
pub use stop::clean_stop_headsign;
pub use trip::clean_trip_headsign;
