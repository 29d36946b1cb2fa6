//! GTFS records as read from the schedule text files.
//!
//! Only the columns the cleaners look at are modelled; unknown columns are
//! ignored on deserialization and carried through untouched by
//! [`crate::batch`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The feed's `direction_id`.
///
/// Nominally 0 and 1 are opposite directions of travel, but some routes
/// report both physical directions under the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DirectionId {
    Outbound,
    Inbound,
}

/// A `direction_id` outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirectionId(pub u8);

impl fmt::Display for InvalidDirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction_id {} (expected 0 or 1)", self.0)
    }
}

impl std::error::Error for InvalidDirectionId {}

impl TryFrom<u8> for DirectionId {
    type Error = InvalidDirectionId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DirectionId::Outbound),
            1 => Ok(DirectionId::Inbound),
            other => Err(InvalidDirectionId(other)),
        }
    }
}

impl From<DirectionId> for u8 {
    fn from(id: DirectionId) -> Self {
        match id {
            DirectionId::Outbound => 0,
            DirectionId::Inbound => 1,
        }
    }
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: Option<String>,
    #[serde(default)]
    pub route_color: Option<String>,
}

impl Route {
    pub fn route_long_name_or_default(&self) -> &str {
        self.route_long_name.as_deref().unwrap_or_default()
    }
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Trip {
    pub route_id: String,
    #[serde(default)]
    pub service_id: String,
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub direction_id: Option<DirectionId>,
}

impl Trip {
    pub fn trip_headsign_or_default(&self) -> &str {
        self.trip_headsign.as_deref().unwrap_or_default()
    }
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: String,
    #[serde(default)]
    pub stop_sequence: u32,
    #[serde(default)]
    pub stop_headsign: Option<String>,
}

impl StopTime {
    pub fn stop_headsign_or_default(&self) -> &str {
        self.stop_headsign.as_deref().unwrap_or_default()
    }
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stop {
    pub stop_id: String,
    #[serde(default)]
    pub stop_code: Option<String>,
    #[serde(default)]
    pub stop_name: String,
}
