//! Text cleaning for the TTC bus schedule feed.
//!
//! Normalizes route names, trip headsigns, stop headsigns and stop names,
//! and corrects the direction labels of routes whose feed reports both
//! directions under one `direction_id`.

pub mod agency;
pub mod batch;
pub mod headsign;
pub mod output;
pub mod overrides;
pub mod patterns;
pub mod records;
pub mod route_key;
pub mod stats;
pub mod stop_name;

pub use agency::{AgencyTools, TtcBus, is_not_in_service};
pub use headsign::{
    DirectionNormalizer, Selection, clean_stop_headsign, clean_trip_headsign,
    select_direction_headsign,
};
pub use overrides::{OverrideRule, OverrideTable};
pub use records::DirectionId;
pub use route_key::RouteKey;
pub use stop_name::clean_stop_name;
