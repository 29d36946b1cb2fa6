//! Agency hooks called by the schedule importer.
//!
//! [`AgencyTools`] is the surface the importer drives for every record it
//! reads; its default methods are the importer's generic behaviour.
//! [`TtcBus`] plugs in the TTC bus cleaning rules.

use tracing::trace;

use crate::headsign::{
    DirectionNormalizer, Selection, clean_stop_headsign, clean_trip_headsign,
    select_direction_headsign,
};
use crate::overrides::OverrideTable;
use crate::patterns::labels::{clean_label, fix_mc_case, title_case};
use crate::records::{DirectionId, Route, StopTime, Trip};
use crate::route_key::RouteKey;
use crate::stop_name::clean_stop_name;

/// GTFS `route_type` for buses.
pub const ROUTE_TYPE_BUS: u16 = 3;

/// What the direction label of a trip is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionHeadsignType {
    /// The trip headsign itself.
    Headsign,
    /// A compass label ("North").
    Direction,
}

/// Hooks the importer calls while reading one agency's feed.
pub trait AgencyTools {
    fn agency_name(&self) -> &str;

    /// Six hex digits, no leading `#`.
    fn agency_color(&self) -> &str;

    fn route_type(&self) -> u16;

    fn exclude_trip(&self, _trip: &Trip) -> bool {
        false
    }

    fn exclude_stop_time(&self, _stop_time: &StopTime) -> bool {
        false
    }

    /// Normalizes a route color, `None` meaning "use the agency color".
    fn fix_color(&self, color: Option<&str>) -> Option<String> {
        normalize_hex_color(color)
    }

    fn clean_route_long_name(&self, route_long_name: &str) -> String {
        clean_label(route_long_name)
    }

    fn clean_trip_headsign(&self, trip_headsign: &str) -> String {
        clean_label(trip_headsign)
    }

    fn clean_stop_headsign(&self, _route: &Route, stop_headsign: &str) -> String {
        self.clean_trip_headsign(stop_headsign)
    }

    fn clean_direction_headsign(
        &self,
        _route: &RouteKey,
        _direction_id: DirectionId,
        _from_stop_name: bool,
        direction_headsign: &str,
    ) -> String {
        clean_label(direction_headsign)
    }

    fn select_direction_headsign(&self, _first: Option<&str>, _second: Option<&str>) -> Selection {
        Selection::Undecided
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        clean_label(stop_name)
    }

    /// Whether the importer derives a per-trip direction label.
    fn direction_finder_enabled(&self) -> bool {
        false
    }

    fn direction_headsign_type(&self) -> DirectionHeadsignType {
        DirectionHeadsignType::Headsign
    }

    /// Routes whose directions the importer must split itself because the
    /// feed reports them under a single `direction_id`.
    fn direction_splitter_enabled(&self, _route_id: &str) -> bool {
        false
    }
}

/// Returns `color` as six upper-case hex digits, or `None` when it is
/// missing or not a hex color.
pub fn normalize_hex_color(color: Option<&str>) -> Option<String> {
    let color = color?.trim().trim_start_matches('#');
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(color.to_ascii_uppercase())
    } else {
        None
    }
}

/// True when `headsign` is exactly "not in service", ignoring case and
/// surrounding whitespace.
pub fn is_not_in_service(headsign: &str) -> bool {
    headsign.trim().eq_ignore_ascii_case("not in service")
}

/// Toronto Transit Commission buses.
#[derive(Debug, Clone, Default)]
pub struct TtcBus {
    directions: DirectionNormalizer,
}

impl TtcBus {
    pub const NAME: &'static str = "TTC";
    pub const COLOR: &'static str = "DA251D";

    /// Route 101 reports NORTH and SOUTH under direction id 1 (seen 2024-09-05).
    const SPLIT_DIRECTION_ROUTES: &'static [&'static str] = &["101"];

    pub fn new(overrides: OverrideTable) -> Self {
        Self {
            directions: DirectionNormalizer::new(overrides),
        }
    }

    pub fn overrides(&self) -> &OverrideTable {
        self.directions.overrides()
    }
}

impl AgencyTools for TtcBus {
    fn agency_name(&self) -> &str {
        Self::NAME
    }

    fn agency_color(&self) -> &str {
        Self::COLOR
    }

    fn route_type(&self) -> u16 {
        ROUTE_TYPE_BUS
    }

    fn exclude_trip(&self, trip: &Trip) -> bool {
        let excluded = is_not_in_service(trip.trip_headsign_or_default());
        if excluded {
            trace!(trip_id = %trip.trip_id, "Excluding trip not in service");
        }
        excluded
    }

    fn exclude_stop_time(&self, stop_time: &StopTime) -> bool {
        let excluded = is_not_in_service(stop_time.stop_headsign_or_default());
        if excluded {
            trace!(trip_id = %stop_time.trip_id, stop_id = %stop_time.stop_id, "Excluding stop time not in service");
        }
        excluded
    }

    fn clean_route_long_name(&self, route_long_name: &str) -> String {
        let name = title_case(route_long_name, &[]);
        clean_label(&fix_mc_case(&name))
    }

    fn clean_trip_headsign(&self, trip_headsign: &str) -> String {
        clean_trip_headsign(trip_headsign)
    }

    fn clean_stop_headsign(&self, route: &Route, stop_headsign: &str) -> String {
        clean_stop_headsign(
            &route.route_short_name,
            route.route_long_name_or_default(),
            stop_headsign,
        )
    }

    fn clean_direction_headsign(
        &self,
        route: &RouteKey,
        direction_id: DirectionId,
        from_stop_name: bool,
        direction_headsign: &str,
    ) -> String {
        self.directions
            .clean_for_route(route, direction_id, from_stop_name, direction_headsign)
    }

    fn select_direction_headsign(&self, first: Option<&str>, second: Option<&str>) -> Selection {
        select_direction_headsign(first, second)
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        clean_stop_name(stop_name)
    }

    fn direction_finder_enabled(&self) -> bool {
        true
    }

    fn direction_headsign_type(&self) -> DirectionHeadsignType {
        DirectionHeadsignType::Direction
    }

    fn direction_splitter_enabled(&self, route_id: &str) -> bool {
        Self::SPLIT_DIRECTION_ROUTES.contains(&route_id.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(headsign: Option<&str>) -> Trip {
        Trip {
            route_id: "84".to_string(),
            trip_id: "T1".to_string(),
            trip_headsign: headsign.map(str::to_string),
            ..Default::default()
        }
    }

    fn stop_time(headsign: Option<&str>) -> StopTime {
        StopTime {
            trip_id: "T1".to_string(),
            stop_id: "S1".to_string(),
            stop_headsign: headsign.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_exclude_not_in_service_any_case() {
        let agency = TtcBus::default();
        assert!(agency.exclude_trip(&trip(Some("Not In Service"))));
        assert!(agency.exclude_trip(&trip(Some("NOT IN SERVICE"))));
        assert!(agency.exclude_trip(&trip(Some("  not in service "))));
        assert!(agency.exclude_stop_time(&stop_time(Some("Not in Service"))));
    }

    #[test]
    fn test_exclude_requires_full_match() {
        let agency = TtcBus::default();
        assert!(!agency.exclude_trip(&trip(Some("Not In Service Extra"))));
        assert!(!agency.exclude_trip(&trip(Some("Kipling Station"))));
        assert!(!agency.exclude_trip(&trip(None)));
        assert!(!agency.exclude_stop_time(&stop_time(None)));
    }

    #[test]
    fn test_default_hooks_keep_everything() {
        struct Generic;
        impl AgencyTools for Generic {
            fn agency_name(&self) -> &str {
                "Generic"
            }
            fn agency_color(&self) -> &str {
                "000000"
            }
            fn route_type(&self) -> u16 {
                ROUTE_TYPE_BUS
            }
        }

        let agency = Generic;
        assert!(!agency.exclude_trip(&trip(Some("Not In Service"))));
        assert_eq!(agency.clean_trip_headsign("  Kipling  Stn "), "Kipling Stn");
        assert_eq!(
            agency.select_direction_headsign(Some("East"), Some("Loop")),
            Selection::Undecided
        );
        assert!(!agency.direction_splitter_enabled("101"));
        assert!(!agency.direction_finder_enabled());
        assert_eq!(agency.direction_headsign_type(), DirectionHeadsignType::Headsign);
    }

    #[test]
    fn test_metadata() {
        let agency = TtcBus::default();
        assert_eq!(agency.agency_name(), "TTC");
        assert_eq!(agency.agency_color(), "DA251D");
        assert_eq!(agency.route_type(), 3);
        assert!(agency.direction_finder_enabled());
        assert_eq!(agency.direction_headsign_type(), DirectionHeadsignType::Direction);
    }

    #[test]
    fn test_fix_color() {
        let agency = TtcBus::default();
        assert_eq!(agency.fix_color(Some("#da251d")), Some("DA251D".to_string()));
        assert_eq!(agency.fix_color(Some(" ff0000 ")), Some("FF0000".to_string()));
        assert_eq!(agency.fix_color(Some("red")), None);
        assert_eq!(agency.fix_color(Some("")), None);
        assert_eq!(agency.fix_color(None), None);
    }

    #[test]
    fn test_route_long_name() {
        let agency = TtcBus::default();
        assert_eq!(agency.clean_route_long_name("MCCOWAN"), "McCowan");
        assert_eq!(agency.clean_route_long_name("LAWRENCE  WEST "), "Lawrence West");
    }

    #[test]
    fn test_stop_headsign_uses_route() {
        let agency = TtcBus::default();
        let route = Route {
            route_id: "52".to_string(),
            route_short_name: "52".to_string(),
            route_long_name: Some("Lawrence West".to_string()),
            route_color: None,
        };
        assert_eq!(
            agency.clean_stop_headsign(&route, "52A Lawrence West towards Lawrence Station"),
            "Lawrence Station"
        );
    }

    #[test]
    fn test_direction_headsign_hook() {
        let agency = TtcBus::default();
        assert_eq!(
            agency.clean_direction_headsign(&RouteKey::from("84"), DirectionId::Inbound, false, "East"),
            "West"
        );
        assert_eq!(
            agency.select_direction_headsign(Some("L Downtown"), Some("Uptown")),
            Selection::Second
        );
    }

    #[test]
    fn test_direction_splitter_routes() {
        let agency = TtcBus::default();
        assert!(agency.direction_splitter_enabled("101"));
        assert!(!agency.direction_splitter_enabled("84"));
    }
}
