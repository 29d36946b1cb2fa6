//! Stop headsign cleaning.
//!
//! Some stop-level headsigns repeat the route, e.g. "52A Lawrence West
//! towards Lawrence Station" on route 52 "Lawrence West". The route-specific
//! prefix is removed before the generic headsign cleaning runs.

use regex::Regex;
use tracing::warn;

use super::trip::clean_trip_headsign;

/// Builds the "NUMBER[LETTER] [ROUTE LONG NAME]" prefix pattern for one route.
///
/// Only the route's own short name counts as its number, so a destination
/// such as "505 Dundas" is never mistaken for a prefix.
fn route_prefix(short_name: &str, route_long_name: &str) -> Result<Regex, regex::Error> {
    let number = regex::escape(short_name);

    let long_name = route_long_name.trim();
    let long_name = if long_name.is_empty() {
        String::new()
    } else {
        format!(r"(?:\s*{})?", regex::escape(long_name))
    };

    Regex::new(&format!(r"(?i)^\s*{number}(?:([a-z])\b|\b){long_name}\s*"))
}

/// Strips the route's own number and long name from a stop headsign, keeping
/// a branch letter, then applies the generic headsign cleaning.
///
/// Without a route short name there is no prefix to strip.
pub fn clean_stop_headsign(route_short_name: &str, route_long_name: &str, headsign: &str) -> String {
    let short_name = route_short_name.trim();
    if short_name.is_empty() {
        return clean_trip_headsign(headsign);
    }

    let stripped = match route_prefix(short_name, route_long_name) {
        Ok(prefix) => match prefix.captures(headsign) {
            Some(caps) => {
                let rest = caps.get(0).map_or(headsign, |m| &headsign[m.end()..]);
                match caps.get(1) {
                    Some(letter) => format!("{} {}", letter.as_str(), rest),
                    None => rest.to_string(),
                }
            }
            None => headsign.to_string(),
        },
        Err(e) => {
            warn!(route_short_name, route_long_name, error = %e, "Route prefix pattern rejected");
            headsign.to_string()
        }
    };

    clean_trip_headsign(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_number_and_long_name() {
        assert_eq!(
            clean_stop_headsign("52", "Lawrence West", "52 Lawrence West Kipling Station"),
            "Kipling Station"
        );
        assert_eq!(
            clean_stop_headsign("52", "LAWRENCE WEST", "52 lawrence west towards Lawrence Station"),
            "Lawrence Station"
        );
    }

    #[test]
    fn test_keeps_branch_letter() {
        assert_eq!(
            clean_stop_headsign("52", "Lawrence West", "52G Lawrence West Orlando Drive"),
            "G Orlando Drive"
        );
    }

    #[test]
    fn test_number_only_prefix() {
        assert_eq!(clean_stop_headsign("7", "Bathurst", "7 Steeles"), "Steeles");
    }

    #[test]
    fn test_without_prefix_is_generic_cleaning() {
        assert_eq!(
            clean_stop_headsign("52", "Lawrence West", "KIPLING STN"),
            "Kipling Station"
        );
        assert_eq!(clean_stop_headsign("52", "Lawrence West", "1st Avenue"), "1st Avenue");
    }

    #[test]
    fn test_long_name_with_regex_metacharacters() {
        assert_eq!(
            clean_stop_headsign("300", "Bloor-Danforth (Night)", "300 Bloor-Danforth (Night) Kipling"),
            "Kipling"
        );
    }

    #[test]
    fn test_empty_route_names() {
        assert_eq!(clean_stop_headsign("", "", "12 Kingston Rd"), "12 Kingston Road");
        assert_eq!(clean_stop_headsign("", "", ""), "");
    }

    #[test]
    fn test_other_numbers_are_not_prefixes() {
        assert_eq!(clean_stop_headsign("52", "Lawrence West", "505 Dundas"), "505 Dundas");
        assert_eq!(clean_stop_headsign("52", "Lawrence West", "520 Finch"), "520 Finch");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for raw in [
            "52 Lawrence West towards 505 Dundas",
            "52G Lawrence West Orlando Drive",
            "52 LAWRENCE WEST KIPLING STN",
            "52 Lawrence West towards Sheppard - Yonge Station",
        ] {
            let once = clean_stop_headsign("52", "Lawrence West", raw);
            assert_eq!(clean_stop_headsign("52", "Lawrence West", &once), once, "raw: {raw}");
        }
    }
}
