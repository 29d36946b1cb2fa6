//! Trip headsign cleaning.

use std::sync::LazyLock;

use regex::Regex;

use crate::patterns::labels::{
    clean_and, clean_at, clean_label, clean_numbers, clean_street_types, remove_via, title_case,
};
use crate::patterns::{Rewrite, clean_words};

// "EAST - 54A LAWRENCE EAST TOWARDS STARSPRAY": keep the branch letter and
// whatever follows the last "to"/"towards". The route prefix is only
// stripped whole: a compass word, a dash and the route number together.
static LETTER_AND_DESTINATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z]+\s*-\s*\d+(?:/\d+)?(?:([a-z])\b|\b)\s*)?(?:.*\b(?:towards|to)\b\s*)?(.*)$",
    )
    .expect("Invalid regex")
});

static EXTRA_FARE_REQUIRED: LazyLock<Rewrite> =
    LazyLock::new(|| Rewrite::new(r"(?i)(?:\s*-)?\s*\bextra fare required\b.*$", ""));

static SHORT_TURN: LazyLock<Regex> = LazyLock::new(|| clean_words(&["short turn"]));

/// Cleans a raw trip headsign into display text.
///
/// Strips the "DIRECTION - NUMBER" prefix, fare notices, "short turn" and
/// "via" clauses, then normalizes casing, glyphs, street types and numbers.
///
/// ```
/// use ttc_bus_cleaner::clean_trip_headsign;
///
/// assert_eq!(
///     clean_trip_headsign("EAST - 54A LAWRENCE EAST TOWARDS STARSPRAY"),
///     "A Starspray"
/// );
/// ```
pub fn clean_trip_headsign(headsign: &str) -> String {
    let headsign = keep_letter_and_destination(headsign);
    let headsign = EXTRA_FARE_REQUIRED.apply(&headsign);
    let headsign = SHORT_TURN.replace_all(&headsign, "");
    let headsign = remove_via(&headsign);
    let headsign = title_case(&headsign, &[]);
    let headsign = clean_at(&headsign);
    let headsign = clean_and(&headsign);
    let headsign = clean_street_types(&headsign);
    let headsign = clean_numbers(&headsign);
    clean_label(&headsign)
}

/// Strips route prefixes and "towards" clauses until none is left, so a
/// destination that itself reads "to X" ends up as "X" on the first pass.
fn keep_letter_and_destination(headsign: &str) -> String {
    let mut current = headsign.to_string();
    loop {
        let next = strip_prefix_once(&current);
        // Every strip removes at least the matched prefix, so this ends.
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_prefix_once(headsign: &str) -> String {
    let Some(caps) = LETTER_AND_DESTINATION.captures(headsign) else {
        return headsign.to_string();
    };
    let destination = caps.get(2).map_or("", |m| m.as_str());
    match caps.get(1) {
        Some(letter) => format!("{} {}", letter.as_str(), destination),
        None => destination.to_string(),
    }
}
