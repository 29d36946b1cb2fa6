//! Direction labels: choosing between two candidates and correcting the
//! compass label of routes whose feed mixes up its `direction_id`s.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::overrides::OverrideTable;
use crate::patterns::labels::{clean_label, title_case};
use crate::records::DirectionId;
use crate::route_key::RouteKey;

/// Marks a branch ("L Downtown") rather than a direction.
const BRANCH_PREFIX: &str = "L ";

static COMPASS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:east|west|north|south)$").expect("Invalid regex"));

// "East - 84 Sheppard West towards ..." -> "East", "SOUTH-900 ..." -> "SOUTH".
// The dash must be followed by a space or by the route number, so a
// hyphenated name such as "Sheppard-Yonge" is left whole.
static COMPASS_BEFORE_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z]{4,5})\s*-(?:\s|\d).*$").expect("Invalid regex")
});

/// Outcome of comparing two direction headsign candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    First,
    Second,
    /// Nothing tells the candidates apart; the caller keeps its default.
    Undecided,
}

impl Selection {
    /// Returns the chosen candidate, if any.
    pub fn pick<'a>(self, first: Option<&'a str>, second: Option<&'a str>) -> Option<&'a str> {
        match self {
            Selection::First => first,
            Selection::Second => second,
            Selection::Undecided => None,
        }
    }
}

/// Chooses which of two cleaned headsigns should label the direction.
///
/// First matching rule wins:
/// 1. identical candidates cannot be told apart;
/// 2. a branch-prefixed candidate loses to one without the prefix;
/// 3. a bare compass word beats anything else;
/// 4. otherwise undecided.
pub fn select_direction_headsign(first: Option<&str>, second: Option<&str>) -> Selection {
    if first == second {
        return Selection::Undecided;
    }

    let is_branch = |h: Option<&str>| h.is_some_and(|h| h.starts_with(BRANCH_PREFIX));
    match (is_branch(first), is_branch(second)) {
        (true, false) => return Selection::Second,
        (false, true) => return Selection::First,
        _ => {}
    }

    let is_compass = |h: Option<&str>| h.is_some_and(|h| COMPASS_ONLY.is_match(h));
    match (is_compass(first), is_compass(second)) {
        (true, false) => Selection::First,
        (false, true) => Selection::Second,
        _ => Selection::Undecided,
    }
}

/// Rewrites direction headsigns, applying per-route corrections first.
#[derive(Debug, Clone)]
pub struct DirectionNormalizer {
    overrides: OverrideTable,
}

impl Default for DirectionNormalizer {
    fn default() -> Self {
        Self::new(OverrideTable::builtin().clone())
    }
}

impl DirectionNormalizer {
    pub fn new(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Cleans a direction headsign, keying overrides on the route number
    /// found in the text itself.
    pub fn clean(&self, direction_id: DirectionId, from_stop_name: bool, headsign: &str) -> String {
        self.clean_for_route(&RouteKey::default(), direction_id, from_stop_name, headsign)
    }

    /// Like [`DirectionNormalizer::clean`], falling back to `route` when the
    /// text carries no route number.
    ///
    /// A matching override is returned as is; otherwise the compass
    /// remainder is title-cased and label-cleaned.
    pub fn clean_for_route(
        &self,
        route: &RouteKey,
        direction_id: DirectionId,
        from_stop_name: bool,
        headsign: &str,
    ) -> String {
        let extracted = RouteKey::extract(headsign);
        let route = if extracted.is_empty() { route } else { &extracted };

        let remainder = COMPASS_BEFORE_DASH.replace(headsign, "${1}");

        if let Some(corrected) = self.overrides.lookup(route, direction_id, &remainder) {
            debug!(
                route = %route,
                ?direction_id,
                from_stop_name,
                observed = %remainder.trim(),
                corrected,
                "Direction override applied"
            );
            return corrected.to_string();
        }

        clean_label(&title_case(&remainder, &[]))
    }
}
