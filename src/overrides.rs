//! Per-route direction label corrections.
//!
//! Some routes report both physical directions under the same
//! `direction_id`, so the compass label the feed gives one of them is wrong.
//! Each [`OverrideRule`] maps `(route, direction_id, observed label)` to the
//! label riders should see. The rules are plain data: the built-in set ships
//! in `data/direction_overrides.json` and a replacement table can be loaded
//! from a file of the same shape:
//!
//! ```json
//! {
//!   "version": "2024-12-31",
//!   "rules": [
//!     { "routes": ["332", "352"], "direction_id": 1, "observed": "east", "corrected": "West" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::records::DirectionId;
use crate::route_key::RouteKey;

const BUILTIN_JSON: &str = include_str!("../data/direction_overrides.json");

static BUILTIN: LazyLock<OverrideTable> = LazyLock::new(|| {
    OverrideTable::from_json(BUILTIN_JSON).expect("Invalid built-in direction overrides")
});

/// One curated correction. A rule listing several routes applies to each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub routes: Vec<String>,
    pub direction_id: DirectionId,
    pub observed: String,
    pub corrected: String,
    /// When the feed defect was last seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct OverrideFile {
    version: String,
    rules: Vec<OverrideRule>,
}

type OverrideKey = (RouteKey, DirectionId, String);

/// Read-only lookup built from a set of [`OverrideRule`]s.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    version: String,
    entries: HashMap<OverrideKey, String>,
}

impl OverrideTable {
    /// The table shipped with the crate, parsed once per process.
    pub fn builtin() -> &'static OverrideTable {
        &BUILTIN
    }

    /// Loads a table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read direction overrides '{path}'"))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid direction overrides in '{path}'"))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: OverrideFile = serde_json::from_str(json)?;
        Self::from_rules(file.version, file.rules)
    }

    /// Expands multi-route rules into one entry per route.
    ///
    /// Observed labels are stored lower-cased. A later rule for the same key
    /// replaces an earlier one.
    pub fn from_rules(version: impl Into<String>, rules: Vec<OverrideRule>) -> Result<Self> {
        let mut entries = HashMap::new();

        for rule in rules {
            let observed = rule.observed.trim().to_lowercase();
            let corrected = rule.corrected.trim();
            if observed.is_empty() || corrected.is_empty() {
                bail!("override rule for routes {:?} has an empty label", rule.routes);
            }
            if rule.routes.is_empty() {
                bail!("override rule '{observed}' -> '{corrected}' lists no routes");
            }

            for route in &rule.routes {
                let key = (RouteKey::new(route.as_str()), rule.direction_id, observed.clone());
                if let Some(previous) = entries.insert(key, corrected.to_string()) {
                    warn!(route = %route, observed = %observed, previous = %previous, "Duplicate direction override replaced");
                }
            }
        }

        Ok(Self {
            version: version.into(),
            entries,
        })
    }

    /// Returns the corrected label for `observed` (compared case-insensitively).
    pub fn lookup(&self, route: &RouteKey, direction_id: DirectionId, observed: &str) -> Option<&str> {
        if route.is_empty() {
            return None;
        }
        let key = (route.clone(), direction_id, observed.trim().to_lowercase());
        self.entries.get(&key).map(String::as_str)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
