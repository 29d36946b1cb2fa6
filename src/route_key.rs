//! Route short name extraction from headsign text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static LEADING_ROUTE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([[:alnum:]]*)\s*-\s*(\d+)\s*.*$").expect("Invalid regex")
});

/// A route's public short name, used only as an override lookup key.
///
/// The empty key means "no route number found" and never matches an
/// override.
///
/// # Examples
///
/// ```
/// use ttc_bus_cleaner::RouteKey;
///
/// assert_eq!(RouteKey::extract("East - 84 Sheppard West").as_str(), "84");
/// assert!(RouteKey::extract("Sheppard West").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn new(route_short_name: impl Into<String>) -> Self {
        Self(route_short_name.into().trim().to_string())
    }

    /// Pulls the route number out of a "PREFIX - 123 ..." headsign.
    ///
    /// Most headsigns carry no route number, in which case the empty key is
    /// returned.
    pub fn extract(headsign: &str) -> Self {
        LEADING_ROUTE_NUMBER
            .captures(headsign)
            .and_then(|caps| caps.get(2))
            .map(|m| Self(m.as_str().to_string()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RouteKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
