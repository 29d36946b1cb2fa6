use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::batch::FileKind;

#[derive(Debug, Default, Serialize)]
pub struct CleanStats {
    pub timestamp: DateTime<Utc>,
    pub file: Option<String>,
    pub kind: Option<FileKind>,

    // records
    pub records: usize,
    pub excluded: usize,
    pub written: usize,

    // field changes
    pub changed_fields: usize,
    pub route_long_names: usize,
    pub route_colors: usize,
    pub trip_headsigns: usize,
    pub direction_labels: usize,
    pub stop_names: usize,
}

impl CleanStats {
    pub fn new(kind: FileKind) -> Self {
        CleanStats {
            timestamp: Utc::now(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn excluded_pct(&self) -> f64 {
        Self::pct(self.excluded, self.records)
    }

    /// Set the source file name
    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(CleanStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(CleanStats::pct(50, 100), 50.0);
        assert_eq!(CleanStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_excluded_pct() {
        let mut stats = CleanStats::new(FileKind::Trips);
        stats.records = 200;
        stats.excluded = 50;

        assert_eq!(stats.excluded_pct(), 25.0);
    }

    #[test]
    fn test_with_file() {
        let stats = CleanStats::new(FileKind::Stops).with_file("stops.txt");
        assert_eq!(stats.file.as_deref(), Some("stops.txt"));
        assert_eq!(stats.kind, Some(FileKind::Stops));
    }
}
