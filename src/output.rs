//! Run summaries for `clean-file`.
//!
//! A finished run is logged once, either as structured fields or as a JSON
//! document, and can be appended to a CSV run log that keeps one row per
//! cleaned file.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::CleanStats;

/// One row of the CSV run log.
#[derive(Debug, Serialize)]
struct RunLogRow<'a> {
    timestamp: String,
    kind: &'static str,
    file: &'a str,
    records: usize,
    excluded: usize,
    excluded_pct: f64,
    written: usize,
    changed_fields: usize,
}

impl<'a> From<&'a CleanStats> for RunLogRow<'a> {
    fn from(stats: &'a CleanStats) -> Self {
        RunLogRow {
            timestamp: stats.timestamp.to_rfc3339(),
            kind: stats.kind.map(|kind| kind.file_name()).unwrap_or_default(),
            file: stats.file.as_deref().unwrap_or_default(),
            records: stats.records,
            excluded: stats.excluded,
            // one decimal is enough for a run log
            excluded_pct: (stats.excluded_pct() * 10.0).round() / 10.0,
            written: stats.written,
            changed_fields: stats.changed_fields,
        }
    }
}

/// Logs the outcome of a run; `json` switches to a single JSON document.
pub fn log_summary(stats: &CleanStats, json: bool) -> Result<()> {
    if json {
        info!(summary = %serde_json::to_string(stats)?, "Clean summary");
        return Ok(());
    }

    let row = RunLogRow::from(stats);
    info!(
        kind = row.kind,
        file = row.file,
        records = row.records,
        excluded = row.excluded,
        excluded_pct = row.excluded_pct,
        written = row.written,
        changed_fields = row.changed_fields,
        "Clean summary"
    );
    debug!(
        route_long_names = stats.route_long_names,
        route_colors = stats.route_colors,
        trip_headsigns = stats.trip_headsigns,
        direction_labels = stats.direction_labels,
        stop_names = stats.stop_names,
        "Changed fields by column"
    );
    Ok(())
}

/// Appends one row for `stats` to the CSV run log at `path`.
///
/// The header is written only when the log is new or empty.
pub fn append_run_log(path: &Path, stats: &CleanStats) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open run log {}", path.display()))?;
    let is_empty = file.metadata()?.len() == 0;
    debug!(path = %path.display(), is_empty, "Appending run log row");

    let mut writer = WriterBuilder::new()
        .has_headers(is_empty)
        .from_writer(file);
    writer.serialize(RunLogRow::from(stats))?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileKind;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn trips_run() -> CleanStats {
        let mut stats = CleanStats::new(FileKind::Trips).with_file("in/trips.txt");
        stats.records = 8;
        stats.excluded = 2;
        stats.written = 6;
        stats.changed_fields = 5;
        stats
    }

    #[test]
    fn test_row_from_stats() {
        let stats = trips_run();
        let row = RunLogRow::from(&stats);

        assert_eq!(row.kind, "trips.txt");
        assert_eq!(row.file, "in/trips.txt");
        assert_eq!(row.excluded_pct, 25.0);
        assert_eq!(row.written, 6);
    }

    #[test]
    fn test_row_rounds_pct_and_defaults_missing_fields() {
        let stats = CleanStats {
            records: 3,
            excluded: 1,
            ..Default::default()
        };
        let row = RunLogRow::from(&stats);

        assert_eq!(row.kind, "");
        assert_eq!(row.file, "");
        assert_eq!(row.excluded_pct, 33.3);
    }

    #[test]
    fn test_log_summary_both_modes() {
        let stats = trips_run();
        log_summary(&stats, false).unwrap();
        log_summary(&stats, true).unwrap();
    }

    #[test]
    fn test_append_run_log_rows() {
        let path = temp_path("ttc_bus_cleaner_run_log.csv");
        let _ = fs::remove_file(&path);

        append_run_log(&path, &trips_run()).unwrap();
        let mut stops = CleanStats::new(FileKind::Stops).with_file("in/stops.txt");
        stops.records = 4;
        stops.written = 4;
        append_run_log(&path, &stops).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            rdr.headers().unwrap().iter().collect::<Vec<_>>(),
            vec![
                "timestamp",
                "kind",
                "file",
                "records",
                "excluded",
                "excluded_pct",
                "written",
                "changed_fields"
            ]
        );
        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        let fields = |row: &csv::StringRecord| row.iter().skip(1).map(str::to_string).collect::<Vec<_>>();
        assert_eq!(fields(&rows[0]), ["trips.txt", "in/trips.txt", "8", "2", "25.0", "6", "5"]);
        assert_eq!(fields(&rows[1]), ["stops.txt", "in/stops.txt", "4", "0", "0.0", "4", "0"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_run_log_to_empty_file_writes_header() {
        let path = temp_path("ttc_bus_cleaner_run_log_empty.csv");
        fs::write(&path, "").unwrap();

        append_run_log(&path, &trips_run()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("timestamp,kind,file,"));
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
