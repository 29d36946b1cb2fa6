//! Cleans one GTFS text file at a time.
//!
//! Rows are read as raw CSV records so every column the cleaners do not
//! touch is written back unchanged. When the agency derives direction
//! labels, trips gain a trailing `direction_headsign` column holding the
//! corrected compass label.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use csv::StringRecord;
use serde::Serialize;
use tracing::info;

use crate::agency::AgencyTools;
use crate::records::{Route, Stop, Trip};
use crate::route_key::RouteKey;
use crate::stats::CleanStats;

pub const DIRECTION_HEADSIGN: &str = "direction_headsign";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Routes,
    Trips,
    Stops,
}

impl FileKind {
    pub fn file_name(self) -> &'static str {
        match self {
            FileKind::Routes => "routes.txt",
            FileKind::Trips => "trips.txt",
            FileKind::Stops => "stops.txt",
        }
    }
}

/// Reads `kind` rows from `reader`, cleans them with `agency` and writes the
/// kept rows to `writer`.
#[tracing::instrument(skip(agency, reader, writer), fields(agency = agency.agency_name()))]
pub fn clean_file<A, R, W>(agency: &A, kind: FileKind, reader: R, writer: W) -> Result<CleanStats>
where
    A: AgencyTools,
    R: Read,
    W: Write,
{
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: StringRecord = rdr
        .headers()
        .with_context(|| format!("failed to read {} header", kind.file_name()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();

    let with_direction = kind == FileKind::Trips && agency.direction_finder_enabled();
    let mut out_headers = headers.clone();
    if with_direction {
        out_headers.push_field(DIRECTION_HEADSIGN);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&out_headers)?;

    let mut stats = CleanStats::new(kind);

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        stats.records += 1;

        let cleaned = match kind {
            FileKind::Routes => clean_route(agency, &headers, record, &mut stats),
            FileKind::Trips => clean_trip(agency, &headers, record, with_direction, &mut stats),
            FileKind::Stops => clean_stop(agency, &headers, record, &mut stats),
        }
        // +2: one for the header, one for 1-based line numbers
        .with_context(|| format!("invalid {} line {}", kind.file_name(), row + 2))?;

        match cleaned {
            Some(record) => {
                wtr.write_record(&record)?;
                stats.written += 1;
            }
            None => stats.excluded += 1,
        }
    }

    wtr.flush()?;

    info!(
        records = stats.records,
        excluded = stats.excluded,
        changed_fields = stats.changed_fields,
        "File cleaned"
    );

    Ok(stats)
}

fn clean_route<A: AgencyTools>(
    agency: &A,
    headers: &StringRecord,
    mut record: StringRecord,
    stats: &mut CleanStats,
) -> Result<Option<StringRecord>> {
    let route: Route = record.deserialize(Some(headers))?;

    if let Some(i) = column(headers, "route_long_name") {
        let name = agency.clean_route_long_name(route.route_long_name_or_default());
        if replace_field(&mut record, i, &name) {
            stats.route_long_names += 1;
            stats.changed_fields += 1;
        }
    }

    if let Some(i) = column(headers, "route_color") {
        let color = agency
            .fix_color(route.route_color.as_deref())
            .unwrap_or_else(|| agency.agency_color().to_string());
        if replace_field(&mut record, i, &color) {
            stats.route_colors += 1;
            stats.changed_fields += 1;
        }
    }

    Ok(Some(record))
}

fn clean_trip<A: AgencyTools>(
    agency: &A,
    headers: &StringRecord,
    mut record: StringRecord,
    with_direction: bool,
    stats: &mut CleanStats,
) -> Result<Option<StringRecord>> {
    let trip: Trip = record.deserialize(Some(headers))?;

    if agency.exclude_trip(&trip) {
        return Ok(None);
    }

    if let Some(i) = column(headers, "trip_headsign") {
        let headsign = agency.clean_trip_headsign(trip.trip_headsign_or_default());
        if replace_field(&mut record, i, &headsign) {
            stats.trip_headsigns += 1;
            stats.changed_fields += 1;
        }
    }

    if !with_direction {
        return Ok(Some(record));
    }

    // Raw headsign: the override lookup needs the "EAST - 84" prefix.
    let direction = match trip.direction_id {
        Some(direction_id) => agency.clean_direction_headsign(
            &RouteKey::default(),
            direction_id,
            false,
            trip.trip_headsign_or_default(),
        ),
        None => String::new(),
    };
    if !direction.is_empty() {
        stats.direction_labels += 1;
    }
    record.push_field(&direction);

    Ok(Some(record))
}

fn clean_stop<A: AgencyTools>(
    agency: &A,
    headers: &StringRecord,
    mut record: StringRecord,
    stats: &mut CleanStats,
) -> Result<Option<StringRecord>> {
    let stop: Stop = record.deserialize(Some(headers))?;

    if let Some(i) = column(headers, "stop_name") {
        let name = agency.clean_stop_name(&stop.stop_name);
        if replace_field(&mut record, i, &name) {
            stats.stop_names += 1;
            stats.changed_fields += 1;
        }
    }

    Ok(Some(record))
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Sets field `index` to `value`; returns whether the value changed.
fn replace_field(record: &mut StringRecord, index: usize, value: &str) -> bool {
    if record.get(index) == Some(value) {
        return false;
    }
    let updated: StringRecord = record
        .iter()
        .enumerate()
        .map(|(i, field)| if i == index { value } else { field })
        .collect();
    *record = updated;
    true
}
