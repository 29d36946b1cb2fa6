//! CLI entry point for the TTC bus feed cleaner.
//!
//! Provides subcommands for cleaning single headsigns and stop names, and
//! for cleaning whole routes/trips/stops files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use ttc_bus_cleaner::{
    AgencyTools, DirectionId, OverrideTable, RouteKey, TtcBus,
    batch::{FileKind, clean_file},
    output::{append_run_log, log_summary},
    records::Route,
};

#[derive(Parser)]
#[command(name = "ttc_bus_cleaner")]
#[command(about = "Cleans TTC bus feed headsigns and stop names", long_about = None)]
struct Cli {
    /// JSON direction override table to use instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    overrides: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a trip headsign
    TripHeadsign { text: String },
    /// Clean a stop name
    StopName { text: String },
    /// Clean a stop headsign for a route
    StopHeadsign {
        text: String,

        #[arg(long)]
        route_short_name: String,

        #[arg(long, default_value = "")]
        route_long_name: String,
    },
    /// Clean a direction headsign, applying route overrides
    Direction {
        text: String,

        /// Feed direction_id (0 or 1)
        #[arg(short, long)]
        direction_id: u8,

        /// Route short name, used when the text carries none
        #[arg(short, long, default_value = "")]
        route: String,

        #[arg(long, default_value_t = false)]
        from_stop_name: bool,
    },
    /// Choose between two direction headsigns
    SelectDirection { first: String, second: String },
    /// Clean a routes.txt, trips.txt or stops.txt file
    CleanFile {
        #[arg(short, long, value_enum)]
        kind: FileKind,

        #[arg(short, long)]
        input: String,

        #[arg(short, long)]
        output: String,

        /// Log the run summary as JSON instead of structured fields
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional: CSV run log to append the summary row to
        #[arg(long)]
        stats_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ttc_bus_cleaner.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ttc_bus_cleaner.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let agency = load_agency(cli.overrides)?;

    match cli.command {
        Commands::TripHeadsign { text } => {
            println!("{}", agency.clean_trip_headsign(&text));
        }
        Commands::StopName { text } => {
            println!("{}", agency.clean_stop_name(&text));
        }
        Commands::StopHeadsign {
            text,
            route_short_name,
            route_long_name,
        } => {
            let route = Route {
                route_short_name,
                route_long_name: Some(route_long_name),
                ..Default::default()
            };
            println!("{}", agency.clean_stop_headsign(&route, &text));
        }
        Commands::Direction {
            text,
            direction_id,
            route,
            from_stop_name,
        } => {
            let direction_id = DirectionId::try_from(direction_id)?;
            let route = RouteKey::new(route);
            println!(
                "{}",
                agency.clean_direction_headsign(&route, direction_id, from_stop_name, &text)
            );
        }
        Commands::SelectDirection { first, second } => {
            let selection = agency.select_direction_headsign(Some(&first), Some(&second));
            match selection.pick(Some(&first), Some(&second)) {
                Some(label) => println!("{label}"),
                None => println!("undecided"),
            }
        }
        Commands::CleanFile {
            kind,
            input,
            output,
            json,
            stats_csv,
        } => {
            let reader = File::open(&input).with_context(|| format!("failed to open {input}"))?;
            let writer =
                File::create(&output).with_context(|| format!("failed to create {output}"))?;

            let stats = clean_file(&agency, kind, BufReader::new(reader), BufWriter::new(writer))?
                .with_file(&input);

            log_summary(&stats, json)?;
            if let Some(path) = stats_csv {
                append_run_log(&path, &stats)?;
            }
            info!(output = %output, "Done");
        }
    }

    Ok(())
}

/// Builds the agency with the override table from `--overrides`,
/// `DIRECTION_OVERRIDES_PATH`, or the built-in data.
fn load_agency(overrides: Option<String>) -> Result<TtcBus> {
    let path = overrides.or_else(|| std::env::var("DIRECTION_OVERRIDES_PATH").ok());
    let table = match path {
        Some(path) => OverrideTable::load(&path)?,
        None => OverrideTable::builtin().clone(),
    };
    info!(version = table.version(), rules = table.len(), "Direction overrides loaded");
    Ok(TtcBus::new(table))
}
