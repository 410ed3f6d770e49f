//! Flight log output and end-of-replay summary

use crate::replay::ReplaySummary;
use anyhow::{Context, Result};
use fsdata::{FlightLog, FlightSession, RawOffsetSource};
use std::fs;
use std::path::Path;

/// Write the rendered flight log, one `[HH:MM:SS] message` line per entry
pub fn write_flight_log(path: &Path, flight_log: &FlightLog) -> Result<()> {
    fs::write(path, flight_log.render())
        .with_context(|| format!("Failed to write flight log: {:?}", path))?;
    log::info!("Wrote {} flight log entries to {:?}", flight_log.len(), path);
    Ok(())
}

fn or_unknown<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Plain-text summary of a finished replay
pub fn render_summary(
    summary: &ReplaySummary,
    session: &FlightSession,
    source: &dyn RawOffsetSource,
) -> String {
    let units = session.config().fuel_units;
    let altitude = session
        .altitude_label(source)
        .zip(session.vertical_speed_label(source))
        .map(|(alt, vs)| format!("{} {}", alt, vs));

    let rows = [
        ("Simulator", or_unknown(session.simulator_version(source))),
        (
            "Frames replayed",
            format!("{} ({} paused)", summary.frames, summary.paused_frames),
        ),
        ("Log entries", session.flight_log().len().to_string()),
        ("Tracker failures", summary.failures.to_string()),
        ("Aircraft", or_unknown(session.aircraft_title(source))),
        ("Position", or_unknown(session.position_label(source))),
        ("Altitude", or_unknown(altitude)),
        ("Heading", or_unknown(session.heading_label(source))),
        ("Fuel on board", or_unknown(session.current_fuel_label(source))),
        (
            "Fuel used",
            or_unknown(session.fuel_used(source).map(|f| format!("{}{}", f, units))),
        ),
        (
            "Landing rate",
            or_unknown(session.trackers().aircraft.landing_rate().map(|r| format!("{}fpm", r))),
        ),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<19}{}\n", format!("{}:", label), value))
        .collect()
}
