//! Flight Data CLI Application
//!
//! Command-line front end for the fsdata library. It adds what the library
//! leaves to the application:
//! - Configuration loading (config.toml)
//! - Replay of recorded simulator state through a flight session
//! - Writing the flight log and printing a summary

use anyhow::{Context, Result};
use clap::Parser;
use fsdata::{FlightSession, FuelUnits, LogFacade};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod replay;
mod report;

use config::AppConfig;
use replay::Replayer;

/// Flight Data - Replay simulator state into a flight log
#[derive(Parser, Debug)]
#[command(name = "fsdata-cli")]
#[command(about = "Replay recorded flight simulator state into a flight log", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a JSON Lines replay of simulator state
    #[arg(short, long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file for the flight log
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Unit for fuel figures (lbs or kgs)
    #[arg(long, value_name = "UNITS")]
    fuel_units: Option<FuelUnits>,

    /// Do not print the flight log to stdout
    #[arg(long)]
    no_echo: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppExitCode {
    Normal = 0,
    Error = 1,
    FileNotFound = 2,
}

impl AppExitCode {
    /// Classify a failure by the first I/O error in its chain
    fn from_error(err: &anyhow::Error) -> Self {
        let not_found = err.chain().any(|cause| {
            cause
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
        });
        if not_found {
            AppExitCode::FileNotFound
        } else {
            AppExitCode::Error
        }
    }
}

impl From<AppExitCode> for ExitCode {
    fn from(code: AppExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Flight Data CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using fsdata library v{}", fsdata::VERSION);

    let code = match run(&args) {
        Ok(()) => AppExitCode::Normal,
        Err(e) => {
            log::error!("{:#}", e);
            AppExitCode::from_error(&e)
        }
    };

    log::info!("Exiting with code {} ({:?})", code as u8, code);
    code.into()
}

/// Merge command-line overrides into the loaded configuration
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(replay) = &args.replay {
        config.input.replay = Some(replay.clone());
    }
    if let Some(output) = &args.output {
        config.output.flight_log = Some(output.clone());
    }
    if let Some(units) = args.fuel_units {
        config.session.fuel_units = units;
    }
    if args.no_echo || args.quiet {
        config.output.echo = false;
    }

    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;

    let Some(replay_path) = config.input.replay.as_deref() else {
        println!("Flight Data - No input specified");
        println!("\nQuick Start:");
        println!("  fsdata-cli --replay flight.jsonl");
        println!("  fsdata-cli --replay flight.jsonl --output flight.log --fuel-units kgs");
        println!("\nUse --help for more options");
        return Ok(());
    };

    log::info!("Replaying {:?}", replay_path);
    let frames = replay::read_frames(replay_path)
        .with_context(|| format!("Failed to load replay {:?}", replay_path))?;

    let session = FlightSession::with_logger(config.session.clone(), Box::new(LogFacade));
    let mut replayer = Replayer::new(session);
    let summary = replayer.run(&frames)?;

    let session = replayer.session();
    if config.output.echo {
        print!("{}", session.flight_log().render());
        println!();
        print!("{}", report::render_summary(&summary, session, replayer.memory()));
    }

    if let Some(path) = &config.output.flight_log {
        report::write_flight_log(path, session.flight_log())?;
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
