use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use aprs_tracker::config::{Callsign, ClockMode, Symbol, TrackerConfig};
use aprs_tracker::gps::ReaderSource;
use aprs_tracker::modem::ConsoleModem;
use aprs_tracker::output::{OutputFormat, create_formatter};
use aprs_tracker::trigger::ManualTrigger;
use aprs_tracker::Tracker;

#[derive(Parser, Debug)]
#[command(name = "aprs-tracker")]
#[command(about = "APRS position tracker with SmartBeaconing", long_about = None)]
struct Args {
    /// NMEA input (serial device or log file); stdin if omitted
    #[arg(short, long)]
    nmea: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Station callsign (without SSID)
    #[arg(long)]
    callsign: Option<Callsign>,

    /// Station SSID (0-15)
    #[arg(long)]
    ssid: Option<u8>,

    /// Map symbol: bike, car, runner or a single symbol character
    #[arg(long)]
    symbol: Option<Symbol>,

    /// Free text appended to every beacon comment
    #[arg(long)]
    comment: Option<String>,

    /// Packet output format
    #[arg(short = 'f', long, value_enum, default_value = "tnc2")]
    format: OutputFormat,

    /// Write packets to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fix clock: system, gps (default: gps for files, system for stdin)
    #[arg(long, value_enum)]
    clock: Option<ClockMode>,

    /// Hold the transmitter keyed for the estimated on-air time
    #[arg(long)]
    simulate_airtime: bool,

    /// Send a beacon whenever a line is entered on stdin
    #[arg(short, long)]
    manual_trigger: bool,

    /// Skip fixes whose location is stale
    #[arg(long)]
    reject_stale: bool,
}

fn build_config(args: &Args) -> anyhow::Result<TrackerConfig> {
    let mut config = match &args.config {
        Some(path) => TrackerConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => TrackerConfig::default(),
    };

    if let Some(callsign) = &args.callsign {
        config.station.callsign = callsign.clone();
    }
    if let Some(ssid) = args.ssid {
        config.station.ssid = ssid;
    }
    if let Some(symbol) = args.symbol {
        config.station.symbol = symbol;
    }
    if let Some(comment) = &args.comment {
        config.comment = comment.clone();
    }

    config.gps.clock = match args.clock {
        Some(clock) => clock,
        None if args.nmea.is_some() => ClockMode::Gps,
        None => ClockMode::System,
    };
    config.gps.reject_stale |= args.reject_stale;
    config.modem.simulate_airtime |= args.simulate_airtime;

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    log::info!("APRS Tracker");
    log::info!(
        "SmartBeaconing: {}-{} km/h, {}-{} s, turn {}° + {}/v, min turn time {} s",
        config.smart_beacon.low_speed_kmh,
        config.smart_beacon.high_speed_kmh,
        config.smart_beacon.fast_rate_secs,
        config.smart_beacon.slow_rate_secs,
        config.smart_beacon.turn_min_degrees,
        config.smart_beacon.turn_slope,
        config.smart_beacon.min_turn_time_secs
    );
    log::info!("Clock: {:?}", config.gps.clock);

    let writer: Box<dyn Write + Send> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let modem = ConsoleModem::new(writer, create_formatter(args.format), &config.modem);
    let mut tracker = Tracker::new(config, modem)?;

    let trigger = match (&args.nmea, args.manual_trigger) {
        (Some(_), true) => Some(ManualTrigger::spawn_line_reader(BufReader::new(io::stdin()))),
        (None, true) => {
            log::warn!("stdin carries NMEA data; manual trigger disabled");
            None
        }
        (_, false) => None,
    };

    match &args.nmea {
        Some(path) => {
            let mut source = ReaderSource::open(path)?;
            tracker.run(&mut source, trigger.as_ref())?;
        }
        None => {
            let mut source = ReaderSource::new(io::stdin().lock());
            tracker.run(&mut source, trigger.as_ref())?;
        }
    }

    Ok(())
}
