//! eagle-parts: resolve EAGLE schematic parts to library symbols and pins
//!
//! Reads a schematic, resolves every part against its library, and prints
//! the parts with their pin coordinates.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use eagle_parts::config;
use eagle_parts::eagle::{find_part, EagleVersion, Part, Schematic};

/// Resolve EAGLE schematic parts to their library symbols and pins.
///
/// Libraries are searched in the installed EAGLE versions (nearest to the
/// schematic's version first) and then in the remote repository.
#[derive(Parser, Debug)]
#[command(name = "eagle-parts")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the schematic (.sch) file
    #[arg(value_name = "SCHEMATIC")]
    schematic: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Only print the first part with this device set (requires --device)
    #[arg(long, requires = "device")]
    deviceset: Option<String>,

    /// Only print the first part with this device (requires --deviceset)
    #[arg(long, requires = "deviceset")]
    device: Option<String>,

    /// EAGLE version to prefer instead of the schematic's own
    #[arg(long, value_parser = EagleVersion::parse)]
    eagle_version: Option<EagleVersion>,

    /// Skip parts that cannot be resolved instead of stopping
    #[arg(short, long)]
    keep_going: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_part(part: &Part) {
    let value = if part.value().is_empty() {
        String::new()
    } else {
        format!(" = {}", part.value())
    };
    println!(
        "{}{value}  [{}:{}/{}]",
        part.name(),
        part.library(),
        part.deviceset(),
        part.device()
    );
    for pin in part.pins() {
        println!("    {:<12} x={:<10} y={}", pin.name(), pin.x(), pin.y());
    }
}

/// Entry point for the eagle-parts tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let mut resolver = match cfg.resolver() {
        Ok(resolver) => resolver,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let schematic = match Schematic::open(&args.schematic) {
        Ok(schematic) => schematic,
        Err(e) => {
            error!(error = %e, "Cannot read schematic");
            return ExitCode::FAILURE;
        }
    };

    info!(
        schematic = %args.schematic.display(),
        version = ?schematic.version().map(ToString::to_string),
        parts = schematic.part_nodes().len(),
        "Resolving parts"
    );

    let version = args.eagle_version.as_ref();
    let (parts, failed) = if args.keep_going {
        let (parts, failures) = schematic.resolve_parts_lenient(&mut resolver, version);
        (parts, !failures.is_empty())
    } else {
        match schematic.resolve_parts(&mut resolver, version) {
            Ok(parts) => (parts, false),
            Err(e) => {
                error!(error = %e, "Part resolution failed");
                return ExitCode::FAILURE;
            }
        }
    };

    info!(libraries = resolver.cached(), "Libraries loaded");

    if let (Some(deviceset), Some(device)) = (&args.deviceset, &args.device) {
        let Some(part) = find_part(&parts, deviceset, device) else {
            error!(deviceset = %deviceset, device = %device, "No matching part in schematic");
            return ExitCode::FAILURE;
        };
        print_part(part);
    } else {
        parts.iter().for_each(print_part);
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
