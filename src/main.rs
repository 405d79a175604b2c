use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use padmap::config::LaunchConfig;
use padmap::controller::{enumerate_gamepads, DeviceManifest, PhysicalDevice};
use padmap::mapping::{ConfigurationManager, TargetType, TranslationTables};
use padmap::persistence::{Artifact, OutputFormat};

/// Writes emulator controller configuration for the connected devices
#[derive(Parser, Debug)]
#[command(name = "padmap", version, about)]
struct Cli {
    /// Launch configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target grammar to write
    #[arg(short, long, value_enum)]
    target: Option<TargetType>,

    /// SDL community controller database
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Device manifest; connected gamepads are used when omitted
    #[arg(long)]
    devices: Option<PathBuf>,

    /// Target file; printed to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the target's file format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Lower the number of players written
    #[arg(long)]
    max_players: Option<usize>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = merge(&cli, LaunchConfig::load_or_default(cli.config.as_deref())?);
    setup(&config, cli.verbose)?;
    debug!("Launch configuration: {:?}", config);

    let devices = load_devices(&config)?;
    if devices.is_empty() {
        warn!("No input devices, writing an empty configuration");
    }

    let encoder = config.target.create_encoder();
    let manager = ConfigurationManager::new(TranslationTables::standard(), config.database.clone())
        .with_player_limit(config.max_players);

    let mut artifact = Artifact::open(config.output_format(), config.output.as_deref())?;
    let report = manager.configure(&devices, encoder.as_ref(), artifact.sink());
    for issue in &report.issues {
        debug!("{}", issue);
    }

    match &config.output {
        Some(path) => {
            artifact.write_to(path)?;
            info!("Wrote {} configuration to {}", config.target, path.display());
        }
        None => print!("{}", artifact.render()),
    }
    Ok(())
}

fn merge(cli: &Cli, mut config: LaunchConfig) -> LaunchConfig {
    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(database) = &cli.database {
        config.database = Some(database.clone());
    }
    if let Some(devices) = &cli.devices {
        config.devices = Some(devices.clone());
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    if cli.format.is_some() {
        config.format = cli.format;
    }
    if cli.max_players.is_some() {
        config.max_players = cli.max_players;
    }
    config
}

fn load_devices(config: &LaunchConfig) -> Result<Vec<PhysicalDevice>> {
    match &config.devices {
        Some(path) => Ok(DeviceManifest::load(path)
            .map_err(|e| eyre!("Failed to load devices: {}", e))?
            .into_devices()),
        None => enumerate_gamepads().map_err(|e| eyre!("Failed to enumerate gamepads: {}", e)),
    }
}

fn setup(config: &LaunchConfig, verbose: bool) -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;

    let level = if verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    setup_logging(level);
    Ok(())
}

fn setup_logging(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}
