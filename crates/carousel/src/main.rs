use anyhow::Context;
use carousel::config::{self, Config};
use carousel::gui::app::AppModel;
use clap::Parser;
use conveyor::{Carousel, ConveyorLevel};
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carousel", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the user config directory
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of buckets on the ring (overrides the configuration)
    #[arg(short = 'n', long)]
    buckets: Option<usize>,

    /// Conveyor level to display (upper, lower)
    #[arg(short = 'l', long)]
    level: Option<ConveyorLevel>,

    /// Seed for the initial bucket states
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Start with every bucket empty
    #[arg(long, conflicts_with = "seed")]
    no_seed: bool,

    /// Write the default configuration file and exit
    #[arg(long)]
    write_default_config: bool,
}

fn load(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => config::load_config().context("Failed to load the user configuration")?,
    };

    if let Some(buckets) = cli.buckets {
        config.buckets = buckets;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if let Some(seed) = cli.seed {
        config.animation.seed = Some(seed);
    }
    if cli.no_seed {
        config.animation.seed = None;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = load(&cli)?;
    let carousel =
        Carousel::new(config.carousel_params()).context("Failed to build the carousel")?;

    // clap already consumed the command line
    let app = RelmApp::new("org.conveyor.carousel").with_args(Vec::new());
    app.run::<AppModel>((carousel, config));
    Ok(())
}
