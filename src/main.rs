mod config;
mod doom;
mod help;
mod logging;
mod palette;
mod settings;
mod terminal;
mod viz;

use clap::{Parser, Subcommand};
use config::{resolve_seed, FireConfig, OutputFormat, PrintConfig};
use doom::WindDirection;
use palette::Palette;
use rand::prelude::*;
use settings::Settings;
use std::io;
use tracing::info;

const DEFAULT_TIME_STEP: f32 = 0.016;

#[derive(Parser)]
#[command(name = "doomfire")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal Doom fire: the classic bottom-up flame automaton", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the animated fire in the terminal
    Live {
        /// Direction the flames lean
        #[arg(short, long, value_enum)]
        wind: Option<WindDirection>,

        /// Animation speed (seconds per frame)
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color ramp: doom, ice, toxic, mono
        #[arg(short, long, value_enum)]
        palette: Option<Palette>,
    },

    /// Simulate a number of frames and print the last one to stdout
    Print {
        /// Surface width in pixels (one pixel per character column)
        #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(0..=2000))]
        width: u32,

        /// Surface height in pixels (two pixels per character row)
        #[arg(long, default_value = "50", value_parser = clap::value_parser!(u32).range(0..=2000))]
        height: u32,

        /// Number of frames to simulate before printing
        #[arg(short, long, default_value = "60")]
        frames: u32,

        /// Direction the flames lean
        #[arg(short, long, value_enum)]
        wind: Option<WindDirection>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color ramp: doom, ice, toxic, mono
        #[arg(short, long, value_enum)]
        palette: Option<Palette>,

        /// Output format
        #[arg(long, value_enum, default_value = "ansi")]
        format: OutputFormat,
    },
}

fn main() -> io::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Commands::Live {
            wind,
            time,
            seed,
            palette,
        } => {
            let config = FireConfig {
                wind: wind.or(settings.fire.wind).unwrap_or_default(),
                time_step: time
                    .or(settings.fire.time_step)
                    .unwrap_or(DEFAULT_TIME_STEP)
                    .clamp(0.001, 1.0),
                seed,
                palette: palette.or(settings.fire.palette).unwrap_or_default(),
            };

            let seed = resolve_seed(config.seed);
            info!(seed, "starting live fire");
            let rng = StdRng::seed_from_u64(seed);

            let mut term = terminal::Terminal::new(true)?;
            term.clear_screen()?;
            viz::fire::run(&mut term, &config, rng)?;
        }
        Commands::Print {
            width,
            height,
            frames,
            wind,
            seed,
            palette,
            format,
        } => {
            let config = PrintConfig {
                width,
                height,
                frames,
                wind: wind.or(settings.fire.wind).unwrap_or_default(),
                seed,
                palette: palette.or(settings.fire.palette).unwrap_or_default(),
                format,
            };
            viz::fire::print_frames(&config)?;
        }
    }

    Ok(())
}
