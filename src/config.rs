use crate::doom::WindDirection;
use crate::palette::Palette;
use clap::ValueEnum;

/// Configuration for the interactive fire
#[derive(Clone)]
pub struct FireConfig {
    pub wind: WindDirection,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub palette: Palette,
}

/// Output format of print mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    Ansi,  // half-block frame with truecolor escapes
    Json,  // raw intensities for other renderers
}

/// Configuration for headless frame printing
#[derive(Clone)]
pub struct PrintConfig {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub wind: WindDirection,
    pub seed: Option<u64>,
    pub palette: Palette,
    pub format: OutputFormat,
}

/// Seed from the config, or from the clock when none was given
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}
