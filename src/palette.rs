use clap::ValueEnum;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// The 37-step ramp of the Doom PSX fire, dark to white-hot
pub const DOOM_RAMP: [(u8, u8, u8); 37] = [
    (0x07, 0x07, 0x07),
    (0x1F, 0x07, 0x07),
    (0x2F, 0x0F, 0x07),
    (0x47, 0x0F, 0x07),
    (0x57, 0x17, 0x07),
    (0x67, 0x1F, 0x07),
    (0x77, 0x1F, 0x07),
    (0x8F, 0x27, 0x07),
    (0x9F, 0x2F, 0x07),
    (0xAF, 0x3F, 0x07),
    (0xBF, 0x47, 0x07),
    (0xC7, 0x47, 0x07),
    (0xDF, 0x4F, 0x07),
    (0xDF, 0x57, 0x07),
    (0xDF, 0x57, 0x07),
    (0xD7, 0x5F, 0x07),
    (0xD7, 0x5F, 0x07),
    (0xD7, 0x67, 0x0F),
    (0xCF, 0x6F, 0x0F),
    (0xCF, 0x77, 0x0F),
    (0xCF, 0x7F, 0x0F),
    (0xCF, 0x87, 0x17),
    (0xC7, 0x87, 0x17),
    (0xC7, 0x8F, 0x17),
    (0xC7, 0x97, 0x1F),
    (0xBF, 0x9F, 0x1F),
    (0xBF, 0x9F, 0x1F),
    (0xBF, 0xA7, 0x27),
    (0xBF, 0xA7, 0x27),
    (0xBF, 0xAF, 0x2F),
    (0xB7, 0xAF, 0x2F),
    (0xB7, 0xB7, 0x2F),
    (0xB7, 0xB7, 0x37),
    (0xCF, 0xCF, 0x6F),
    (0xDF, 0xDF, 0x9F),
    (0xEF, 0xEF, 0xC7),
    (0xFF, 0xFF, 0xFF),
];

/// Brightest intensity level; the source row burns at this value
pub const MAX_LEVEL: u8 = (DOOM_RAMP.len() - 1) as u8;

/// Color ramp used to paint intensity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Doom,
    Ice,    // red and blue swapped
    Toxic,  // red and green swapped
    Mono,   // luminance only
}

impl Palette {
    /// Handle palette key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => *self = Palette::Doom,   // Shift+1
            KeyCode::Char('@') => *self = Palette::Ice,    // Shift+2
            KeyCode::Char('#') => *self = Palette::Toxic,  // Shift+3
            KeyCode::Char('&') => *self = Palette::Mono,   // Shift+7, mono like the other tools
            _ => return false,
        }
        true
    }

    /// RGB for an intensity level; levels past the ramp clamp to white-hot
    pub fn rgb(self, level: u8) -> (u8, u8, u8) {
        let (r, g, b) = DOOM_RAMP[(level as usize).min(DOOM_RAMP.len() - 1)];
        match self {
            Palette::Doom => (r, g, b),
            Palette::Ice => (b, g, r),
            Palette::Toxic => (g, r, b),
            Palette::Mono => {
                let luma = (r as u16 * 3 + g as u16 * 6 + b as u16) / 10;
                let luma = luma as u8;
                (luma, luma, luma)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Doom => "doom",
            Palette::Ice => "ice",
            Palette::Toxic => "toxic",
            Palette::Mono => "mono",
        }
    }
}
