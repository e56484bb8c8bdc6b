//! Terminal front end for the fire simulation

pub mod fire;

use crate::doom::WindDirection;
use crate::palette::Palette;
use crossterm::event::{KeyCode, KeyModifiers};

/// Runtime state for interactive controls
pub struct VizState {
    pub speed: f32,        // Current speed (time per frame)
    pub palette: Palette,
    pub wind: WindDirection,
    pub paused: bool,
    pub show_help: bool,
}

impl VizState {
    pub fn new(initial_speed: f32, palette: Palette, wind: WindDirection) -> Self {
        Self {
            speed: initial_speed,
            palette,
            wind,
            paused: false,
            show_help: false,
        }
    }

    /// Handle keypress, returns true if should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }
        if self.palette.handle_key(code) {
            return false;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('h') | KeyCode::Left => self.wind = WindDirection::Left,
            KeyCode::Char('l') | KeyCode::Right => self.wind = WindDirection::Right,
            KeyCode::Char('n') | KeyCode::Down => self.wind = WindDirection::None,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '0' => 0.2,
                    '1' => 0.005,
                    '2' => 0.01,
                    '3' => 0.016,
                    '4' => 0.03,
                    '5' => 0.05,
                    '6' => 0.07,
                    '7' => 0.1,
                    '8' => 0.15,
                    _ => 0.2,
                };
            }
            _ => {}
        }
        false
    }
}
