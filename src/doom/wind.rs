//! Wind direction: horizontal bias applied to where decayed heat lands

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Direction the flames lean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindDirection {
    /// Heat is deposited up to `decay` cells further along the row
    #[default]
    Left,
    /// Heat is deposited up to `decay` cells back along the row
    Right,
    /// Heat rises straight up
    None,
}

impl WindDirection {
    /// Where a cell's new intensity is written, before bounds handling.
    /// Returns `None` when the shift would fall before the start of the grid.
    pub fn shift(self, current: usize, decay: usize) -> Option<usize> {
        match self {
            WindDirection::Right => current.checked_sub(decay),
            WindDirection::Left => Some(current + decay),
            WindDirection::None => Some(current),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindDirection::Left => "left",
            WindDirection::Right => "right",
            WindDirection::None => "none",
        }
    }
}
