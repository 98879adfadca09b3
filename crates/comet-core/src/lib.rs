//! Core types shared across the comet crates.

mod field;
mod range;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub use field::{FieldConfig, FieldConfigError, MAX_PARTICLES};
pub use range::Interval;

/// How a particle field refreshes its comets on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Discard all comets and sample a fresh batch of the same size.
    #[default]
    Regenerate,
    /// Append one edge-spawned comet and drop comets past the age ceiling.
    SpawnAndPrune,
}

impl TickPolicy {
    /// Switch to the other policy.
    pub fn toggle(self) -> Self {
        match self {
            Self::Regenerate => Self::SpawnAndPrune,
            Self::SpawnAndPrune => Self::Regenerate,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Regenerate => "regenerate",
            Self::SpawnAndPrune => "spawn & prune",
        }
    }
}

/// Playback speed of the animation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
        }
    }

    /// Multiplier applied to wall-clock time.
    pub fn playback_rate(self) -> f64 {
        match self {
            Self::Slow => 0.5,
            Self::Normal => 1.0,
            Self::Fast => 2.0,
        }
    }
}

/// Color theme for comets and the title card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    #[default]
    Violet,
    Cyan,
    Amber,
    Rose,
    Mono,
}

impl ColorTheme {
    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            Self::Violet => Self::Cyan,
            Self::Cyan => Self::Amber,
            Self::Amber => Self::Rose,
            Self::Rose => Self::Mono,
            Self::Mono => Self::Violet,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Violet => "violet",
            Self::Cyan => "cyan",
            Self::Amber => "amber",
            Self::Rose => "rose",
            Self::Mono => "mono",
        }
    }

    /// Primary color, used for comet heads and titles.
    pub fn color(self) -> Color {
        match self {
            Self::Violet => Color::Rgb(167, 139, 250),
            Self::Cyan => Color::Rgb(103, 232, 249),
            Self::Amber => Color::Rgb(252, 211, 77),
            Self::Rose => Color::Rgb(251, 113, 133),
            Self::Mono => Color::Rgb(229, 231, 235),
        }
    }

    /// Hue in degrees, used to fade comet trails.
    pub fn hue(self) -> f32 {
        match self {
            Self::Violet => 262.0,
            Self::Cyan => 188.0,
            Self::Amber => 45.0,
            Self::Rose => 350.0,
            Self::Mono => 0.0,
        }
    }

    /// Saturation used for trails.
    pub fn saturation(self) -> f32 {
        match self {
            Self::Mono => 0.0,
            _ => 0.85,
        }
    }
}
