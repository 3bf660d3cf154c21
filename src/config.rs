use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectRates, EffectTiming};
use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::keyboard::KeyMap;
use crate::projector::{ScrollProjector, DEFAULT_HIT_LINE_RATIO, DEFAULT_SCROLL_SPEED};

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub bounds: Rect,
    pub start_note: u8,
    pub octaves: u8,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        KeyboardConfig {
            bounds: Rect::new(20.0, 358.0, 760.0, 132.0),
            // C4
            start_note: 60,
            octaves: 2,
        }
    }
}

/// Display settings, read from JSON; every field may be omitted.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub roll_viewport: Rect,
    pub keyboard: KeyboardConfig,
    pub hit_line_ratio: f32,
    pub scroll_speed: f32,
    pub effects: EffectRates,
    pub frame_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            roll_viewport: ScrollProjector::default().viewport(),
            keyboard: KeyboardConfig::default(),
            hit_line_ratio: DEFAULT_HIT_LINE_RATIO,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            effects: EffectRates::default(),
            frame_rate: 60.0,
        }
    }
}

fn check(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            self.roll_viewport.width > 0.0 && self.roll_viewport.height > 0.0,
            "roll_viewport must have a positive size",
        )?;
        check(
            self.keyboard.bounds.width > 0.0 && self.keyboard.bounds.height > 0.0,
            "keyboard.bounds must have a positive size",
        )?;
        check(self.keyboard.octaves > 0, "keyboard.octaves must be at least 1")?;
        check(
            u32::from(self.keyboard.start_note) + u32::from(self.keyboard.octaves) * 12 <= 128,
            "keyboard range must end at or below pitch 127",
        )?;
        check(
            (0.0..=1.0).contains(&self.hit_line_ratio),
            "hit_line_ratio must be between 0 and 1",
        )?;
        check(self.scroll_speed > 0.0, "scroll_speed must be positive")?;
        check(self.effects.alpha_step > 0.0, "effects.alpha_step must be positive")?;
        check(self.effects.growth_step >= 0.0, "effects.growth_step must not be negative")?;
        check(
            self.effects.initial_size_ratio >= 0.0 && self.effects.growth_limit >= 0.0,
            "effects sizes must not be negative",
        )?;
        if let EffectTiming::PerSecond { reference_fps } = self.effects.timing {
            check(reference_fps > 0.0, "effects.timing.reference_fps must be positive")?;
        }
        check(self.frame_rate > 0.0, "frame_rate must be positive")?;
        Ok(())
    }

    pub fn projector(&self) -> ScrollProjector {
        ScrollProjector::new(self.roll_viewport, self.hit_line_ratio, self.scroll_speed)
    }

    pub fn key_map(&self) -> KeyMap {
        KeyMap::piano(
            self.keyboard.bounds,
            self.keyboard.start_note,
            self.keyboard.octaves,
        )
    }
}
