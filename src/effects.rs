use serde::{Deserialize, Serialize};

use crate::keyboard::KeyboardLayout;

/// An expanding, fading ring drawn on the hit line above a pressed key.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct HitEffect {
    pub pitch: u8,
    pub x_center: f32,
    pub alpha: f32,
    pub size: f32,
    pub max_size: f32,
}

impl HitEffect {
    fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.size < self.max_size
    }
}

/// How the per-step rates relate to elapsed time.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum EffectTiming {
    /// One full step per `update`, whatever the frame time.
    PerUpdate,
    /// Steps scaled by `dt × reference_fps`.
    PerSecond { reference_fps: f32 },
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectRates {
    pub alpha_step: f32,
    pub growth_step: f32,
    pub initial_size_ratio: f32,
    pub growth_limit: f32,
    pub timing: EffectTiming,
}

impl Default for EffectRates {
    fn default() -> Self {
        EffectRates {
            alpha_step: 10.0,
            growth_step: 3.0,
            initial_size_ratio: 0.8,
            growth_limit: 3.0,
            timing: EffectTiming::PerUpdate,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HitEffectScheduler {
    effects: Vec<HitEffect>,
    rates: EffectRates,
}

impl HitEffectScheduler {
    pub fn new(rates: EffectRates) -> Self {
        HitEffectScheduler {
            effects: Vec::new(),
            rates,
        }
    }

    /// Starts an effect above the key for `pitch`; returns `false` when the layout has no such key.
    ///
    /// Repeated triggers stack independent effects.
    pub fn trigger<L: KeyboardLayout>(&mut self, layout: &L, pitch: u8) -> bool {
        let key = match layout.key(pitch) {
            Some(key) => key,
            None => return false,
        };

        let size: f32 = key.width * self.rates.initial_size_ratio;
        self.effects.push(HitEffect {
            pitch,
            x_center: key.x_center(),
            alpha: 255.0,
            size,
            max_size: size * self.rates.growth_limit,
        });
        true
    }

    pub fn update(&mut self, dt: f64) {
        let scale: f32 = match self.rates.timing {
            EffectTiming::PerUpdate => 1.0,
            EffectTiming::PerSecond { reference_fps } => {
                if dt.is_finite() && dt > 0.0 {
                    dt as f32 * reference_fps
                } else {
                    0.0
                }
            }
        };
        let alpha_step: f32 = self.rates.alpha_step * scale;
        let growth_step: f32 = self.rates.growth_step * scale;

        for effect in self.effects.iter_mut() {
            effect.alpha -= alpha_step;
            effect.size += growth_step;
        }
        self.effects.retain(HitEffect::is_alive);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn effects(&self) -> &[HitEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
