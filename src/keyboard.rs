use std::collections::HashMap;

use crate::geometry::Rect;

const WHITE_KEY_NOTES_IN_OCTAVE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const BLACK_KEY_NOTES_IN_OCTAVE: [u8; 5] = [1, 3, 6, 8, 10];
// in white key widths from the octave's left edge
const BLACK_KEY_CENTERS: [f32; 5] = [0.75, 1.75, 3.75, 4.75, 5.75];
const BLACK_KEY_WIDTH_RATIO: f32 = 0.6;

/// Horizontal placement of one key on screen.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct KeyGeometry {
    pub x: f32,
    pub width: f32,
    pub is_white: bool,
}

impl KeyGeometry {
    pub fn x_center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Screen geometry of the keyboard the roll is aligned to.
///
/// A pitch without a key is normal: the note is simply outside the displayed range.
pub trait KeyboardLayout {
    fn key(&self, pitch: u8) -> Option<KeyGeometry>;

    fn bounds(&self) -> Rect;
}

#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    keys: HashMap<u8, KeyGeometry>,
    bounds: Rect,
}

impl KeyMap {
    pub fn new(bounds: Rect) -> Self {
        KeyMap {
            keys: HashMap::new(),
            bounds,
        }
    }

    pub fn insert(&mut self, pitch: u8, key: KeyGeometry) {
        self.keys.insert(pitch, key);
    }

    /// Piano layout of `octaves` octaves starting at `start_note` (expected to be a C).
    ///
    /// Pitches past 127 are left out.
    pub fn piano(bounds: Rect, start_note: u8, octaves: u8) -> Self {
        let mut key_map: KeyMap = KeyMap::new(bounds);
        if octaves == 0 {
            return key_map;
        }

        let white_key_w: f32 = bounds.width / (7.0 * f32::from(octaves));
        let black_key_w: f32 = white_key_w * BLACK_KEY_WIDTH_RATIO;

        for octave in 0..octaves {
            let octave_start: u32 = u32::from(start_note) + u32::from(octave) * 12;
            let octave_x: f32 = bounds.x + f32::from(octave) * 7.0 * white_key_w;

            for (index, offset) in WHITE_KEY_NOTES_IN_OCTAVE.iter().enumerate() {
                if let Ok(pitch) = u8::try_from(octave_start + u32::from(*offset)) {
                    key_map.insert_midi(
                        pitch,
                        KeyGeometry {
                            x: octave_x + index as f32 * white_key_w,
                            width: white_key_w,
                            is_white: true,
                        },
                    );
                }
            }

            for (offset, center) in BLACK_KEY_NOTES_IN_OCTAVE.iter().zip(BLACK_KEY_CENTERS) {
                if let Ok(pitch) = u8::try_from(octave_start + u32::from(*offset)) {
                    key_map.insert_midi(
                        pitch,
                        KeyGeometry {
                            x: octave_x + center * white_key_w - black_key_w / 2.0,
                            width: black_key_w,
                            is_white: false,
                        },
                    );
                }
            }
        }

        key_map
    }

    fn insert_midi(&mut self, pitch: u8, key: KeyGeometry) {
        if pitch <= 127 {
            self.insert(pitch, key);
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Mapped pitches, lowest first.
    pub fn pitches(&self) -> Vec<u8> {
        let mut pitches: Vec<u8> = self.keys.keys().copied().collect();
        pitches.sort_unstable();
        pitches
    }
}

impl KeyboardLayout for KeyMap {
    fn key(&self, pitch: u8) -> Option<KeyGeometry> {
        self.keys.get(&pitch).copied()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
