//! Falling-note piano roll synchronised to an on-screen keyboard.
//!
//! A Standard MIDI File is reduced to a [`NoteTimeline`] plus a single-tempo
//! [`TimeBase`]; every frame the [`ScrollProjector`] turns the timeline and the
//! playhead into note rectangles aligned to a [`KeyboardLayout`], while the
//! [`HitEffectScheduler`] animates key-press feedback independently.

pub mod config;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod midi_writer;
pub mod projector;
pub mod session;
pub mod song;
pub mod time_base;
pub mod timeline;

pub use config::Config;
pub use effects::{EffectRates, EffectTiming, HitEffect, HitEffectScheduler};
pub use error::{ConfigError, LoadError};
pub use geometry::Rect;
pub use keyboard::{KeyGeometry, KeyMap, KeyboardLayout};
pub use projector::{ScrollProjector, VisibleNote};
pub use session::{EffectSprite, Frame, Session};
pub use song::{load_song, Song, SongParser};
pub use time_base::TimeBase;
pub use timeline::{Note, NoteTimeline};
