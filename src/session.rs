use std::path::Path;

use log::{info, warn};

use crate::effects::{EffectRates, HitEffectScheduler};
use crate::error::LoadError;
use crate::keyboard::KeyboardLayout;
use crate::projector::{ScrollProjector, VisibleNote};
use crate::song::{load_song, Song, SongParser};

/// What a renderer needs for one hit effect.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EffectSprite {
    pub pitch: u8,
    pub x_center: f32,
    pub alpha: f32,
    pub size: f32,
}

/// Everything drawn for one frame.
#[derive(Clone, PartialEq, Debug)]
pub struct Frame {
    pub playhead_seconds: f64,
    pub hit_line_y: f32,
    pub notes: Vec<VisibleNote>,
    pub effects: Vec<EffectSprite>,
}

/// The loaded song plus playback state, driven once per rendered frame.
pub struct Session<L: KeyboardLayout> {
    song: Song,
    layout: L,
    projector: ScrollProjector,
    effects: HitEffectScheduler,
    playhead_seconds: f64,
    playing: bool,
}

impl<L: KeyboardLayout> Session<L> {
    /// Starts paused at 0 with the silent fallback song.
    pub fn new(layout: L, projector: ScrollProjector, rates: EffectRates) -> Self {
        Session {
            song: Song::fallback(),
            layout,
            projector,
            effects: HitEffectScheduler::new(rates),
            playhead_seconds: 0.0,
            playing: false,
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn projector(&self) -> &ScrollProjector {
        &self.projector
    }

    pub fn playhead_seconds(&self) -> f64 {
        self.playhead_seconds
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn reset(&mut self) {
        self.playhead_seconds = 0.0;
        self.effects.clear();
    }

    /// Swaps in `song` and rewinds.
    pub fn replace_song(&mut self, song: Song) {
        self.song = song;
        self.reset();
    }

    fn apply_load(&mut self, result: Result<Song, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(song) => {
                self.replace_song(song);
                Ok(())
            }
            Err(err) => {
                warn!("Load failed, continuing with an empty song: {}", err);
                self.replace_song(Song::fallback());
                Err(err)
            }
        }
    }

    /// Loads `path`; on failure the silent fallback song is installed and the error returned.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        info!("Loading {}", path.display());
        self.apply_load(load_song(path))
    }

    pub fn load_bytes(&mut self, data: Vec<u8>) -> Result<(), LoadError> {
        self.apply_load(SongParser::new(data).parse())
    }

    /// Moves the playhead by `dt` seconds while playing; effects age either way.
    pub fn advance(&mut self, dt: f64) {
        if self.playing && dt.is_finite() && dt > 0.0 {
            self.playhead_seconds += dt;
        }
        self.effects.update(dt);
    }

    pub fn trigger(&mut self, pitch: u8) -> bool {
        self.effects.trigger(&self.layout, pitch)
    }

    pub fn active_effects(&self) -> usize {
        self.effects.len()
    }

    pub fn frame(&self) -> Frame {
        let notes: Vec<VisibleNote> = self.projector.project(
            &self.song.timeline,
            &self.song.time_base,
            &self.layout,
            self.playhead_seconds,
        );
        let effects: Vec<EffectSprite> = self
            .effects
            .effects()
            .iter()
            .map(|effect| EffectSprite {
                pitch: effect.pitch,
                x_center: effect.x_center,
                alpha: effect.alpha.clamp(0.0, 255.0),
                size: effect.size,
            })
            .collect();

        Frame {
            playhead_seconds: self.playhead_seconds,
            hit_line_y: self.projector.hit_line_y(),
            notes,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::keyboard::KeyMap;
    use crate::midi_writer::demo_song;

    fn session() -> Session<KeyMap> {
        let config = Config::default();
        Session::new(config.key_map(), config.projector(), config.effects)
    }

    #[test]
    fn test_starts_silent_and_paused() {
        let mut session = session();
        assert!(!session.is_playing());
        assert!(session.song().timeline.is_empty());
        session.advance(1.0);
        assert_eq!(session.playhead_seconds(), 0.0);
        assert!(session.frame().notes.is_empty());
    }

    #[test]
    fn test_play_pause_advance() {
        let mut session = session();
        session.set_playing(true);
        session.advance(0.25);
        session.advance(0.25);
        assert!((session.playhead_seconds() - 0.5).abs() < 1e-12);

        session.toggle_playing();
        session.advance(0.25);
        assert!((session.playhead_seconds() - 0.5).abs() < 1e-12);

        session.toggle_playing();
        session.advance(-3.0);
        session.advance(f64::NAN);
        assert!((session.playhead_seconds() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_effects() {
        let mut session = session();
        session.set_playing(true);
        assert!(session.trigger(60));
        assert!(session.trigger(60));
        assert!(!session.trigger(20));
        session.advance(1.0);
        assert_eq!(session.active_effects(), 2);

        session.reset();
        assert_eq!(session.playhead_seconds(), 0.0);
        assert_eq!(session.active_effects(), 0);
        assert!(session.is_playing());
    }

    #[test]
    fn test_load_demo_and_frame() {
        let mut session = session();
        session.load_bytes(demo_song().unwrap()).unwrap();
        assert_eq!(session.song().timeline.len(), 8);

        // first note sits on the hit line at t = 0
        let frame = session.frame();
        assert!(!frame.notes.is_empty());
        assert_eq!(frame.notes[0].pitch, 60);
        assert!((frame.notes[0].rect.bottom() - frame.hit_line_y).abs() < 1e-3);
    }

    #[test]
    fn test_failed_load_falls_back() {
        let mut session = session();
        session.load_bytes(demo_song().unwrap()).unwrap();
        session.set_playing(true);
        session.advance(1.0);

        let result = session.load_bytes(b"not a midi file".to_vec());
        assert!(matches!(result, Err(LoadError::ParseError(_))));
        assert!(session.song().timeline.is_empty());
        assert_eq!(session.playhead_seconds(), 0.0);

        for _ in 0..120 {
            session.advance(1.0 / 60.0);
            assert!(session.frame().notes.is_empty());
        }
    }
}
