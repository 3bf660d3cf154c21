use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use midly::MidiMessage::{NoteOff, NoteOn};
use midly::Timing::{Metrical, Timecode};
use midly::{MetaMessage, TrackEventKind};

use crate::error::LoadError;
use crate::time_base::{TimeBase, DEFAULT_MICROSECONDS_PER_BEAT};
use crate::timeline::NoteTimeline;

mod event;
mod pending;
mod track;
use event::DataKind;
use track::Track;


/// Everything one successful load produces; swapped as a whole on reload.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Song {
    pub timeline: NoteTimeline,
    pub time_base: TimeBase,
}

impl Song {
    pub fn new(timeline: NoteTimeline, time_base: TimeBase) -> Self {
        Song {
            timeline,
            time_base,
        }
    }

    /// Silence: no notes, 480 ticks per beat at 120 BPM.
    pub fn fallback() -> Self {
        Song::default()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.time_base.tick_to_seconds(self.timeline.end_tick())
    }
}

/// Reads the file at `path` and parses it with [`SongParser`].
pub fn load_song(path: &Path) -> Result<Song, LoadError> {
    let data: Vec<u8> = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    SongParser::new(data).parse()
}

pub struct SongParser {
    data: Vec<u8>,
}

impl SongParser {
    pub fn new(data: Vec<u8>) -> Self {
        SongParser { data }
    }

    fn data_kind(kind: &TrackEventKind<'_>) -> Option<DataKind> {
        match kind {
            TrackEventKind::Midi { message, .. } => match *message {
                NoteOn { key, vel } => {
                    if vel.as_int() == 0 {
                        Some(DataKind::NoteOff(key.as_int()))
                    } else {
                        Some(DataKind::NoteOn(key.as_int()))
                    }
                }
                NoteOff { key, .. } => Some(DataKind::NoteOff(key.as_int())),
                _ => None,
            },
            TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                Some(DataKind::ChangeTempo(tempo.as_int()))
            }
            // unknown meta, sysex and escape events carry nothing we draw
            _ => None,
        }
    }

    pub fn parse(&self) -> Result<Song, LoadError> {
        let smf = midly::Smf::parse(&self.data)?;

        let ticks_per_beat: u32 = match smf.header.timing {
            Metrical(ticks_per_beat) => u32::from(ticks_per_beat.as_int()),
            Timecode(frames_per_second, ticks_per_frame) => {
                let message: String = format!(
                    "timecode division ({} fps, {} ticks per frame) is not supported",
                    frames_per_second.as_f32(),
                    ticks_per_frame
                );
                warn!("{}", message);
                return Err(LoadError::ParseError(message));
            }
        };
        debug!("ticks_per_beat {}", ticks_per_beat);
        debug!("track num: {}", smf.tracks.len());

        if smf.tracks.is_empty() {
            return Err(LoadError::NoUsableNotes);
        }

        let mut tracks: Vec<Track> = Vec::new();
        for (track_num, track_events) in smf.tracks.iter().enumerate() {
            let mut track: Track = Track::new(track_num);
            let mut ticks: u32 = 0;
            for track_event in track_events.iter() {
                ticks = ticks.saturating_add(track_event.delta.as_int());
                if let Some(data_kind) = Self::data_kind(&track_event.kind) {
                    track.push_event(ticks, data_kind);
                }
            }
            debug!(
                "track {} has {} events, {} note-ons",
                track_num,
                track_events.len(),
                track.note_on_count()
            );
            tracks.push(track);
        }

        let microseconds_per_beat: u32 = match tracks.iter().find_map(|track| {
            track
                .first_tempo()
                .map(|tempo| (track.track_index, tempo))
        }) {
            Some((track_index, tempo)) => {
                debug!("tempo {} from track {}", tempo, track_index);
                tempo
            }
            None => {
                debug!("no tempo event, using {}", DEFAULT_MICROSECONDS_PER_BEAT);
                DEFAULT_MICROSECONDS_PER_BEAT
            }
        };

        // first track wins a tie
        let mut selected: &Track = &tracks[0];
        for track in tracks.iter().skip(1) {
            if track.note_on_count() > selected.note_on_count() {
                selected = track;
            }
        }
        if selected.note_on_count() == 0 {
            return Err(LoadError::NoUsableNotes);
        }

        let notes = selected.notes();
        if notes.is_empty() {
            return Err(LoadError::NoUsableNotes);
        }

        let song: Song = Song::new(
            NoteTimeline::new(notes),
            TimeBase::new(ticks_per_beat, microseconds_per_beat),
        );
        info!(
            "Loaded {} notes from track {} ({:.1} BPM, {:.2}s)",
            song.timeline.len(),
            selected.track_index,
            song.time_base.bpm(),
            song.duration_seconds()
        );

        Ok(song)
    }
}
