//! Builds Standard MIDI File bytes from absolute-tick events.
//!
//! Used for the bundled demo song and to generate fixtures.

use std::io;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

pub struct TrackBuilder {
    events: Vec<(u32, TrackEventKind<'static>)>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        TrackBuilder { events: Vec::new() }
    }

    pub fn tempo(mut self, tick: u32, microseconds_per_beat: u32) -> Self {
        self.events.push((
            tick,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(microseconds_per_beat))),
        ));
        self
    }

    pub fn note_on(mut self, tick: u32, key: u8, vel: u8) -> Self {
        self.events.push((
            tick,
            TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(vel),
                },
            },
        ));
        self
    }

    pub fn note_off(mut self, tick: u32, key: u8) -> Self {
        self.events.push((
            tick,
            TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOff {
                    key: u7::new(key),
                    vel: u7::new(64),
                },
            },
        ));
        self
    }

    pub fn note(self, start_tick: u32, duration_tick: u32, key: u8) -> Self {
        self.note_on(start_tick, key, 80)
            .note_off(start_tick.saturating_add(duration_tick), key)
    }

    pub fn track_name(mut self, tick: u32, name: &'static str) -> Self {
        self.events.push((
            tick,
            TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
        ));
        self
    }

    fn build(mut self) -> Vec<TrackEvent<'static>> {
        // stable: same-tick events keep insertion order
        self.events.sort_by_key(|(tick, _)| *tick);

        let mut track: Vec<TrackEvent<'static>> = Vec::new();
        let mut last_tick: u32 = 0;
        for (tick, kind) in self.events {
            track.push(TrackEvent {
                delta: u28::new(tick - last_tick),
                kind,
            });
            last_tick = tick;
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        track
    }
}

impl Default for TrackBuilder {
    fn default() -> Self {
        TrackBuilder::new()
    }
}

pub fn encode(ticks_per_beat: u16, tracks: Vec<TrackBuilder>) -> io::Result<Vec<u8>> {
    let format: Format = if tracks.len() == 1 {
        Format::SingleTrack
    } else {
        Format::Parallel
    };
    let smf: Smf<'static> = Smf {
        header: Header::new(format, Timing::Metrical(u15::new(ticks_per_beat))),
        tracks: tracks.into_iter().map(TrackBuilder::build).collect(),
    };

    let mut buffer: Vec<u8> = Vec::new();
    smf.write_std(&mut buffer)?;
    Ok(buffer)
}

/// C4 up to C5 as half-beat notes separated by half-beat rests, 120 BPM.
pub fn demo_song() -> io::Result<Vec<u8>> {
    let ticks_per_beat: u16 = 480;
    let step: u32 = u32::from(ticks_per_beat) / 2;

    let mut track: TrackBuilder = TrackBuilder::new().tempo(0, 500_000);
    for (index, key) in [60, 62, 64, 65, 67, 69, 71, 72].into_iter().enumerate() {
        track = track.note(index as u32 * step * 2, step, key);
    }

    encode(ticks_per_beat, vec![track])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_song_parses() {
        let data = demo_song().unwrap();
        let smf = Smf::parse(&data).unwrap();
        assert_eq!(smf.tracks.len(), 1);
        match smf.header.timing {
            Timing::Metrical(ticks_per_beat) => assert_eq!(ticks_per_beat.as_int(), 480),
            Timing::Timecode(..) => panic!("expected metrical timing"),
        }
        // tempo + 8 × (on, off) + end of track
        assert_eq!(smf.tracks[0].len(), 18);
    }

    #[test]
    fn test_deltas_from_absolute_ticks() {
        let data = encode(96, vec![TrackBuilder::new().note(10, 20, 60)]).unwrap();
        let smf = Smf::parse(&data).unwrap();
        let deltas: Vec<u32> = smf.tracks[0].iter().map(|e| e.delta.as_int()).collect();
        assert_eq!(deltas, vec![10, 20, 0]);
    }

    #[test]
    fn test_note_end_saturates() {
        let track = TrackBuilder::new().note(u32::MAX - 10, 100, 60);
        let ticks: Vec<u32> = track.events.iter().map(|(tick, _)| *tick).collect();
        assert_eq!(ticks, vec![u32::MAX - 10, u32::MAX]);
    }
}
