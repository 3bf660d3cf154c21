use log::warn;

use super::event::{DataKind, Event};
use super::pending::PendingNotes;
use crate::timeline::Note;

pub struct Track {
    pub track_index: usize,
    pub events: Vec<Event>,
}

impl Track {
    pub fn new(track_index: usize) -> Self {
        Track {
            track_index,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, tick: u32, data_kind: DataKind) {
        self.events.push(Event::new(tick, data_kind));
    }

    /// Note-ons with nonzero velocity; zero-velocity ones were already stored as note-offs.
    pub fn note_on_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event.data_kind, DataKind::NoteOn(_)))
            .count()
    }

    pub fn first_tempo(&self) -> Option<u32> {
        self.events.iter().find_map(|event| match event.data_kind {
            DataKind::ChangeTempo(tempo) => Some(tempo),
            _ => None,
        })
    }

    /// Pairs note-ons with the following note-off of the same key.
    pub fn notes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = Vec::new();
        let mut pending: PendingNotes = PendingNotes::new();

        for event in self.events.iter() {
            match event.data_kind {
                DataKind::NoteOn(key) => {
                    if let Some(discarded) = pending.press(key, event.tick) {
                        warn!(
                            "Track:{} Tick:{} Key:{} NoteOn without NoteOff, start at tick {} dropped.",
                            self.track_index, event.tick, key, discarded
                        );
                    }
                }
                DataKind::NoteOff(key) => {
                    if let Some(start_tick) = pending.release(key) {
                        let duration: u32 = event.tick.saturating_sub(start_tick);
                        if let Some(note) = Note::new(key, start_tick, duration) {
                            notes.push(note);
                        }
                    }
                }
                DataKind::ChangeTempo(_) => (),
            }
        }

        if pending.len() > 0 {
            warn!(
                "Track:{} {} NoteOn events never received a NoteOff.",
                self.track_index,
                pending.len()
            );
        }

        notes.sort_by_key(|note| note.start_tick());
        notes
    }
}
