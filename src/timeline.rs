/// A matched note-on/note-off pair in absolute ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Note {
    pitch: u8,
    start_tick: u32,
    duration_tick: u32,
}

impl Note {
    /// `None` for a pitch above 127 or a zero duration.
    pub fn new(pitch: u8, start_tick: u32, duration_tick: u32) -> Option<Self> {
        if pitch > 127 || duration_tick == 0 {
            return None;
        }
        Some(Note {
            pitch,
            start_tick,
            duration_tick,
        })
    }

    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    pub fn start_tick(&self) -> u32 {
        self.start_tick
    }

    pub fn duration_tick(&self) -> u32 {
        self.duration_tick
    }

    pub fn end_tick(&self) -> u32 {
        self.start_tick.saturating_add(self.duration_tick)
    }
}

/// Notes of one loaded song, ascending by start tick.
///
/// Replaced wholesale on reload; there is no way to mutate it in place.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NoteTimeline {
    notes: Vec<Note>,
    max_duration_tick: u32,
}

impl NoteTimeline {
    pub fn new(mut notes: Vec<Note>) -> Self {
        // stable: equal start ticks keep input order
        notes.sort_by_key(|note| note.start_tick);
        let max_duration_tick: u32 = notes
            .iter()
            .map(|note| note.duration_tick)
            .max()
            .unwrap_or(0);

        NoteTimeline {
            notes,
            max_duration_tick,
        }
    }

    pub fn empty() -> Self {
        NoteTimeline::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn max_duration_tick(&self) -> u32 {
        self.max_duration_tick
    }

    /// Tick at which the last sounding note ends.
    pub fn end_tick(&self) -> u32 {
        self.notes.iter().map(Note::end_tick).max().unwrap_or(0)
    }

    /// Notes whose start tick lies in `lo..=hi`.
    pub fn starting_between(&self, lo: u32, hi: u32) -> &[Note] {
        if lo > hi {
            return &[];
        }
        let begin: usize = self.notes.partition_point(|note| note.start_tick < lo);
        let end: usize = self.notes.partition_point(|note| note.start_tick <= hi);
        &self.notes[begin..end]
    }
}

impl<'a> IntoIterator for &'a NoteTimeline {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: u8, start_tick: u32, duration_tick: u32) -> Note {
        Note::new(pitch, start_tick, duration_tick).unwrap()
    }

    #[test]
    fn test_note_rejects_invalid() {
        assert!(Note::new(128, 0, 10).is_none());
        assert!(Note::new(60, 0, 0).is_none());
        assert!(Note::new(127, 0, 1).is_some());
    }

    #[test]
    fn test_sorted_stable() {
        let timeline = NoteTimeline::new(vec![
            note(64, 480, 10),
            note(60, 0, 20),
            note(67, 480, 30),
            note(62, 240, 40),
        ]);
        let pitches: Vec<u8> = timeline.iter().map(|n| n.pitch()).collect();
        assert_eq!(pitches, vec![60, 62, 64, 67]);
        assert_eq!(timeline.max_duration_tick(), 40);
        assert_eq!(timeline.end_tick(), 510);
    }

    #[test]
    fn test_starting_between() {
        let timeline = NoteTimeline::new(vec![
            note(60, 0, 10),
            note(62, 100, 10),
            note(64, 100, 10),
            note(65, 200, 10),
        ]);
        assert_eq!(timeline.starting_between(0, 99).len(), 1);
        assert_eq!(timeline.starting_between(100, 100).len(), 2);
        assert_eq!(timeline.starting_between(101, 300).len(), 1);
        assert_eq!(timeline.starting_between(0, u32::MAX).len(), 4);
        assert!(timeline.starting_between(300, 100).is_empty());
    }

    #[test]
    fn test_empty() {
        let timeline = NoteTimeline::empty();
        assert!(timeline.is_empty());
        assert_eq!(timeline.end_tick(), 0);
        assert!(timeline.starting_between(0, 1_000).is_empty());
    }
}
