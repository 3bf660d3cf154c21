#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DataKind {
    NoteOn(u8),
    // also a note-on with zero velocity
    NoteOff(u8),
    ChangeTempo(u32),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Event {
    pub tick: u32,
    pub data_kind: DataKind,
}

impl Event {
    pub fn new(tick: u32, data_kind: DataKind) -> Self {
        Event { tick, data_kind }
    }
}
