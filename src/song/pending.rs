/// Explicit `pitch -> pending start tick` map for note-ons still waiting for their note-off.
pub struct PendingNotes {
    starts: [Option<u32>; 128],
}

impl PendingNotes {
    pub fn new() -> Self {
        PendingNotes {
            starts: [None; 128],
        }
    }

    /// Records a start for `key`, handing back a start it overwrote.
    pub fn press(&mut self, key: u8, tick: u32) -> Option<u32> {
        self.starts
            .get_mut(usize::from(key))
            .and_then(|slot| slot.replace(tick))
    }

    pub fn release(&mut self, key: u8) -> Option<u32> {
        self.starts
            .get_mut(usize::from(key))
            .and_then(|slot| slot.take())
    }

    pub fn len(&self) -> usize {
        self.starts.iter().filter(|start| start.is_some()).count()
    }
}
