//! Per-frame projection of the note timeline onto the scrolling roll.
//!
//! Notes fall from the top of the viewport towards the hit line; a note's lower
//! edge touches the hit line exactly when the playhead reaches its start.

use crate::geometry::Rect;
use crate::keyboard::KeyboardLayout;
use crate::time_base::TimeBase;
use crate::timeline::{Note, NoteTimeline};

pub const DEFAULT_HIT_LINE_RATIO: f32 = 0.85;
pub const DEFAULT_SCROLL_SPEED: f32 = 120.0;

/// A note rectangle already clipped to the viewport.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct VisibleNote {
    pub rect: Rect,
    pub pitch: u8,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScrollProjector {
    viewport: Rect,
    hit_line_ratio: f32,
    scroll_speed: f32,
}

impl ScrollProjector {
    pub fn new(viewport: Rect, hit_line_ratio: f32, scroll_speed: f32) -> Self {
        ScrollProjector {
            viewport,
            hit_line_ratio,
            scroll_speed,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn hit_line_y(&self) -> f32 {
        self.viewport.y + self.viewport.height * self.hit_line_ratio
    }

    /// Seconds a note start needs to travel from the top of the viewport to the hit line.
    pub fn lead_in_seconds(&self) -> f64 {
        if self.scroll_speed > 0.0 {
            f64::from(self.hit_line_y() - self.viewport.y) / f64::from(self.scroll_speed)
        } else {
            0.0
        }
    }

    /// Unclipped rectangle of `note`, or `None` when it lies fully above or below the viewport.
    fn note_span(
        &self,
        note: &Note,
        time_base: &TimeBase,
        playhead_seconds: f64,
    ) -> Option<(f32, f32)> {
        let start_s: f64 = time_base.tick_to_seconds(note.start_tick());
        let dur_s: f64 = time_base.tick_to_seconds(note.duration_tick());
        let speed: f64 = f64::from(self.scroll_speed);

        let vertical_offset: f64 = (start_s - playhead_seconds) * speed;
        let note_height: f64 = (dur_s * speed).max(1.0);
        let top_y: f64 = f64::from(self.hit_line_y()) - vertical_offset - note_height;

        if top_y + note_height < f64::from(self.viewport.y)
            || top_y > f64::from(self.viewport.bottom())
        {
            return None;
        }
        Some((top_y as f32, note_height as f32))
    }

    /// Start-tick window that can contain every visible note; the exact cull still runs on it.
    fn candidate_ticks(
        &self,
        timeline: &NoteTimeline,
        time_base: &TimeBase,
        playhead_seconds: f64,
    ) -> (u32, u32) {
        let speed: f64 = f64::from(self.scroll_speed);
        let hit_line_y: f64 = f64::from(self.hit_line_y());
        let tallest: f64 =
            (time_base.tick_to_seconds(timeline.max_duration_tick()) * speed).max(1.0);

        // bottom edge below the viewport top
        let latest_s: f64 = playhead_seconds + (hit_line_y - f64::from(self.viewport.y)) / speed;
        // top edge above the viewport bottom, even for the longest note
        let earliest_s: f64 =
            playhead_seconds + (hit_line_y - f64::from(self.viewport.bottom()) - tallest) / speed;

        let hi: f64 = time_base.seconds_to_ticks(latest_s).ceil() + 1.0;
        let lo: f64 = time_base.seconds_to_ticks(earliest_s).floor() - 1.0;
        (
            lo.clamp(0.0, f64::from(u32::MAX)) as u32,
            hi.clamp(0.0, f64::from(u32::MAX)) as u32,
        )
    }

    /// Rectangles of every note intersecting the viewport at `playhead_seconds`.
    ///
    /// Notes whose pitch has no key in `layout` are skipped.
    pub fn project<L: KeyboardLayout>(
        &self,
        timeline: &NoteTimeline,
        time_base: &TimeBase,
        layout: &L,
        playhead_seconds: f64,
    ) -> Vec<VisibleNote> {
        let candidates: &[Note] = if self.scroll_speed > 0.0 && playhead_seconds.is_finite() {
            let (lo, hi) = self.candidate_ticks(timeline, time_base, playhead_seconds);
            timeline.starting_between(lo, hi)
        } else {
            timeline.notes()
        };

        let mut visible: Vec<VisibleNote> = Vec::new();
        for note in candidates {
            let (top_y, note_height) = match self.note_span(note, time_base, playhead_seconds) {
                Some(span) => span,
                None => continue,
            };
            let key = match layout.key(note.pitch()) {
                Some(key) => key,
                None => continue,
            };

            let rect: Rect = Rect::new(key.x, top_y, key.width, note_height);
            if let Some(rect) = rect.clip(&self.viewport) {
                visible.push(VisibleNote {
                    rect,
                    pitch: note.pitch(),
                });
            }
        }
        visible
    }

    /// Reference O(n) projection over the whole timeline.
    pub fn project_all<L: KeyboardLayout>(
        &self,
        timeline: &NoteTimeline,
        time_base: &TimeBase,
        layout: &L,
        playhead_seconds: f64,
    ) -> Vec<VisibleNote> {
        timeline
            .iter()
            .filter_map(|note| {
                let (top_y, note_height) = self.note_span(note, time_base, playhead_seconds)?;
                let key = layout.key(note.pitch())?;
                Rect::new(key.x, top_y, key.width, note_height)
                    .clip(&self.viewport)
                    .map(|rect| VisibleNote {
                        rect,
                        pitch: note.pitch(),
                    })
            })
            .collect()
    }
}

impl Default for ScrollProjector {
    fn default() -> Self {
        ScrollProjector::new(
            Rect::new(20.0, 65.0, 760.0, 264.0),
            DEFAULT_HIT_LINE_RATIO,
            DEFAULT_SCROLL_SPEED,
        )
    }
}
