use log::warn;

pub const DEFAULT_TICKS_PER_BEAT: u32 = 480;
// 120 BPM
pub const DEFAULT_MICROSECONDS_PER_BEAT: u32 = 500_000;

/// Tick to wall-clock conversion for a single global tempo.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TimeBase {
    ticks_per_beat: u32,
    microseconds_per_beat: u32,
    seconds_per_tick: f64,
}

impl TimeBase {
    /// Zero arguments are replaced by the defaults.
    pub fn new(ticks_per_beat: u32, microseconds_per_beat: u32) -> Self {
        let ticks_per_beat: u32 = if ticks_per_beat == 0 {
            warn!(
                "ticks per beat is 0, using {} instead",
                DEFAULT_TICKS_PER_BEAT
            );
            DEFAULT_TICKS_PER_BEAT
        } else {
            ticks_per_beat
        };
        let microseconds_per_beat: u32 = if microseconds_per_beat == 0 {
            warn!(
                "tempo is 0 microseconds per beat, using {} instead",
                DEFAULT_MICROSECONDS_PER_BEAT
            );
            DEFAULT_MICROSECONDS_PER_BEAT
        } else {
            microseconds_per_beat
        };

        TimeBase {
            ticks_per_beat,
            microseconds_per_beat,
            seconds_per_tick: f64::from(microseconds_per_beat)
                / (1_000_000.0 * f64::from(ticks_per_beat)),
        }
    }

    pub fn ticks_per_beat(&self) -> u32 {
        self.ticks_per_beat
    }

    pub fn microseconds_per_beat(&self) -> u32 {
        self.microseconds_per_beat
    }

    pub fn seconds_per_tick(&self) -> f64 {
        self.seconds_per_tick
    }

    pub fn tick_to_seconds(&self, tick: u32) -> f64 {
        f64::from(tick) * self.seconds_per_tick
    }

    /// Fractional ticks; callers round in whichever direction keeps them conservative.
    pub fn seconds_to_ticks(&self, seconds: f64) -> f64 {
        seconds / self.seconds_per_tick
    }

    pub fn bpm(&self) -> f64 {
        60_000_000.0 / f64::from(self.microseconds_per_beat)
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        TimeBase::new(DEFAULT_TICKS_PER_BEAT, DEFAULT_MICROSECONDS_PER_BEAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_tempo() {
        let time_base = TimeBase::default();
        assert_eq!(time_base.ticks_per_beat(), 480);
        assert_eq!(time_base.microseconds_per_beat(), 500_000);
        assert!(close(time_base.bpm(), 120.0));
        assert!(close(time_base.tick_to_seconds(480), 0.5));
        assert!(close(time_base.tick_to_seconds(240), 0.25));
    }

    #[test]
    fn test_linearity() {
        let time_base = TimeBase::new(96, 612_345);
        for (a, b) in [(0, 0), (1, 2), (95, 96), (1_000, 77_777), (123_456, 654_321)] {
            let sum = time_base.tick_to_seconds(a + b);
            let parts = time_base.tick_to_seconds(a) + time_base.tick_to_seconds(b);
            assert!(close(sum, parts), "{} + {}", a, b);
        }
        assert!(close(
            time_base.tick_to_seconds(3_000),
            3.0 * time_base.tick_to_seconds(1_000)
        ));
    }

    #[test]
    fn test_seconds_to_ticks_inverse() {
        let time_base = TimeBase::new(480, 400_000);
        assert!(close(time_base.seconds_to_ticks(time_base.tick_to_seconds(1_234)), 1_234.0));
    }

    #[test]
    fn test_zero_replaced_by_defaults() {
        let time_base = TimeBase::new(0, 0);
        assert_eq!(time_base, TimeBase::default());
    }
}
