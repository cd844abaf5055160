/// A single raw note of a keys chart.
///
/// Times are given in milliseconds and are expected to be snapped to
/// integer values upstream.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Note {
    /// The column the note occupies.
    pub column: usize,
    /// The time at which the note must be pressed.
    pub start_time: f64,
    /// The time at which the note is released.
    ///
    /// Matches `start_time` for tap notes.
    pub end_time: f64,
}

impl Note {
    /// A note that is pressed and released at the same instant.
    pub const fn tap(column: usize, time: f64) -> Self {
        Self {
            column,
            start_time: time,
            end_time: time,
        }
    }

    /// A note that must be held from `start_time` until `end_time`.
    pub const fn hold(column: usize, start_time: f64, end_time: f64) -> Self {
        Self {
            column,
            start_time,
            end_time,
        }
    }

    /// Whether the note requires sustained input.
    pub fn is_hold(&self) -> bool {
        self.end_time > self.start_time
    }

    /// The amount of time the note must be held for.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
