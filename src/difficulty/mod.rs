//! Chart preprocessing, the strain skill, and the calculation driver.

use crate::model::{chart::Chart, note::Note};

use self::{attributes::StrainAttributes, object::DifficultyObject, skills::Strain};

pub mod attributes;
pub mod gradual;
pub mod object;
pub mod skills;

/// Difficulty calculator on charts.
///
/// # Example
///
/// ```
/// use keystrain::{Chart, Difficulty, Note};
///
/// let chart = Chart::new(4, vec![
///     Note::tap(0, 0.0),
///     Note::hold(1, 250.0, 1_000.0),
///     Note::tap(2, 500.0),
/// ])?;
///
/// let attrs = Difficulty::new().clock_rate(1.5).calculate(&chart);
///
/// assert_eq!(attrs.n_notes, 3);
/// # Ok::<(), keystrain::ChartError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Difficulty {
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl Difficulty {
    /// Creates a new difficulty calculator with default configuration.
    pub const fn new() -> Self {
        Self {
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Amount of notes to be processed.
    ///
    /// If you want to calculate the strain curve of a partial play,
    /// e.g. a fail, specify the amount of passed notes.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation, e.g. 1.5 for a
    /// rate-up modifier.
    ///
    /// | Minimum | Maximum |
    /// | :-----: | :-----: |
    /// | 0.01    | 100     |
    pub fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate.clamp(0.01, 100.0));

        self
    }

    /// Computes the strain curve of the given chart.
    pub fn calculate(&self, chart: &Chart) -> StrainAttributes {
        let values = DifficultyValues::calculate(self, chart);

        StrainAttributes {
            strains: values.strain.into_current_strain_peaks(),
            n_notes: values.n_notes,
            n_hold_notes: values.n_hold_notes,
        }
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or(1.0)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

/// Intermediate state of a full strain calculation, for callers that
/// want the [`Strain`] skill itself rather than [`StrainAttributes`].
pub struct DifficultyValues {
    pub strain: Strain,
    pub n_notes: u32,
    pub n_hold_notes: u32,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &Difficulty, chart: &Chart) -> Self {
        let notes = chart.notes();
        let notes = &notes[..notes.len().min(difficulty.get_passed_objects())];
        let clock_rate = difficulty.get_clock_rate();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            total_columns = chart.total_columns(),
            n_notes = notes.len(),
            clock_rate,
            "calculating strain curve"
        );

        let diff_objects = Self::create_difficulty_objects(clock_rate, notes);

        let mut strain = Strain::new(chart.total_columns());

        for curr in diff_objects.iter() {
            strain.process(curr, &diff_objects);
        }

        Self {
            strain,
            n_notes: notes.len() as u32,
            n_hold_notes: notes.iter().filter(|note| note.is_hold()).count() as u32,
        }
    }

    /// Enriches raw notes with their sequence positions and clock-rate
    /// adjusted times.
    pub fn create_difficulty_objects(clock_rate: f64, notes: &[Note]) -> Box<[DifficultyObject]> {
        let mut objects = Vec::with_capacity(notes.len());
        let mut last: Option<&Note> = None;

        for (idx, note) in notes.iter().enumerate() {
            objects.push(DifficultyObject::new(note, last, clock_rate, idx));
            last = Some(note);
        }

        objects.into_boxed_slice()
    }
}
