use crate::{
    difficulty::object::DifficultyObject,
    util::{difficulty::logistic, float_ext::FloatExt},
};

use super::StrainSkill;

/// Decaying per-column and cross-column load accumulator.
///
/// One instance processes one chart: every [`DifficultyObject`] is fed
/// in chronological order exactly once via [`process`], mutating the
/// per-column filters and the overall filter and folding the combined
/// strain into 400ms section peaks.
///
/// [`process`]: Self::process
#[derive(Clone, Debug)]
pub struct Strain {
    inner: StrainSkill,

    start_times: Box<[f64]>,
    end_times: Box<[f64]>,
    individual_strains: Box<[f64]>,

    individual_strain: f64,
    overall_strain: f64,
    curr_strain: f64,

    curr_chord: Box<[bool]>,
    chord_difficulty: f64,
}

impl Strain {
    const INDIVIDUAL_DECAY_BASE: f64 = 0.125;
    const OVERALL_DECAY_BASE: f64 = 0.30;
    const RELEASE_THRESHOLD: f64 = 24.0;

    /// Notes closer to each other than this count as part of the same
    /// chord.
    const CHORD_TIME_EPSILON: f64 = 1.0;

    pub fn new(total_columns: usize) -> Self {
        Self {
            inner: StrainSkill::default(),
            start_times: vec![0.0; total_columns].into_boxed_slice(),
            end_times: vec![0.0; total_columns].into_boxed_slice(),
            individual_strains: vec![0.0; total_columns].into_boxed_slice(),
            individual_strain: 0.0,
            overall_strain: 1.0,
            curr_strain: 0.0,
            curr_chord: vec![false; total_columns].into_boxed_slice(),
            chord_difficulty: 0.0,
        }
    }

    /// Feeds the next object of the chart into the skill.
    ///
    /// Objects must arrive in chronological order, each exactly once.
    pub fn process(&mut self, curr: &DifficultyObject, objects: &[DifficultyObject]) {
        if curr.idx == 0 {
            self.inner.curr_section_end =
                (curr.start_time / StrainSkill::SECTION_LEN).ceil() * StrainSkill::SECTION_LEN;
        }

        while curr.start_time > self.inner.curr_section_end {
            self.inner.save_curr_peak();

            let initial_strain =
                self.calculate_initial_strain(self.inner.curr_section_end, curr, objects);
            self.inner.start_new_section_from(initial_strain);

            self.inner.curr_section_end += StrainSkill::SECTION_LEN;
        }

        self.curr_strain += self.strain_value_of(curr, objects);
        self.inner.curr_section_peak = self.curr_strain.max(self.inner.curr_section_peak);
    }

    /// The combined strain carried after the most recently processed
    /// object.
    pub const fn current_strain(&self) -> f64 {
        self.curr_strain
    }

    /// The peak combined strain of each section, consuming the skill.
    ///
    /// The section containing the last processed object is included.
    pub fn into_current_strain_peaks(self) -> Vec<f64> {
        self.inner.get_curr_strain_peaks()
    }

    fn calculate_initial_strain(
        &self,
        offset: f64,
        curr: &DifficultyObject,
        objects: &[DifficultyObject],
    ) -> f64 {
        let prev_start_time = curr.previous(0, objects).map_or(0.0, |prev| prev.start_time);

        apply_decay(
            self.individual_strain,
            offset - prev_start_time,
            Self::INDIVIDUAL_DECAY_BASE,
        ) + apply_decay(
            self.overall_strain,
            offset - prev_start_time,
            Self::OVERALL_DECAY_BASE,
        )
    }

    fn strain_value_of(&mut self, curr: &DifficultyObject, objects: &[DifficultyObject]) -> f64 {
        let start_time = curr.start_time;
        let end_time = curr.end_time;
        let column = curr.column;
        let mut is_overlapping = false;

        // Lowest value we can assume with the current information
        let mut closest_end_time = (end_time - start_time).abs();
        // Factor to all additional strains in case something else is held
        let mut hold_factor = 1.0;
        // Addition to the current note in case it's a hold and has to be
        // released awkwardly
        let mut hold_addition = 0.0;

        for &prev_end_time in self.end_times.iter() {
            // The current note is overlapped if a previous note or end is
            // overlapping the current note body
            is_overlapping |= prev_end_time > start_time + 1.0 && end_time > prev_end_time + 1.0;

            // We give a slight bonus to everything if something is held
            // meanwhile
            if prev_end_time > end_time + 1.0 {
                hold_factor = 1.25;
            }

            closest_end_time = closest_end_time.min((end_time - prev_end_time).abs());
        }

        // The hold addition is only valid if there is no other note with a
        // similar ending; releasing multiple notes is just as easy as
        // releasing one.
        if is_overlapping {
            hold_addition = logistic(closest_end_time, Self::RELEASE_THRESHOLD, 0.5, None);
        }

        // A gap to the previous object means this note opens a new chord;
        // notes continuing an open chord reuse the memoized difficulty.
        if curr.idx == 0 || curr.delta_time > Self::CHORD_TIME_EPSILON {
            self.refresh_chord(curr, objects);
        }

        self.individual_strains[column] = apply_decay(
            self.individual_strains[column],
            start_time - self.start_times[column],
            Self::INDIVIDUAL_DECAY_BASE,
        );
        self.individual_strains[column] += 2.0 * hold_factor;

        // For notes at the same time (in a chord), the individual strain is
        // the hardest individual strain out of those columns
        self.individual_strain = if curr.delta_time <= Self::CHORD_TIME_EPSILON {
            self.individual_strain.max(self.individual_strains[column])
        } else {
            self.individual_strains[column]
        };

        self.overall_strain = apply_decay(
            self.overall_strain,
            curr.delta_time,
            Self::OVERALL_DECAY_BASE,
        );
        self.overall_strain += (1.0 + hold_addition + self.chord_difficulty) * hold_factor;

        self.start_times[column] = start_time;
        self.end_times[column] = end_time;

        // By subtracting the running strain, the skill effectively only
        // considers the maximum strain of any one note within each section.
        self.individual_strain + self.overall_strain - self.curr_strain
    }

    fn refresh_chord(&mut self, curr: &DifficultyObject, objects: &[DifficultyObject]) {
        self.curr_chord.fill(false);
        self.curr_chord[curr.column] = true;

        let mut forwards_idx = 0;

        while let Some(next) = curr.next(forwards_idx, objects) {
            if !FloatExt::eq(next.start_time, curr.start_time) {
                break;
            }

            self.curr_chord[next.column] = true;
            forwards_idx += 1;
        }

        // The chord always contains the triggering note's own column.
        let chord_size = self.curr_chord.iter().filter(|&&pressed| pressed).count();

        self.chord_difficulty = chord_complexity(&self.curr_chord) / chord_size as f64;
    }
}

/// Rates the shape of a chord: every pressed column scores for raw
/// simultaneous count and every pressed/unpressed boundary between
/// neighboring columns scores extra, so jagged shapes outweigh solid
/// blocks. On odd column counts the middle column is special and worth
/// a flat bonus instead of the regular per-column score.
fn chord_complexity(chord: &[bool]) -> f64 {
    let active = chord.iter().filter(|&&pressed| pressed).count();

    // A lone note is not a chord.
    if active <= 1 {
        return active as f64;
    }

    let special_column = (chord.len() % 2 == 1).then_some(chord.len() / 2);

    let mut result = 0.0;

    if let Some(special) = special_column {
        if chord[special] {
            result += 3.0;
        }
    }

    for (i, &pressed) in chord.iter().enumerate() {
        if pressed && Some(i) != special_column {
            result += 1.0;
        }
    }

    for pair in chord.windows(2) {
        if pair[0] != pair[1] {
            result += 1.5;
        }
    }

    result
}

fn apply_decay(value: f64, delta_time: f64, decay_base: f64) -> f64 {
    value * f64::powf(decay_base, delta_time / 1000.0)
}

#[cfg(test)]
mod tests {
    use crate::{difficulty::DifficultyValues, model::note::Note};

    use super::*;

    #[test]
    fn lone_note_is_not_a_chord() {
        assert_eq!(chord_complexity(&[true, false, false, false]), 1.0);
    }

    #[test]
    fn solid_chord_scores_active_count() {
        assert_eq!(chord_complexity(&[true, true, true, true]), 4.0);
    }

    #[test]
    fn jagged_chord_scores_boundaries() {
        // 2 active + 3 boundaries * 1.5
        assert_eq!(chord_complexity(&[true, false, true, false]), 6.5);
    }

    #[test]
    fn middle_column_is_special_on_odd_counts() {
        // 4 active + middle bonus, no boundaries
        assert_eq!(chord_complexity(&[true; 5]), 7.0);

        // middle bonus + 1 active + 3 boundaries * 1.5
        assert_eq!(chord_complexity(&[true, false, true, false, false]), 8.5);
    }

    #[test]
    fn release_threshold_is_the_logistic_midpoint() {
        let addition = |closest_end_time: f64| {
            logistic(closest_end_time, Strain::RELEASE_THRESHOLD, 0.5, None)
        };

        assert!((addition(Strain::RELEASE_THRESHOLD) - 0.5).abs() < f64::EPSILON);

        // A release together with another one is free, an isolated one is
        // worth the full addition.
        assert!(addition(0.0) < 1e-4);
        assert!(addition(10_000.0) > 1.0 - 1e-9);
    }

    #[test]
    fn columns_decay_independently() {
        let notes = vec![Note::tap(0, 0.0), Note::tap(3, 500.0)];
        let objects = DifficultyValues::create_difficulty_objects(1.0, &notes);

        let mut strain = Strain::new(4);

        for curr in objects.iter() {
            strain.process(curr, &objects);
        }

        // The second note must not have touched the first note's column.
        assert_eq!(strain.individual_strains[0], 2.0);
        assert_eq!(strain.individual_strains[3], 2.0);
        assert_eq!(strain.individual_strains[1], 0.0);
        assert_eq!(strain.individual_strains[2], 0.0);
    }
}
