pub mod strain;

pub use self::strain::Strain;

/// Peak tracking over fixed-length strain sections, the scaffolding
/// every decay-based skill plugs into.
#[derive(Clone, Debug)]
pub(crate) struct StrainSkill {
    pub curr_section_peak: f64,
    pub curr_section_end: f64,
    pub strain_peaks: Vec<f64>,
}

impl Default for StrainSkill {
    fn default() -> Self {
        Self {
            curr_section_peak: 0.0,
            curr_section_end: 0.0,
            // a few minutes of chart at 400ms per section
            strain_peaks: Vec::with_capacity(256),
        }
    }
}

impl StrainSkill {
    pub const SECTION_LEN: f64 = 400.0;

    pub fn save_curr_peak(&mut self) {
        self.strain_peaks.push(self.curr_section_peak);
    }

    pub fn start_new_section_from(&mut self, initial_strain: f64) {
        // A new section does not start at zero; it continues from the
        // decayed strain at the section boundary.
        self.curr_section_peak = initial_strain;
    }

    pub fn get_curr_strain_peaks(mut self) -> Vec<f64> {
        self.strain_peaks.push(self.curr_section_peak);

        self.strain_peaks
    }
}
