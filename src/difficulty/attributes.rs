/// The result of a strain calculation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StrainAttributes {
    /// The peak combined strain of each 400ms section of the chart.
    ///
    /// Combining these peaks into a single difficulty rating is left to
    /// the caller.
    pub strains: Vec<f64>,
    /// The amount of processed notes.
    pub n_notes: u32,
    /// The amount of processed hold notes.
    pub n_hold_notes: u32,
}
