use ndarray::Array1;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{configuration::MassMode, distribution::IsotopicPeak};

/// Theoretical isotope pattern of a molecule.
///
/// Peaks are ordered by ascending mass, abundances are a percentage of the monoisotopic peak.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoleculeIsotopeProfile {
    pub formula: String,
    /// Sum of the lightest isotope mass of every atom
    pub monoisotopic_mass: f64,
    /// Sum of the lightest isotope mass number of every atom
    pub nominal_monoisotopic_mass: f64,
    pub mode: MassMode,
    pub peaks: Vec<IsotopicPeak>,
}

impl MoleculeIsotopeProfile {
    /// Turns the unsorted peaks of a molecule into its isotope profile.
    ///
    /// Peaks are sorted by mass shift, shifted to absolute masses (nominal masses in
    /// [`MassMode::Nominal`]) and scaled so the monoisotopic peak has an abundance of 100.
    ///
    /// # Arguments
    /// * `formula` - Formula of the molecule
    /// * `monoisotopic_mass` - Accurate monoisotopic mass
    /// * `nominal_monoisotopic_mass` - Nominal monoisotopic mass
    /// * `mode` - Mass mode the peaks were calculated in
    /// * `peaks` - Peaks with mass shifts relative to the monoisotopic peak
    /// * `minimum_abundance` - Peaks below this percentage are dropped, except the monoisotopic one
    ///
    pub fn finalize(
        formula: &str,
        monoisotopic_mass: f64,
        nominal_monoisotopic_mass: f64,
        mode: MassMode,
        mut peaks: Vec<IsotopicPeak>,
        minimum_abundance: f64,
    ) -> Self {
        peaks.sort_by(|a, b| a.mass.total_cmp(&b.mass));

        let base_mass = match mode {
            MassMode::Accurate => monoisotopic_mass,
            MassMode::Nominal => nominal_monoisotopic_mass,
        };

        let peaks = peaks
            .into_iter()
            .filter(|peak| peak.mass == 0.0 || peak.abundance * 100.0 >= minimum_abundance)
            .map(|peak| IsotopicPeak::new(peak.abundance * 100.0, peak.mass + base_mass))
            .collect();

        Self {
            formula: formula.to_string(),
            monoisotopic_mass,
            nominal_monoisotopic_mass,
            mode,
            peaks,
        }
    }

    /// The monoisotopic peak, the first peak of the profile.
    pub fn monoisotopic_peak(&self) -> Option<&IsotopicPeak> {
        self.peaks.first()
    }

    /// The most abundant peak.
    pub fn base_peak(&self) -> Option<&IsotopicPeak> {
        self.peaks
            .iter()
            .max_by(|a, b| a.abundance.total_cmp(&b.abundance))
    }

    pub fn masses(&self) -> Array1<f64> {
        self.peaks.iter().map(|peak| peak.mass).collect()
    }

    pub fn abundances(&self) -> Array1<f64> {
        self.peaks.iter().map(|peak| peak.abundance).collect()
    }

    /// Mass shifts of the peaks relative to the monoisotopic peak.
    pub fn mass_shifts(&self) -> Array1<f64> {
        let base_mass = match self.mode {
            MassMode::Accurate => self.monoisotopic_mass,
            MassMode::Nominal => self.nominal_monoisotopic_mass,
        };
        self.peaks
            .iter()
            .map(|peak| peak.mass - base_mass)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IsotopicPeak> {
        self.peaks.iter()
    }
}

impl<'a> IntoIterator for &'a MoleculeIsotopeProfile {
    type Item = &'a IsotopicPeak;
    type IntoIter = std::slice::Iter<'a, IsotopicPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}
