#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half a mass unit, so a mass shift is kept whenever it rounds to a shift within the filter.
const NOMINAL_TOLERANCE: f64 = 0.5;

/// A single isotope peak.
///
/// While calculating, `mass` is the shift from the monoisotopic peak and `abundance` the
/// product of the contributing isotope ratios. In a finished
/// [`MoleculeIsotopeProfile`](crate::isotope_profile::MoleculeIsotopeProfile) `mass` is
/// absolute and `abundance` is a percentage of the monoisotopic peak.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsotopicPeak {
    pub abundance: f64,
    pub mass: f64,
}

impl IsotopicPeak {
    pub const fn new(abundance: f64, mass: f64) -> Self {
        Self { abundance, mass }
    }
}

/// Upper bound on the mass shifts, in whole mass units beyond the monoisotopic peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassFilter(usize);

impl MassFilter {
    pub const fn new(max_shift: usize) -> Self {
        Self(max_shift)
    }

    pub const fn max_shift(&self) -> usize {
        self.0
    }

    /// Number of integer bins covered, `0..=max_shift`.
    pub const fn bins(&self) -> usize {
        self.0 + 1
    }

    /// Whether a mass shift rounds to a shift within the filter.
    pub fn admits(&self, mass_shift: f64) -> bool {
        mass_shift.abs() < self.0 as f64 + NOMINAL_TOLERANCE
    }
}

/// Intermediate isotope distribution, a collection of (abundance, mass shift) components
/// limited to a [`MassFilter`].
///
/// Every operation drops components that fall outside the filter.
pub trait Distribution: Sized {
    /// Distribution without any component.
    fn empty(filter: MassFilter) -> Self;

    /// Distribution with a single component.
    fn point(abundance: f64, mass_shift: f64, filter: MassFilter) -> Self;

    /// The identity of [`Distribution::convolve`], one component of abundance 1 at shift 0.
    fn unit(filter: MassFilter) -> Self {
        Self::point(1.0, 0.0, filter)
    }

    /// Mass filter shared by every distribution taking part in a calculation.
    fn filter(&self) -> MassFilter;

    /// Multiplies every abundance by `abundance` and adds `mass_shift` to every shift.
    fn scale_and_shift(&self, abundance: f64, mass_shift: f64) -> Self;

    /// Combines two independent distributions: abundances are multiplied and shifts added
    /// for every pair of components.
    fn convolve(&self, other: &Self) -> Self;

    /// Adds the components of a distribution of an independent branch.
    fn merge(&mut self, other: Self);

    /// Non-zero components as peaks, in no particular order.
    fn into_peaks(self) -> Vec<IsotopicPeak>;

    fn is_empty(&self) -> bool;
}

/// Sparse distribution for accurate masses, one entry per isotope combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseDistribution {
    filter: MassFilter,
    peaks: Vec<IsotopicPeak>,
}

impl SparseDistribution {
    pub fn peaks(&self) -> &[IsotopicPeak] {
        &self.peaks
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }
}

impl Distribution for SparseDistribution {
    fn empty(filter: MassFilter) -> Self {
        Self {
            filter,
            peaks: Vec::new(),
        }
    }

    fn point(abundance: f64, mass_shift: f64, filter: MassFilter) -> Self {
        let mut distribution = Self::empty(filter);
        if filter.admits(mass_shift) {
            distribution
                .peaks
                .push(IsotopicPeak::new(abundance, mass_shift));
        }
        distribution
    }

    fn filter(&self) -> MassFilter {
        self.filter
    }

    fn scale_and_shift(&self, abundance: f64, mass_shift: f64) -> Self {
        let peaks = self
            .peaks
            .iter()
            .map(|peak| IsotopicPeak::new(peak.abundance * abundance, peak.mass + mass_shift))
            .filter(|peak| self.filter.admits(peak.mass))
            .collect();
        Self {
            filter: self.filter,
            peaks,
        }
    }

    fn convolve(&self, other: &Self) -> Self {
        debug_assert_eq!(self.filter(), other.filter());
        let mut peaks = Vec::with_capacity(self.peaks.len() * other.peaks.len());
        for a in self.peaks.iter() {
            for b in other.peaks.iter() {
                let mass_shift = a.mass + b.mass;
                if self.filter.admits(mass_shift) {
                    peaks.push(IsotopicPeak::new(a.abundance * b.abundance, mass_shift));
                }
            }
        }
        Self {
            filter: self.filter,
            peaks,
        }
    }

    fn merge(&mut self, other: Self) {
        debug_assert_eq!(self.filter(), other.filter());
        self.peaks.extend(other.peaks);
    }

    fn into_peaks(self) -> Vec<IsotopicPeak> {
        self.peaks
            .into_iter()
            .filter(|peak| peak.abundance > 0.0)
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}
