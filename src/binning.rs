use ndarray::{s, Array1};

use crate::distribution::{Distribution, IsotopicPeak, MassFilter};

/// Nominal mass distribution. Abundances are binned by integer mass shift into a fixed
/// length array covering the whole mass filter, so colliding contributions are summed
/// in place instead of growing a list.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseDistribution {
    filter: MassFilter,
    bins: Array1<f64>,
}

impl DenseDistribution {
    /// Abundance per integer mass shift, index 0 is the monoisotopic bin.
    pub fn bins(&self) -> &Array1<f64> {
        &self.bins
    }

    /// Bin index of a mass shift, if within the filter.
    fn bin_index(&self, mass_shift: f64) -> Option<usize> {
        bin_index(mass_shift, self.filter)
    }
}

fn bin_index(mass_shift: f64, filter: MassFilter) -> Option<usize> {
    if mass_shift < 0.0 || !filter.admits(mass_shift) {
        return None;
    }
    Some(mass_shift.round() as usize)
}

impl Distribution for DenseDistribution {
    fn empty(filter: MassFilter) -> Self {
        Self {
            filter,
            bins: Array1::zeros(filter.bins()),
        }
    }

    fn point(abundance: f64, mass_shift: f64, filter: MassFilter) -> Self {
        let mut distribution = Self::empty(filter);
        if let Some(index) = bin_index(mass_shift, filter) {
            distribution.bins[index] = abundance;
        }
        distribution
    }

    fn filter(&self) -> MassFilter {
        self.filter
    }

    fn scale_and_shift(&self, abundance: f64, mass_shift: f64) -> Self {
        let mut distribution = Self::empty(self.filter);
        let Some(offset) = self.bin_index(mass_shift) else {
            return distribution;
        };
        let length = self.bins.len() - offset;
        let mut target = distribution.bins.slice_mut(s![offset..]);
        target.assign(&self.bins.slice(s![..length]));
        target *= abundance;
        distribution
    }

    fn convolve(&self, other: &Self) -> Self {
        debug_assert_eq!(self.filter(), other.filter());
        let mut distribution = Self::empty(self.filter);
        let bins = self.bins.len();
        for (a, &abundance_a) in self.bins.iter().enumerate() {
            if abundance_a == 0.0 {
                continue;
            }
            for (b, &abundance_b) in other.bins.iter().enumerate().take(bins - a) {
                distribution.bins[a + b] += abundance_a * abundance_b;
            }
        }
        distribution
    }

    fn merge(&mut self, other: Self) {
        debug_assert_eq!(self.filter(), other.filter());
        self.bins += &other.bins;
    }

    fn into_peaks(self) -> Vec<IsotopicPeak> {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, &abundance)| abundance > 0.0)
            .map(|(index, &abundance)| IsotopicPeak::new(abundance, index as f64))
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.bins.iter().all(|&abundance| abundance == 0.0)
    }
}
