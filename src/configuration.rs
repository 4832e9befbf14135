#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolution of the calculated isotope pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MassMode {
    /// Continuous mass differences, one peak per distinct isotope combination.
    #[default]
    Accurate,
    /// Peaks binned to integer mass units.
    Nominal,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// Number of mass units beyond the monoisotopic peak to calculate.
    pub mass_filter: usize,
    pub mode: MassMode,
    /// Peaks below this abundance (percent of the monoisotopic peak) are dropped from the result.
    pub minimum_abundance: f64,
}

impl Configuration {
    pub fn new(mass_filter: usize, mode: MassMode, minimum_abundance: f64) -> Self {
        Self {
            mass_filter,
            mode,
            minimum_abundance: minimum_abundance.max(0.0),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(3, MassMode::Accurate, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.mass_filter, 3);
        assert_eq!(config.mode, MassMode::Accurate);
        assert_eq!(config.minimum_abundance, 0.0);
    }

    #[test]
    fn test_negative_minimum_abundance_is_clamped() {
        let config = Configuration::new(2, MassMode::Nominal, -5.0);
        assert_eq!(config.minimum_abundance, 0.0);
    }
}
