#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    reference::{IsotopeTable, IsotopologueRecord},
    utils::nominal_mass,
};

/// One isotope of an element relative to the element's lightest isotope.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativeIsotope {
    /// Abundance divided by the abundance of the lightest isotope
    pub ratio: f64,
    /// Mass difference to the lightest isotope
    pub mass_shift: f64,
}

/// Isotopes of a single element normalized against its lightest isotope.
///
/// The first entry is always `(1.0, 0.0)` and mass shifts strictly increase with the index.
/// The expansion relies on the latter to stop early once the mass filter is exceeded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementIsotopeProfile {
    symbol: String,
    reference_mass: f64,
    reference_nominal_mass: f64,
    isotopes: Vec<RelativeIsotope>,
}

impl ElementIsotopeProfile {
    /// Looks up an element in the isotope table and builds its profile.
    ///
    /// # Arguments
    /// * `symbol` - Element symbol
    /// * `table` - Isotope reference table
    ///
    pub fn from_table(symbol: &str, table: &IsotopeTable) -> Result<Self, Error> {
        Self::from_records(symbol, table.get(symbol)?)
    }

    /// Builds the profile from the isotopes of an element, ordered by ascending mass.
    ///
    /// Records without abundance are skipped as they do not occur naturally.
    ///
    /// # Arguments
    /// * `symbol` - Element symbol, used for error reporting
    /// * `records` - Isotopes of the element
    ///
    pub fn from_records(symbol: &str, records: &[IsotopologueRecord]) -> Result<Self, Error> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.abundance.is_finite() || r.abundance < 0.0 || !r.mass.is_finite())
        {
            return Err(Error::InvalidAbundance {
                symbol: symbol.to_string(),
                index,
                abundance: record.abundance,
            });
        }

        let present = records
            .iter()
            .filter(|r| r.abundance > 0.0)
            .collect::<Vec<&IsotopologueRecord>>();
        let reference = match present.first() {
            Some(reference) => **reference,
            None => return Err(Error::EmptyIsotopeRecords(symbol.to_string())),
        };

        let isotopes = present
            .iter()
            .map(|record| RelativeIsotope {
                ratio: record.abundance / reference.abundance,
                mass_shift: record.mass - reference.mass,
            })
            .collect::<Vec<RelativeIsotope>>();

        Self::new(
            symbol.to_string(),
            reference.mass,
            reference.nominal_mass(),
            isotopes,
        )
    }

    fn new(
        symbol: String,
        reference_mass: f64,
        reference_nominal_mass: f64,
        isotopes: Vec<RelativeIsotope>,
    ) -> Result<Self, Error> {
        if let Some(index) = isotopes
            .windows(2)
            .position(|pair| pair[1].mass_shift <= pair[0].mass_shift)
        {
            return Err(Error::UnorderedIsotopes {
                symbol,
                index: index + 1,
            });
        }

        Ok(Self {
            symbol,
            reference_mass,
            reference_nominal_mass,
            isotopes,
        })
    }

    /// Same profile with every mass shift rounded to whole mass units, used for nominal patterns.
    pub fn to_nominal(&self) -> Result<Self, Error> {
        let isotopes = self
            .isotopes
            .iter()
            .map(|isotope| RelativeIsotope {
                ratio: isotope.ratio,
                mass_shift: nominal_mass(isotope.mass_shift),
            })
            .collect();
        Self::new(
            self.symbol.clone(),
            self.reference_mass,
            self.reference_nominal_mass,
            isotopes,
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Mass of the lightest isotope.
    pub fn reference_mass(&self) -> f64 {
        self.reference_mass
    }

    /// Mass number of the lightest isotope.
    pub fn reference_nominal_mass(&self) -> f64 {
        self.reference_nominal_mass
    }

    pub fn isotopes(&self) -> &[RelativeIsotope] {
        &self.isotopes
    }

    /// Elements with a single isotope have no isotope pattern of their own.
    pub fn is_monoisotopic(&self) -> bool {
        self.isotopes.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_chlorine() {
        let profile = ElementIsotopeProfile::from_table("Cl", &IsotopeTable::natural()).unwrap();
        assert_eq!(profile.symbol(), "Cl");
        assert!((profile.reference_mass() - 34.968852682).abs() < 1e-6);
        assert_eq!(profile.reference_nominal_mass(), 35.0);
        assert_eq!(profile.isotopes().len(), 2);
        assert_eq!(
            profile.isotopes()[0],
            RelativeIsotope {
                ratio: 1.0,
                mass_shift: 0.0
            }
        );
        assert!((profile.isotopes()[1].ratio - 0.2424 / 0.7576).abs() < 1e-3);
        assert!((profile.isotopes()[1].mass_shift - 1.99704992).abs() < 1e-6);
    }

    #[test]
    fn test_profile_single_isotope() {
        let profile = ElementIsotopeProfile::from_table("F", &IsotopeTable::natural()).unwrap();
        assert!(profile.is_monoisotopic());
        assert_eq!(
            profile.isotopes(),
            &[RelativeIsotope {
                ratio: 1.0,
                mass_shift: 0.0
            }]
        );
    }

    #[test]
    fn test_profile_unknown_element() {
        assert_eq!(
            ElementIsotopeProfile::from_table("Xx", &IsotopeTable::natural()),
            Err(Error::UnknownElement("Xx".to_string()))
        );
    }

    #[test]
    fn test_profile_skips_absent_isotopes() {
        let records = [
            IsotopologueRecord::new(10.0, 0.0),
            IsotopologueRecord::new(11.0, 0.8),
            IsotopologueRecord::new(12.0, 0.2),
        ];
        let profile = ElementIsotopeProfile::from_records("X", &records).unwrap();
        assert_eq!(profile.reference_mass(), 11.0);
        assert_eq!(profile.reference_nominal_mass(), 11.0);
        assert_eq!(profile.isotopes().len(), 2);
        assert!((profile.isotopes()[1].ratio - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_profile_rejects_unordered_isotopes() {
        let records = [
            IsotopologueRecord::new(12.0, 0.5),
            IsotopologueRecord::new(14.0, 0.3),
            IsotopologueRecord::new(13.0, 0.2),
        ];
        assert_eq!(
            ElementIsotopeProfile::from_records("X", &records),
            Err(Error::UnorderedIsotopes {
                symbol: "X".to_string(),
                index: 2
            })
        );
    }

    #[test]
    fn test_profile_rejects_invalid_abundance() {
        let records = [
            IsotopologueRecord::new(12.0, 0.5),
            IsotopologueRecord::new(13.0, -0.1),
        ];
        assert!(matches!(
            ElementIsotopeProfile::from_records("X", &records),
            Err(Error::InvalidAbundance { index: 1, .. })
        ));
    }

    #[test]
    fn test_profile_without_records() {
        assert_eq!(
            ElementIsotopeProfile::from_records("X", &[]),
            Err(Error::EmptyIsotopeRecords("X".to_string()))
        );
    }

    #[test]
    fn test_nominal_profile() {
        let profile = ElementIsotopeProfile::from_table("O", &IsotopeTable::natural())
            .unwrap()
            .to_nominal()
            .unwrap();
        let shifts = profile
            .isotopes()
            .iter()
            .map(|i| i.mass_shift)
            .collect::<Vec<f64>>();
        assert_eq!(shifts, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_reference_nominal_mass_from_mass_number() {
        let records = [
            IsotopologueRecord::with_mass_number(202, 201.970643, 0.2986),
            IsotopologueRecord::with_mass_number(204, 203.973494, 0.0687),
        ];
        let profile = ElementIsotopeProfile::from_records("Hg", &records).unwrap();
        assert_eq!(profile.reference_nominal_mass(), 202.0);
        let nominal = profile.to_nominal().unwrap();
        assert_eq!(nominal.reference_nominal_mass(), 202.0);
        assert_eq!(nominal.isotopes()[1].mass_shift, 2.0);
    }
}
