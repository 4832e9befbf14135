//! Theoretical isotope patterns of molecules from their elemental formula.
//!
//! ```
//! use isopattern::{nominal_isotope_profile, IsotopeTable};
//!
//! let profile = nominal_isotope_profile("C6H12O6", 3, &IsotopeTable::natural()).unwrap();
//! assert_eq!(profile.len(), 4);
//! assert_eq!(profile.peaks[0].abundance, 100.0);
//! ```

pub mod binning;
/// Orchestration of the isotope pattern calculation
pub mod calculator;
pub mod configuration;
pub mod convolution;
pub mod distribution;
pub mod element_profile;
pub mod error;
/// Isotope distribution of a single element
pub mod expansion;
pub mod formula;
pub mod isotope_profile;
pub mod reference;
// Various utilities
pub mod utils;

pub use calculator::{accurate_isotope_profile, nominal_isotope_profile, IsotopeCalculator};
pub use configuration::{Configuration, MassMode};
pub use distribution::IsotopicPeak;
pub use error::Error;
pub use isotope_profile::MoleculeIsotopeProfile;
pub use reference::{IsotopeTable, IsotopologueRecord};
