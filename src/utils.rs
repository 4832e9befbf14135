use crate::{element_profile::ElementIsotopeProfile, formula::ElementComposition};

/// Binomial coefficient C(n, k) as float.
///
/// Calculated multiplicatively so intermediate values stay small for the atom counts
/// found in real molecules. Returns 0 if `k > n`.
///
/// # Arguments
/// * `n` - Number of atoms to choose from
/// * `k` - Number of atoms chosen
///
pub fn binomial_coefficient(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * f64::from(n - i) / f64::from(i + 1))
}

/// Monoisotopic mass of a molecule, the sum of every atom's reference (lightest) isotope mass.
///
/// # Arguments
/// * `composition` - Element counts of the molecule
/// * `profiles` - The isotope profiles of the elements, in the same order as `composition`
///
pub fn monoisotopic_mass(
    composition: &[ElementComposition],
    profiles: &[ElementIsotopeProfile],
) -> f64 {
    composition
        .iter()
        .zip(profiles.iter())
        .map(|(element, profile)| f64::from(element.count) * profile.reference_mass())
        .sum()
}

/// Nominal monoisotopic mass of a molecule, the sum of every atom's reference isotope mass number.
///
/// Differs from rounding the accurate monoisotopic mass for molecules with a large mass defect.
///
/// # Arguments
/// * `composition` - Element counts of the molecule
/// * `profiles` - The isotope profiles of the elements, in the same order as `composition`
///
pub fn nominal_monoisotopic_mass(
    composition: &[ElementComposition],
    profiles: &[ElementIsotopeProfile],
) -> f64 {
    composition
        .iter()
        .zip(profiles.iter())
        .map(|(element, profile)| f64::from(element.count) * profile.reference_nominal_mass())
        .sum()
}

/// Rounds an accurate mass to its nominal (integer) mass.
pub fn nominal_mass(mass: f64) -> f64 {
    mass.round()
}
