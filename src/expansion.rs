//! Isotope distribution of `n` atoms of a single element.
//!
//! The distribution is the expansion of `(p0 + p1 + ... + pk)^n`, where `pi` is the
//! abundance ratio of isotope `i` to the lightest isotope. Instead of enumerating the
//! multinomial directly, the isotopes are peeled off one level at a time:
//! ```text
//! (p0 + (p1 + ... + pk))^n = sum_j C(n, j) * p0^(n - j) * (p1 + ... + pk)^j
//! ```
//! The `j` atoms carrying a heavier isotope are then split between `p1` and the remaining
//! isotopes the same way, conditioned on `j` instead of `n`. This is equivalent to the
//! full multinomial and allows to stop each level as soon as the lightest reachable mass
//! shift leaves the mass filter.

use tracing::trace;

use crate::{
    distribution::{Distribution, MassFilter},
    element_profile::{ElementIsotopeProfile, RelativeIsotope},
    utils::binomial_coefficient,
};

/// Calculates the isotope distribution of `atoms` atoms of the profiled element.
///
/// The representation (accurate or nominal) is chosen by the distribution type.
/// For nominal distributions pass a profile converted with [`ElementIsotopeProfile::to_nominal`].
///
/// # Arguments
/// * `profile` - Isotope profile of the element
/// * `atoms` - Number of atoms of the element
/// * `filter` - Mass filter, shifts beyond it are not calculated
///
pub fn expand_element<D: Distribution>(
    profile: &ElementIsotopeProfile,
    atoms: u32,
    filter: MassFilter,
) -> D {
    let distribution = expand_levels(profile.isotopes(), atoms, 0.0, filter);
    trace!(
        "Expanded {} x{} over {} isotopes",
        profile.symbol(),
        atoms,
        profile.isotopes().len()
    );
    distribution
}

/// Distribution of `atoms` atoms which each carry one of `isotopes`.
///
/// The first isotope is the base of this level, the others are distributed recursively over
/// the atoms promoted away from the base.
/// `offset` is the mass shift already fixed by the outer levels and only used for pruning.
fn expand_levels<D: Distribution>(
    isotopes: &[RelativeIsotope],
    atoms: u32,
    offset: f64,
    filter: MassFilter,
) -> D {
    let Some((base, heavier)) = isotopes.split_first() else {
        return D::empty(filter);
    };

    let Some(next) = heavier.first() else {
        // Last level, all atoms carry the base isotope
        return D::point(
            base.ratio.powi(atoms as i32),
            f64::from(atoms) * base.mass_shift,
            filter,
        );
    };

    let mut distribution = D::empty(filter);
    for promoted in 0..=atoms {
        let kept = atoms - promoted;
        let kept_shift = f64::from(kept) * base.mass_shift;

        // Shifts grow with every promoted atom, so no later iteration can be within the filter
        if !filter.admits(offset + kept_shift + f64::from(promoted) * next.mass_shift) {
            break;
        }

        let weight = binomial_coefficient(atoms, promoted) * base.ratio.powi(kept as i32);
        let branch: D = expand_levels(heavier, promoted, offset + kept_shift, filter);
        distribution.merge(branch.scale_and_shift(weight, kept_shift));
    }
    distribution
}
