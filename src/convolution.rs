use crate::distribution::{Distribution, MassFilter};

/// Combines the distributions of all elements of a molecule into the distribution of the molecule.
///
/// The distributions are folded from left to right. A single distribution is returned unchanged,
/// no distributions at all result in the unit distribution.
///
/// # Arguments
/// * `distributions` - One distribution per element
/// * `filter` - Mass filter, used for the unit distribution if `distributions` is empty
///
pub fn convolve_elements<D, I>(distributions: I, filter: MassFilter) -> D
where
    D: Distribution,
    I: IntoIterator<Item = D>,
{
    let mut distributions = distributions.into_iter();
    match distributions.next() {
        Some(first) => distributions.fold(first, |molecule, element| molecule.convolve(&element)),
        None => D::unit(filter),
    }
}
