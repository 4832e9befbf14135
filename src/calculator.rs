#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    binning::DenseDistribution,
    configuration::{Configuration, MassMode},
    convolution::convolve_elements,
    distribution::{Distribution, MassFilter, SparseDistribution},
    element_profile::ElementIsotopeProfile,
    error::Error,
    expansion::expand_element,
    formula::{FormulaParser, SumFormulaParser},
    isotope_profile::MoleculeIsotopeProfile,
    reference::IsotopeTable,
    utils::{monoisotopic_mass, nominal_monoisotopic_mass},
};

/// Calculates theoretical isotope profiles of formulas.
///
/// Holds no state besides borrowed configuration and reference data, so a single calculator
/// can be shared between threads.
#[derive(Debug, Clone)]
pub struct IsotopeCalculator<'a, P = SumFormulaParser> {
    config: &'a Configuration,
    table: &'a IsotopeTable,
    parser: P,
}

impl<'a> IsotopeCalculator<'a, SumFormulaParser> {
    /// Creates a new calculator parsing plain sum formulas.
    ///
    /// Arguments:
    /// * `config` - The configuration to use for calculation.
    /// * `table` - Isotope masses and abundances of the elements.
    ///
    pub fn new(config: &'a Configuration, table: &'a IsotopeTable) -> Self {
        Self::with_parser(config, table, SumFormulaParser)
    }
}

impl<'a, P: FormulaParser> IsotopeCalculator<'a, P> {
    /// Creates a new calculator with a custom formula parser.
    ///
    /// Arguments:
    /// * `config` - The configuration to use for calculation.
    /// * `table` - Isotope masses and abundances of the elements.
    /// * `parser` - Splits formulas into elements and atom counts.
    ///
    pub fn with_parser(config: &'a Configuration, table: &'a IsotopeTable, parser: P) -> Self {
        Self {
            config,
            table,
            parser,
        }
    }

    pub fn config(&self) -> &Configuration {
        self.config
    }

    /// Calculates the isotope profile in the configured mass mode.
    pub fn calculate(&self, formula: &str) -> Result<MoleculeIsotopeProfile, Error> {
        match self.config.mode {
            MassMode::Accurate => self.accurate(formula),
            MassMode::Nominal => self.nominal(formula),
        }
    }

    /// Calculates the isotope profile with accurate masses.
    ///
    /// # Arguments
    /// * `formula` - Formula of the molecule, e.g. `C6H12O6`
    ///
    pub fn accurate(&self, formula: &str) -> Result<MoleculeIsotopeProfile, Error> {
        self.isotope_profile::<SparseDistribution>(formula, MassMode::Accurate)
    }

    /// Calculates the isotope profile binned to nominal masses.
    ///
    /// # Arguments
    /// * `formula` - Formula of the molecule, e.g. `C6H12O6`
    ///
    pub fn nominal(&self, formula: &str) -> Result<MoleculeIsotopeProfile, Error> {
        self.isotope_profile::<DenseDistribution>(formula, MassMode::Nominal)
    }

    /// Calculates the isotope profiles of many formulas in the configured mass mode.
    /// Each formula gets its own result, a failing formula does not affect the others.
    pub fn calculate_batch<S: AsRef<str>>(
        &self,
        formulas: &[S],
    ) -> Vec<Result<MoleculeIsotopeProfile, Error>> {
        formulas
            .iter()
            .map(|formula| self.calculate(formula.as_ref()))
            .collect()
    }

    /// Parallel version of [`IsotopeCalculator::calculate_batch`].
    #[cfg(feature = "rayon")]
    pub fn calculate_batch_parallel<S: AsRef<str> + Sync>(
        &self,
        formulas: &[S],
    ) -> Vec<Result<MoleculeIsotopeProfile, Error>>
    where
        P: Sync,
    {
        formulas
            .par_iter()
            .map(|formula| self.calculate(formula.as_ref()))
            .collect()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn isotope_profile<D: Distribution>(
        &self,
        formula: &str,
        mode: MassMode,
    ) -> Result<MoleculeIsotopeProfile, Error> {
        self.try_isotope_profile::<D>(formula, mode)
            .inspect_err(|err| warn!("No isotope profile for {formula}: {err}"))
    }

    fn try_isotope_profile<D: Distribution>(
        &self,
        formula: &str,
        mode: MassMode,
    ) -> Result<MoleculeIsotopeProfile, Error> {
        let composition = self.parser.parse(formula)?;
        let profiles = composition
            .iter()
            .map(|element| ElementIsotopeProfile::from_table(&element.symbol, self.table))
            .collect::<Result<Vec<ElementIsotopeProfile>, Error>>()?;

        let filter = MassFilter::new(self.config.mass_filter);
        let distributions = composition
            .iter()
            .zip(profiles.iter())
            .map(|(element, profile)| match mode {
                MassMode::Accurate => Ok(expand_element(profile, element.count, filter)),
                MassMode::Nominal => {
                    Ok(expand_element(&profile.to_nominal()?, element.count, filter))
                }
            })
            .collect::<Result<Vec<D>, Error>>()?;

        let molecule: D = convolve_elements(distributions, filter);
        let peaks = molecule.into_peaks();
        debug!(
            "{formula}: {} peaks within {} mass units",
            peaks.len(),
            filter.max_shift()
        );

        Ok(MoleculeIsotopeProfile::finalize(
            formula,
            monoisotopic_mass(&composition, &profiles),
            nominal_monoisotopic_mass(&composition, &profiles),
            mode,
            peaks,
            self.config.minimum_abundance,
        ))
    }
}

/// Calculates the isotope profile of a formula with accurate masses.
///
/// # Arguments
/// * `formula` - Formula of the molecule, e.g. `C6H12O6`
/// * `mass_filter` - Number of mass units beyond the monoisotopic peak to calculate
/// * `table` - Isotope masses and abundances of the elements
///
pub fn accurate_isotope_profile(
    formula: &str,
    mass_filter: usize,
    table: &IsotopeTable,
) -> Result<MoleculeIsotopeProfile, Error> {
    let config = Configuration::new(mass_filter, MassMode::Accurate, 0.0);
    IsotopeCalculator::new(&config, table).accurate(formula)
}

/// Calculates the isotope profile of a formula binned to nominal masses.
///
/// # Arguments
/// * `formula` - Formula of the molecule, e.g. `C6H12O6`
/// * `mass_filter` - Number of mass units beyond the monoisotopic peak to calculate
/// * `table` - Isotope masses and abundances of the elements
///
pub fn nominal_isotope_profile(
    formula: &str,
    mass_filter: usize,
    table: &IsotopeTable,
) -> Result<MoleculeIsotopeProfile, Error> {
    let config = Configuration::new(mass_filter, MassMode::Nominal, 0.0);
    IsotopeCalculator::new(&config, table).nominal(formula)
}
