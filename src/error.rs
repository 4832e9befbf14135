use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Malformed formula '{formula}': {reason}")]
    MalformedFormula { formula: String, reason: String },
    #[error("Formula '{0}' contains no elements")]
    EmptyFormula(String),
    #[error("No naturally occurring isotopes listed for {0}")]
    EmptyIsotopeRecords(String),
    #[error("Isotopes of {symbol} are not ordered by strictly increasing mass (record {index})")]
    UnorderedIsotopes { symbol: String, index: usize },
    #[error("Invalid abundance {abundance} for isotope record {index} of {symbol}")]
    InvalidAbundance {
        symbol: String,
        index: usize,
        abundance: f64,
    },
}

impl Error {
    /// Creates a [`Error::MalformedFormula`] for the given formula.
    pub(crate) fn malformed(formula: &str, reason: impl Into<String>) -> Self {
        Error::MalformedFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}
