#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of atoms of one element in a molecule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementComposition {
    pub symbol: String,
    pub count: u32,
}

impl ElementComposition {
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }
}

/// Splits a formula string into its elements and atom counts.
///
/// Implementations return every distinct element exactly once, in order of first appearance,
/// with a count of at least one.
pub trait FormulaParser {
    fn parse(&self, formula: &str) -> Result<Vec<ElementComposition>, Error>;
}

/// Parser for plain sum formulas like `C6H12O6` or `CH3Cl`.
///
/// An element symbol is an uppercase letter followed by any number of lowercase letters,
/// optionally followed by an atom count. Repeated elements (`CH3CH2OH`) are summed.
/// Whether the symbol is a real element is left to the isotope table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumFormulaParser;

impl FormulaParser for SumFormulaParser {
    fn parse(&self, formula: &str) -> Result<Vec<ElementComposition>, Error> {
        if formula.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(Error::malformed(formula, "formula starts with a digit"));
        }

        let mut elements: Vec<ElementComposition> = Vec::new();
        let mut chars = formula.chars().peekable();

        while let Some(c) = chars.next() {
            if !c.is_ascii_uppercase() {
                return Err(Error::malformed(formula, format!("unexpected character '{c}'")));
            }

            let mut symbol = c.to_string();
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_lowercase() {
                    break;
                }
                symbol.push(next);
                chars.next();
            }

            let mut digits = String::new();
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits.push(next);
                chars.next();
            }

            let count = if digits.is_empty() {
                1
            } else {
                digits.parse::<u32>().map_err(|_| {
                    Error::malformed(formula, format!("atom count {digits} is too large"))
                })?
            };
            if count == 0 {
                return Err(Error::malformed(formula, format!("zero atom count for {symbol}")));
            }

            match elements.iter_mut().find(|e| e.symbol == symbol) {
                Some(existing) => {
                    existing.count = existing.count.checked_add(count).ok_or_else(|| {
                        Error::malformed(formula, format!("atom count of {symbol} overflows"))
                    })?;
                }
                None => elements.push(ElementComposition::new(symbol, count)),
            }
        }

        if elements.is_empty() {
            return Err(Error::EmptyFormula(formula.to_string()));
        }

        Ok(elements)
    }
}
