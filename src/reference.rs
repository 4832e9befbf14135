use std::collections::HashMap;

use rustyms::{Element, ELEMENT_PARSE_LIST};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::Error, utils::nominal_mass};

/// One naturally occurring isotope of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsotopologueRecord {
    /// Accurate mass in Dalton
    pub mass: f64,
    /// Natural relative abundance
    pub abundance: f64,
    /// Number of nucleons, if known
    pub mass_number: Option<u16>,
}

impl IsotopologueRecord {
    pub const fn new(mass: f64, abundance: f64) -> Self {
        Self {
            mass,
            abundance,
            mass_number: None,
        }
    }

    /// Creates a record for an isotope with a known mass number.
    ///
    /// # Arguments
    /// * `mass_number` - Number of nucleons
    /// * `mass` - Accurate mass in Dalton
    /// * `abundance` - Natural relative abundance
    ///
    pub const fn with_mass_number(mass_number: u16, mass: f64, abundance: f64) -> Self {
        Self {
            mass,
            abundance,
            mass_number: Some(mass_number),
        }
    }

    /// Nominal mass of the isotope, its mass number or the rounded accurate mass if unknown.
    pub fn nominal_mass(&self) -> f64 {
        self.mass_number.map_or_else(|| nominal_mass(self.mass), f64::from)
    }
}

/// Isotope reference table, mapping element symbols to their isotopes ordered by ascending mass.
///
/// The table is read only during calculations and can be shared between threads.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsotopeTable {
    elements: HashMap<String, Vec<IsotopologueRecord>>,
}

impl IsotopeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the natural isotope abundances of every element with stable isotopes.
    pub fn natural() -> Self {
        Self::from_records(ELEMENT_PARSE_LIST.iter().filter_map(|(symbol, element)| {
            natural_isotopes(*element).map(|records| (symbol.to_string(), records))
        }))
    }

    /// Creates a table from (symbol, records) pairs. Later entries replace earlier ones.
    ///
    /// # Arguments
    /// * `records` - Element symbols with their isotopes, ordered by ascending mass
    ///
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<IsotopologueRecord>)>,
    {
        Self {
            elements: records.into_iter().collect(),
        }
    }

    /// Adds or replaces an element, returning the replaced records.
    pub fn insert(
        &mut self,
        symbol: impl Into<String>,
        records: Vec<IsotopologueRecord>,
    ) -> Option<Vec<IsotopologueRecord>> {
        self.elements.insert(symbol.into(), records)
    }

    /// Isotopes of an element, failing with [`Error::UnknownElement`] for symbols not in the table.
    pub fn get(&self, symbol: &str) -> Result<&[IsotopologueRecord], Error> {
        self.elements
            .get(symbol)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownElement(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Naturally occurring isotopes of an element ordered by mass, `None` if there are none.
fn natural_isotopes(element: Element) -> Option<Vec<IsotopologueRecord>> {
    if matches!(element, Element::Electron) {
        return None;
    }
    let mut records = element
        .isotopes()
        .iter()
        .filter(|(_, _, abundance)| *abundance > 0.0)
        .map(|(mass_number, mass, abundance)| {
            IsotopologueRecord::with_mass_number(*mass_number, mass.value, *abundance)
        })
        .collect::<Vec<IsotopologueRecord>>();
    records.sort_by(|a, b| a.mass.total_cmp(&b.mass));
    (!records.is_empty()).then_some(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMON_ELEMENTS: [&str; 12] = [
        "H", "C", "N", "O", "F", "Na", "P", "S", "Cl", "Br", "Sn", "I",
    ];

    #[test]
    fn test_natural_table_is_ordered_and_normalized() {
        let table = IsotopeTable::natural();
        for symbol in COMMON_ELEMENTS {
            let records = table.get(symbol).unwrap();
            assert!(!records.is_empty());
            assert!(
                records.windows(2).all(|w| w[0].mass < w[1].mass),
                "{symbol} is not ordered by mass"
            );
            assert!(records.iter().all(|r| r.abundance > 0.0));
            let total: f64 = records.iter().map(|r| r.abundance).sum();
            assert!((total - 1.0).abs() < 1e-3, "{symbol} sums to {total}");
        }
    }

    #[test]
    fn test_natural_table_covers_heavy_elements() {
        let table = IsotopeTable::natural();
        for symbol in ["Ag", "Pt", "Hg", "Pb"] {
            assert!(table.contains(symbol), "{symbol} is missing");
        }
        // Seven stable mercury isotopes, 196Hg is the lightest
        let mercury = table.get("Hg").unwrap();
        assert_eq!(mercury.len(), 7);
        assert_eq!(mercury[0].mass_number, Some(196));
        assert!((mercury[0].mass - 195.965833).abs() < 1e-5);
    }

    #[test]
    fn test_natural_table_mass_numbers() {
        let table = IsotopeTable::natural();
        let carbon = table.get("C").unwrap();
        assert_eq!(carbon[0].mass, 12.0);
        assert_eq!(carbon[0].mass_number, Some(12));
        assert_eq!(carbon[1].mass_number, Some(13));
        assert_eq!(table.get("Sn").unwrap()[0].nominal_mass(), 112.0);
    }

    #[test]
    fn test_natural_table_skips_elements_without_stable_isotopes() {
        let table = IsotopeTable::natural();
        assert!(!table.contains("Tc"));
        assert!(!table.contains("Pm"));
    }

    #[test]
    fn test_nominal_mass_without_mass_number() {
        let chlorine = IsotopologueRecord::new(34.968852682, 0.7576);
        assert_eq!(chlorine.nominal_mass(), 35.0);
        assert_eq!(
            IsotopologueRecord::with_mass_number(35, 34.968852682, 0.7576).nominal_mass(),
            35.0
        );
    }

    #[test]
    fn test_tin_has_ten_isotopes() {
        assert_eq!(IsotopeTable::natural().get("Sn").unwrap().len(), 10);
    }

    #[test]
    fn test_unknown_element() {
        let table = IsotopeTable::natural();
        assert_eq!(
            table.get("Xx"),
            Err(Error::UnknownElement("Xx".to_string()))
        );
        assert!(!table.contains("Xx"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = IsotopeTable::new();
        assert!(table.is_empty());
        assert!(table
            .insert("X", vec![IsotopologueRecord::new(10.0, 1.0)])
            .is_none());
        let replaced = table.insert("X", vec![IsotopologueRecord::new(11.0, 1.0)]);
        assert_eq!(replaced, Some(vec![IsotopologueRecord::new(10.0, 1.0)]));
        assert_eq!(table.get("X").unwrap()[0].mass, 11.0);
    }
}
