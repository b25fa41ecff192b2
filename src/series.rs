//! Standard E-series resistor tables, usable as a ready-made inventory.

use itertools::Itertools;
use lazy_static::lazy_static;

const POWERS: &[f64] = &[1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6];

lazy_static! {
    /// RSeries constant for the E3 standard series
    pub static ref E3: RSeries = RSeries::new("E3", &[1.0, 2.2, 4.7]);
    /// RSeries constant for the E6 standard series
    pub static ref E6: RSeries = RSeries::extend("E6", &E3, &[1.5, 3.3, 6.8]);
    /// RSeries constant for the E12 standard series
    pub static ref E12: RSeries = RSeries::extend("E12", &E6, &[1.2, 1.8, 2.7, 3.9, 5.6, 8.2]);
    /// RSeries constant for the E24 standard series
    pub static ref E24: RSeries = RSeries::extend(
        "E24",
        &E12,
        &[1.1, 1.3, 1.6, 2.0, 2.4, 3.0, 3.6, 4.3, 5.1, 6.2, 7.5, 9.1],
    );
    /// RSeries constant for the E48 standard series
    pub static ref E48: RSeries = RSeries::new("E48", &[
        1.00, 1.05, 1.10, 1.15, 1.21, 1.27, 1.33, 1.40, 1.47, 1.54, 1.62, 1.69, 1.78, 1.87, 1.96, 2.05,
        2.15, 2.26, 2.37, 2.49, 2.61, 2.74, 2.87, 3.01, 3.16, 3.32, 3.48, 3.65, 3.83, 4.02, 4.22, 4.42,
        4.64, 4.87, 5.11, 5.36, 5.62, 5.90, 6.19, 6.49, 6.81, 7.15, 7.50, 7.87, 8.25, 8.66, 9.09, 9.53,
    ]);
    /// RSeries constant for the E96 standard series
    pub static ref E96: RSeries = RSeries::new("E96", &[
        1.00, 1.02, 1.05, 1.07, 1.10, 1.13, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30, 1.33, 1.37, 1.40, 1.43,
        1.47, 1.50, 1.54, 1.58, 1.62, 1.65, 1.69, 1.74, 1.78, 1.82, 1.87, 1.91, 1.96, 2.00, 2.05, 2.10,
        2.15, 2.21, 2.26, 2.32, 2.37, 2.43, 2.49, 2.55, 2.61, 2.67, 2.74, 2.80, 2.87, 2.94, 3.01, 3.09,
        3.16, 3.24, 3.32, 3.40, 3.48, 3.57, 3.65, 3.74, 3.83, 3.92, 4.02, 4.12, 4.22, 4.32, 4.42, 4.53,
        4.64, 4.75, 4.87, 4.99, 5.11, 5.23, 5.36, 5.49, 5.62, 5.76, 5.90, 6.04, 6.19, 6.34, 6.49, 6.65,
        6.81, 6.98, 7.15, 7.32, 7.50, 7.68, 7.87, 8.06, 8.25, 8.45, 8.66, 8.87, 9.09, 9.31, 9.53, 9.76,
    ]);
    /// RSeries constant for the E192 standard series
    pub static ref E192: RSeries = RSeries::new("E192", &[
        1.00, 1.01, 1.02, 1.04, 1.05, 1.06, 1.07, 1.09, 1.10, 1.11, 1.13, 1.14, 1.15, 1.17, 1.18, 1.20,
        1.21, 1.23, 1.24, 1.26, 1.27, 1.29, 1.30, 1.32, 1.33, 1.35, 1.37, 1.38, 1.40, 1.42, 1.43, 1.45,
        1.47, 1.49, 1.50, 1.52, 1.54, 1.56, 1.58, 1.60, 1.62, 1.64, 1.65, 1.67, 1.69, 1.72, 1.74, 1.76,
        1.78, 1.80, 1.82, 1.84, 1.87, 1.89, 1.91, 1.93, 1.96, 1.98, 2.00, 2.03, 2.05, 2.08, 2.10, 2.13,
        2.15, 2.18, 2.21, 2.23, 2.26, 2.29, 2.32, 2.34, 2.37, 2.40, 2.43, 2.46, 2.49, 2.52, 2.55, 2.58,
        2.61, 2.64, 2.67, 2.71, 2.74, 2.77, 2.80, 2.84, 2.87, 2.91, 2.94, 2.98, 3.01, 3.05, 3.09, 3.12,
        3.16, 3.20, 3.24, 3.28, 3.32, 3.36, 3.40, 3.44, 3.48, 3.52, 3.57, 3.61, 3.65, 3.70, 3.74, 3.79,
        3.83, 3.88, 3.92, 3.97, 4.02, 4.07, 4.12, 4.17, 4.22, 4.27, 4.32, 4.37, 4.42, 4.48, 4.53, 4.59,
        4.64, 4.70, 4.75, 4.81, 4.87, 4.93, 4.99, 5.05, 5.11, 5.17, 5.23, 5.30, 5.36, 5.42, 5.49, 5.56,
        5.62, 5.69, 5.76, 5.83, 5.90, 5.97, 6.04, 6.12, 6.19, 6.26, 6.34, 6.42, 6.49, 6.57, 6.65, 6.73,
        6.81, 6.90, 6.98, 7.06, 7.15, 7.23, 7.32, 7.41, 7.50, 7.59, 7.68, 7.77, 7.87, 7.96, 8.06, 8.16,
        8.25, 8.35, 8.45, 8.56, 8.66, 8.76, 8.87, 8.98, 9.09, 9.20, 9.31, 9.42, 9.53, 9.65, 9.76, 9.88,
    ]);

    static ref ALL: [&'static RSeries; 7] = [&*E3, &*E6, &*E12, &*E24, &*E48, &*E96, &*E192];
}

/// A series of resistor values. Constants are provided for the standard E-series.
#[derive(Debug)]
pub struct RSeries {
    name: &'static str,
    values: Box<[f64]>,
}

impl RSeries {
    /// Defines a new series of resistor values. Only the decade needs to be provided, multiples
    /// upto Val * 1M will be generated automatically.
    /// # Example
    /// ```
    ///     # use resistor_combo::RSeries;
    ///     let piher = RSeries::new("piher", &[1.0, 2.0, 2.2, 2.5, 4.7, 5.0]);
    ///     assert_eq!(piher.len(), 42);
    /// ```
    pub fn new(name: &'static str, decade: &[f64]) -> Self {
        RSeries {
            name,
            values: decade
                .iter()
                .cartesian_product(POWERS.iter())
                .map(|(val, pow)| val * pow)
                .sorted_by(f64::total_cmp)
                .collect(),
        }
    }

    fn extend(name: &'static str, base: &RSeries, add: &[f64]) -> Self {
        RSeries {
            name,
            values: base
                .values
                .iter()
                .cloned()
                .chain(
                    add.iter()
                        .cartesian_product(POWERS.iter())
                        .map(|(val, pow)| val * pow),
                )
                .sorted_by(f64::total_cmp)
                .dedup()
                .collect(),
        }
    }

    /// Looks up one of the standard series by name, ignoring case (`"e12"`, `"E96"`).
    pub fn by_name(name: &str) -> Option<&'static RSeries> {
        ALL.iter()
            .copied()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Names of all the standard series, smallest first.
    pub fn names() -> impl Iterator<Item = &'static str> {
        ALL.iter().map(|s| s.name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The values of this series in ascending order, from 1 Ω up to the 1 MΩ decade.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Copies the values out as an inventory for a search.
    pub fn to_inventory(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_sizes() {
        assert_eq!(E3.len(), 3 * POWERS.len());
        assert_eq!(E6.len(), 6 * POWERS.len());
        assert_eq!(E12.len(), 12 * POWERS.len());
        assert_eq!(E24.len(), 24 * POWERS.len());
        assert_eq!(E192.len(), 192 * POWERS.len());
    }

    #[test]
    fn extended_series_is_sorted_and_contains_base() {
        let vals = E12.values();
        assert!(vals.windows(2).all(|w| w[0] < w[1]));
        for v in E6.values() {
            assert!(vals.contains(v));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(RSeries::by_name("e24").map(RSeries::name), Some("E24"));
        assert_eq!(RSeries::by_name(" E96 ").map(RSeries::name), Some("E96"));
        assert!(RSeries::by_name("E7").is_none());
        assert_eq!(RSeries::names().count(), 7);
    }
}
