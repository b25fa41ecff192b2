//! A resistor combination finder for circuit design.
//!
//! Given the resistor values actually on hand, it finds the ways of wiring a few of them in
//! series or in parallel that land close to a target resistance, and presents them in order of
//! increasing inaccuracy.
//!
//! Each inventory slot may be used more than once in a combination, and combinations of every
//! size from a single resistor up to the configured maximum are considered.
//!
//! # Example
//! Which of 330R, 560R, 1K and 100R get closest to 1K, using at most two parts?
//! ```rust
//! use resistor_combo::{search, Topology};
//!
//! let res = search(&[330.0, 560.0, 1000.0, 100.0], 1000.0, 0.05, 2, Topology::Series)
//!     .expect("valid parameters");
//!
//! let best = res.iter().next().unwrap();
//! assert_eq!(best.values(), &[1000.0]);
//! assert_eq!(best.error_percent(), 0.0);
//!
//! for m in res.top(3) {
//!     println!("{} = {:.1} ({:.1}%)", m, m.equivalent(), m.error_percent());
//! }
//! ```
//! Running this example prints:
//! ```text
//! 1K = 1000.0 (0.0%)
//! ```
//! Widening the tolerance to `0.15` adds `1K + 100R` (10%), `330R + 560R` (11%) and
//! `560R + 560R` (12%).

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use std::fmt;

pub mod config;
mod error;
mod parse;
pub mod report;
mod series;

pub use error::{Error, ParseError, SearchError};
pub use parse::{format_value, parse_inventory, parse_target, parse_value};
pub use series::{RSeries, E12, E192, E24, E3, E48, E6, E96};

/// How the resistors of a combination are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Series,
    Parallel,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Series, Topology::Parallel];

    /// The resistance presented by `values` wired in this topology.
    ///
    /// For parallel every value must be non-zero; [`search`] checks this before calling it.
    pub fn equivalent(self, values: &[f64]) -> f64 {
        match self {
            Topology::Series => values.iter().sum(),
            Topology::Parallel => 1.0 / values.iter().map(|r| 1.0 / r).sum::<f64>(),
        }
    }

    /// Separator used when printing the members of a combination.
    pub fn separator(self) -> &'static str {
        match self {
            Topology::Series => " + ",
            Topology::Parallel => " || ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Topology::Series => "series",
            Topology::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selection of inventory slots, in non-decreasing index order. A slot may repeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct RCombo {
    indices: Box<[usize]>,
    values: Box<[f64]>,
}

impl RCombo {
    /// Renders the members joined by `sep`, e.g. `"330R + 1K"`.
    fn join(&self, sep: &str) -> String {
        self.values.iter().map(|r| format_value(*r)).join(sep)
    }
}

/// One combination that fell within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RMatch {
    #[serde(flatten)]
    combo: RCombo,
    #[serde(skip)]
    separator: &'static str,
    equivalent: f64,
    error_percent: f64,
}

impl RMatch {
    pub fn values(&self) -> &[f64] {
        &self.combo.values
    }

    /// Indices into the inventory the combination was drawn from.
    pub fn indices(&self) -> &[usize] {
        &self.combo.indices
    }

    /// Equivalent resistance of the combination in ohms.
    pub fn equivalent(&self) -> f64 {
        self.equivalent
    }

    /// `|equivalent - target| / |target| * 100`
    pub fn error_percent(&self) -> f64 {
        self.error_percent
    }
}

impl fmt::Display for RMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.combo.join(self.separator))
    }
}

/// Stores the result of a search, best match first.
#[derive(Debug, Clone, PartialEq)]
pub struct RRes {
    topology: Topology,
    target: f64,
    tolerance: f64,
    res: Vec<RMatch>,
}

impl RRes {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Tolerance the search was run with, as a fraction.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Provides an iterator over all matches from lowest to highest error. Matches with the same
    /// error are kept in the order they were enumerated in.
    pub fn iter(&self) -> impl Iterator<Item = &RMatch> {
        self.res.iter()
    }

    /// The `n` most accurate matches.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &RMatch> {
        self.res.iter().take(n)
    }

    /// All matches that share the lowest error.
    pub fn best(&self) -> impl Iterator<Item = &RMatch> {
        let best_err = self.res.first().map_or(0.0, |m| m.error_percent);
        self.res
            .iter()
            .take_while(move |m| m.error_percent - best_err <= 1e-9)
    }

    pub fn len(&self) -> usize {
        self.res.len()
    }

    pub fn is_empty(&self) -> bool {
        self.res.is_empty()
    }
}

/// Main search struct, holding the inventory and the largest combination to consider.
#[derive(Debug, Clone)]
pub struct RSearch<'a> {
    inventory: &'a [f64],
    max_size: usize,
}

impl<'a> RSearch<'a> {
    pub fn new(inventory: &'a [f64], max_size: usize) -> Self {
        RSearch {
            inventory,
            max_size,
        }
    }

    /// Returns the number of combinations that will be evaluated, which maps fairly directly to
    /// the time a search takes. With `n` slots and at most `k` parts this is the sum of
    /// `C(n + i - 1, i)` for `i` in `1..=k`, which equals `C(n + k, k) - 1`. Saturates at
    /// `u128::MAX`.
    pub fn combinations(&self) -> u128 {
        let n = self.inventory.len() as u128;
        let k = self.max_size as u128;
        if n == 0 || k == 0 {
            return 0;
        }
        // C(n + k, m) with m = min(n, k); every partial product is itself a binomial.
        let m = n.min(k);
        let mut c: u128 = 1;
        for j in 1..=m {
            c = match c.checked_mul(n + k - m + j) {
                Some(v) => v / j,
                None => return u128::MAX,
            };
        }
        c - 1
    }

    fn check(&self, target: f64, tolerance: f64) -> Result<(), SearchError> {
        if self.inventory.is_empty() {
            return Err(SearchError::EmptyInventory);
        }
        if self.max_size == 0 {
            return Err(SearchError::ZeroMaxSize);
        }
        if !target.is_finite() || target == 0.0 {
            return Err(SearchError::InvalidTarget(target));
        }
        if !(tolerance > 0.0 && tolerance <= 1.0) {
            return Err(SearchError::InvalidTolerance(tolerance));
        }
        match self.inventory.iter().position(|r| !r.is_finite()) {
            Some(index) => Err(SearchError::NonFiniteValue {
                index,
                value: self.inventory[index],
            }),
            None => Ok(()),
        }
    }

    /// Runs the search for one of the standard topologies.
    pub fn run(&self, target: f64, tolerance: f64, topology: Topology) -> Result<RRes, SearchError> {
        if topology == Topology::Parallel {
            if let Some(index) = self.inventory.iter().position(|r| *r == 0.0) {
                return Err(SearchError::ZeroInParallel { index });
            }
        }
        let res = self.collect(target, tolerance, topology.separator(), |v| {
            topology.equivalent(v)
        })?;
        Ok(RRes {
            topology,
            target,
            tolerance,
            res,
        })
    }

    /// Given a function `f` mapping the values of a combination to its equivalent resistance,
    /// evaluates every combination and returns those within `tolerance` (a fraction) of `target`,
    /// lowest error first. Combinations for which `f` is not finite are never matches.
    pub fn calc(
        &self,
        target: f64,
        tolerance: f64,
        f: impl Fn(&[f64]) -> f64,
    ) -> Result<Vec<RMatch>, SearchError> {
        self.collect(target, tolerance, ", ", f)
    }

    fn collect(
        &self,
        target: f64,
        tolerance: f64,
        separator: &'static str,
        f: impl Fn(&[f64]) -> f64,
    ) -> Result<Vec<RMatch>, SearchError> {
        self.check(target, tolerance)?;
        debug!(
            slots = self.inventory.len(),
            max_size = self.max_size,
            combinations = %self.combinations(),
            target_ohms = target,
            tolerance,
            "starting combination search"
        );

        let mut res = Vec::new();
        let mut visit = |indices: &[usize], values: &[f64]| {
            let equivalent = f(values);
            let err = (equivalent - target).abs() / target.abs();
            if err <= tolerance {
                res.push(RMatch {
                    combo: RCombo {
                        indices: indices.into(),
                        values: values.into(),
                    },
                    separator,
                    equivalent,
                    error_percent: err * 100.0,
                });
            }
        };
        walk(self.inventory, self.max_size, &mut visit);

        res.sort_by(|a, b| a.error_percent.total_cmp(&b.error_percent));
        debug!(matches = res.len(), "combination search finished");
        Ok(res)
    }
}

/// Visits every non-empty multiset of slots of at most `max_size` elements in lexicographic
/// order of indices. A pick is only extended with slots at or after its last index, so each
/// multiset is seen once.
///
/// Depth-first over an explicit stack: `next[d]` is the next slot to try at depth `d`, so the
/// call stack stays flat however large `max_size` is.
fn walk(inventory: &[f64], max_size: usize, visit: &mut impl FnMut(&[usize], &[f64])) {
    let mut picked: Vec<usize> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut next: Vec<usize> = vec![0];

    loop {
        let depth = picked.len();
        let slot = next[depth];
        if depth < max_size && slot < inventory.len() {
            next[depth] = slot + 1;
            picked.push(slot);
            values.push(inventory[slot]);
            visit(&picked, &values);
            next.push(slot);
        } else if depth == 0 {
            break;
        } else {
            picked.pop();
            values.pop();
            next.pop();
        }
    }
}

/// Finds every combination of up to `max_size` inventory values that, wired as `topology`, lies
/// within `tolerance` (a fraction, e.g. `0.05`) of `target`. Results are sorted by error.
///
/// # Errors
///
/// Returns a [`SearchError`] if the inventory is empty or holds a non-finite value, the target is
/// zero, the tolerance is outside `(0, 1]`, `max_size` is zero, or a parallel search is asked to
/// use a zero-valued resistor.
///
/// The cost grows as [`RSearch::combinations`]; a large `max_size` is safe but slow.
pub fn search(
    inventory: &[f64],
    target: f64,
    tolerance: f64,
    max_size: usize,
    topology: Topology,
) -> Result<RRes, SearchError> {
    RSearch::new(inventory, max_size).run(target, tolerance, topology)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas() {
        assert_eq!(Topology::Series.equivalent(&[100.0, 220.0]), 320.0);
        assert_eq!(Topology::Parallel.equivalent(&[1000.0, 1000.0]), 500.0);
        assert_eq!(Topology::Parallel.equivalent(&[470.0]), 470.0);
    }

    #[test]
    fn walk_visits_multisets_in_lexicographic_order() {
        let mut seen = Vec::new();
        walk(&[1.0, 2.0, 3.0], 2, &mut |idx: &[usize], _: &[f64]| {
            seen.push(idx.to_vec())
        });
        let expected: Vec<Vec<usize>> = vec![
            vec![0],
            vec![0, 0],
            vec![0, 1],
            vec![0, 2],
            vec![1],
            vec![1, 1],
            vec![1, 2],
            vec![2],
            vec![2, 2],
        ];
        assert_eq!(seen, expected);
    }

    #[test]
    fn combination_count_matches_walk() {
        for (n, k) in [(1, 1), (3, 2), (4, 3), (6, 5)] {
            let inv = vec![1.0; n];
            let mut count = 0u128;
            walk(&inv, k, &mut |_: &[usize], _: &[f64]| count += 1);
            assert_eq!(RSearch::new(&inv, k).combinations(), count, "n={n} k={k}");
        }
        assert_eq!(RSearch::new(&[], 3).combinations(), 0);
    }

    #[test]
    fn combination_count_saturates_without_looping() {
        // One slot: exactly one multiset per size.
        assert_eq!(RSearch::new(&[1.0], usize::MAX).combinations(), usize::MAX as u128);
        assert_eq!(RSearch::new(&[1.0; 200], usize::MAX).combinations(), u128::MAX);
        // C(30 + 5, 5) - 1
        assert_eq!(RSearch::new(&[1.0; 30], 5).combinations(), 324_631);
    }

    #[test]
    fn deep_search_keeps_the_call_stack_flat() {
        // Enough parts that one stack frame per part would overflow this thread.
        let handle = std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(|| search(&[1.0], 2.0, 0.5, 5_000, Topology::Series).map(|res| res.len()))
            .unwrap();
        // 1.0 (50%), 1.0 + 1.0 (0%) and 1.0 * 3 (50%) are the only matches.
        assert_eq!(handle.join().unwrap(), Ok(3));
    }

    #[test]
    fn custom_formula() {
        // Voltage divider ratio R2 / (R1 + R2) using two picks.
        let inv = [1000.0, 2000.0, 3000.0];
        let res = RSearch::new(&inv, 2)
            .calc(0.5, 0.01, |v| match v {
                [r1, r2] => r2 / (r1 + r2),
                _ => f64::NAN,
            })
            .unwrap();
        assert_eq!(res.len(), 3);
        assert!(res.iter().all(|m| m.values()[0] == m.values()[1]));
        assert_eq!(res[0].to_string(), "1K, 1K");
    }

    #[test]
    fn best_takes_all_ties() {
        let res = search(&[1000.0, 1000.0], 500.0, 0.01, 2, Topology::Parallel).unwrap();
        assert_eq!(res.best().count(), 3);
        assert_eq!(res.iter().next().unwrap().to_string(), "1K || 1K");
    }
}
