//! Search settings, loaded from YAML and overridable from the command line.
//!
//! ```yaml
//! inventory: "330, 390, 560, 1K, 4K7"   # or a list: [330, 390, 560]
//! # series: E12                         # use a standard series instead of an inventory
//! target: 1K5                           # or an expression: "1/(1/1000 + 1/2200)"
//! tolerance_percent: 5
//! max_size: 3
//! mode: both                            # series | parallel | both
//! top: 5
//! format: table                         # table | json
//! ```
//!
//! Every key is optional; missing keys take the values from [`Settings::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::ops::RangeInclusive;
use std::path::Path;

use crate::report::Format;
use crate::{parse_inventory, parse_target, Error, ParseError, RSeries, Topology};

/// Inventory used when none is configured.
pub const DEFAULT_INVENTORY: &str = "330, 390, 325, 15, 18, 560, 670, 390, 150, 39, 100000, 45000, \
     9700, 2700, 1000, 5600, 47000, 10, 22, 46400, 99500, 460, 54000, 960, 22000, 2100, 100, 1500";

pub const TOLERANCE_PERCENT_RANGE: RangeInclusive<f64> = 1.0..=20.0;
pub const MAX_SIZE_RANGE: RangeInclusive<usize> = 1..=5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("unknown resistor series '{0}'")]
    UnknownSeries(String),
}

/// Which topologies to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Series,
    Parallel,
    Both,
}

impl Mode {
    pub fn topologies(self) -> &'static [Topology] {
        match self {
            Mode::Series => &[Topology::Series],
            Mode::Parallel => &[Topology::Parallel],
            Mode::Both => &Topology::ALL,
        }
    }
}

/// Resistor values, either as text to be parsed or as a list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventorySource {
    List(Vec<f64>),
    Text(String),
}

/// A single value, either as a number or as text to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSource {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_inventory")]
    pub inventory: InventorySource,
    /// Name of a standard series; takes precedence over `inventory` when set.
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default = "default_target")]
    pub target: ValueSource,
    #[serde(default = "default_tolerance_percent")]
    pub tolerance_percent: f64,
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Number of matches shown per topology.
    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default)]
    pub format: Format,
}

fn default_inventory() -> InventorySource { InventorySource::Text(DEFAULT_INVENTORY.to_string()) }
fn default_target() -> ValueSource { ValueSource::Number(1500.0) }
fn default_tolerance_percent() -> f64 { 5.0 }
fn default_max_size() -> usize { 3 }
fn default_mode() -> Mode { Mode::Series }
fn default_top() -> usize { 5 }

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory: default_inventory(),
            series: None,
            target: default_target(),
            tolerance_percent: default_tolerance_percent(),
            max_size: default_max_size(),
            mode: default_mode(),
            top: default_top(),
            format: Format::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Checks the bounds the front end places on the search. The library itself accepts any
    /// tolerance in (0, 1] and any positive size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TOLERANCE_PERCENT_RANGE.contains(&self.tolerance_percent) {
            return Err(ConfigError::OutOfRange {
                field: "tolerance_percent",
                value: self.tolerance_percent.to_string(),
                min: TOLERANCE_PERCENT_RANGE.start().to_string(),
                max: TOLERANCE_PERCENT_RANGE.end().to_string(),
            });
        }
        if !MAX_SIZE_RANGE.contains(&self.max_size) {
            return Err(ConfigError::OutOfRange {
                field: "max_size",
                value: self.max_size.to_string(),
                min: MAX_SIZE_RANGE.start().to_string(),
                max: MAX_SIZE_RANGE.end().to_string(),
            });
        }
        if self.top == 0 {
            return Err(ConfigError::OutOfRange {
                field: "top",
                value: "0".to_string(),
                min: "1".to_string(),
                max: usize::MAX.to_string(),
            });
        }
        Ok(())
    }

    /// Resolves the inventory, from the named series if one is set.
    pub fn inventory(&self) -> Result<Vec<f64>, Error> {
        if let Some(name) = &self.series {
            return RSeries::by_name(name)
                .map(RSeries::to_inventory)
                .ok_or_else(|| ConfigError::UnknownSeries(name.clone()).into());
        }
        match &self.inventory {
            InventorySource::List(values) if values.is_empty() => Err(ParseError::Empty.into()),
            InventorySource::List(values) => Ok(values.clone()),
            InventorySource::Text(text) => Ok(parse_inventory(text)?),
        }
    }

    pub fn target(&self) -> Result<f64, ParseError> {
        match &self.target {
            ValueSource::Number(v) => Ok(*v),
            ValueSource::Text(text) => parse_target(text),
        }
    }

    /// Tolerance as a fraction.
    pub fn tolerance(&self) -> f64 {
        self.tolerance_percent / 100.0
    }
}
