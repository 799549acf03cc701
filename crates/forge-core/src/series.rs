//! Series and data point types

use crate::Label;
use serde::{Deserialize, Serialize};

/// One labeled value of a series.
///
/// `baseline` is the lower extent (d0) when the series is stacked; the upper
/// extent (d1) is `baseline + value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(alias = "name")]
    pub label: Label,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, alias = "d0", skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
}

impl DataPoint {
    pub fn new(label: impl Into<Label>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            baseline: None,
        }
    }

    /// Point with no value ("no point" rather than zero)
    pub fn missing(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            value: None,
            baseline: None,
        }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Lower extent, 0 when not stacked
    pub fn lower(&self) -> f64 {
        self.baseline.unwrap_or(0.0)
    }

    /// Stacked upper extent (d1)
    pub fn upper(&self) -> Option<f64> {
        self.value.map(|v| self.lower() + v)
    }
}

/// Named, ordered sequence of data points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: Label,
    #[serde(alias = "series")]
    pub values: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<Label>, values: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of points that carry a value
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.has_value()).count()
    }

    /// Largest defined value, if any
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// How a series is laid out relative to its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Standard,
    Stacked,
    Normalized,
}

impl SeriesType {
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }
}
