//! Quality report produced by the stats engine
//!
//! A report carries three element counts and five statistics over the valid
//! (finite) subset of the buffer. All statistics are population statistics.
//!
//! # No valid data
//!
//! When `valid_count == 0` there is nothing to summarize, so every float
//! field (`mean`, `variance`, `l2_norm`, `min_val`, `max_val`) is NaN. Use
//! [`StatsReport::has_valid_data`] before reading them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive statistics for one buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct StatsReport {
    /// Number of NaN elements
    pub nan_count: u64,
    /// Number of +Infinity or -Infinity elements
    pub inf_count: u64,
    /// Number of finite elements
    pub valid_count: u64,
    /// Arithmetic mean of the valid elements
    pub mean: f64,
    /// Population variance (divisor `valid_count`) of the valid elements
    pub variance: f64,
    /// Euclidean norm of the valid elements
    pub l2_norm: f64,
    /// Smallest valid element
    pub min_val: f64,
    /// Largest valid element
    pub max_val: f64,
}

/// A single named value of a report, as handed to a host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Count(u64),
    Float(f64),
}

impl FieldValue {
    /// Numeric value as f64
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::Count(n) => n as f64,
            FieldValue::Float(x) => x,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl StatsReport {
    /// Field names in marshalling order
    pub const FIELD_NAMES: [&'static str; 8] = [
        "nan_count",
        "inf_count",
        "valid_count",
        "mean",
        "variance",
        "l2_norm",
        "min_val",
        "max_val",
    ];

    /// Report for a buffer without any valid element
    pub fn empty(nan_count: u64, inf_count: u64) -> Self {
        Self {
            nan_count,
            inf_count,
            valid_count: 0,
            mean: f64::NAN,
            variance: f64::NAN,
            l2_norm: f64::NAN,
            min_val: f64::NAN,
            max_val: f64::NAN,
        }
    }

    /// Total number of elements inspected
    pub fn len(&self) -> u64 {
        self.nan_count + self.inf_count + self.valid_count
    }

    /// Whether the inspected buffer was empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of NaN or infinite elements
    pub fn invalid_count(&self) -> u64 {
        self.nan_count + self.inf_count
    }

    /// Whether any element was NaN or infinite
    pub fn has_failure(&self) -> bool {
        self.invalid_count() > 0
    }

    /// Whether the float fields describe real data (not the NaN sentinel)
    pub fn has_valid_data(&self) -> bool {
        self.valid_count > 0
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max_val - self.min_val
    }

    /// Look up a field by its marshalled name
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "nan_count" => FieldValue::Count(self.nan_count),
            "inf_count" => FieldValue::Count(self.inf_count),
            "valid_count" => FieldValue::Count(self.valid_count),
            "mean" => FieldValue::Float(self.mean),
            "variance" => FieldValue::Float(self.variance),
            "l2_norm" => FieldValue::Float(self.l2_norm),
            "min_val" => FieldValue::Float(self.min_val),
            "max_val" => FieldValue::Float(self.max_val),
            _ => return None,
        };
        Some(value)
    }

    /// All fields as `(name, value)` pairs, in [`Self::FIELD_NAMES`] order
    pub fn fields(&self) -> [(&'static str, FieldValue); 8] {
        [
            ("nan_count", FieldValue::Count(self.nan_count)),
            ("inf_count", FieldValue::Count(self.inf_count)),
            ("valid_count", FieldValue::Count(self.valid_count)),
            ("mean", FieldValue::Float(self.mean)),
            ("variance", FieldValue::Float(self.variance)),
            ("l2_norm", FieldValue::Float(self.l2_norm)),
            ("min_val", FieldValue::Float(self.min_val)),
            ("max_val", FieldValue::Float(self.max_val)),
        ]
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} nan={} inf={} mean={:.4e} var={:.4e} l2={:.4e} min={:.4e} max={:.4e}",
            self.len(),
            self.nan_count,
            self.inf_count,
            self.mean,
            self.variance,
            self.l2_norm,
            self.min_val,
            self.max_val
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsReport {
        StatsReport {
            nan_count: 1,
            inf_count: 2,
            valid_count: 3,
            mean: 2.0,
            variance: 2.0 / 3.0,
            l2_norm: 14f64.sqrt(),
            min_val: 1.0,
            max_val: 3.0,
        }
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.len(), 6);
        assert_eq!(report.invalid_count(), 3);
        assert!(report.has_failure());
        assert!(report.has_valid_data());
        assert!((report.range() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_uses_nan_sentinels() {
        let report = StatsReport::empty(0, 0);
        assert!(report.is_empty());
        assert!(!report.has_valid_data());
        assert!(report.mean.is_nan());
        assert!(report.variance.is_nan());
        assert!(report.l2_norm.is_nan());
        assert!(report.min_val.is_nan());
        assert!(report.max_val.is_nan());
    }

    #[test]
    fn test_fields_follow_field_names() {
        let report = sample();
        let names: Vec<&str> = report.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, StatsReport::FIELD_NAMES);

        for (name, value) in report.fields() {
            assert_eq!(report.field(name), Some(value));
        }
        assert_eq!(report.field("median"), None);
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 8);
        for name in StatsReport::FIELD_NAMES {
            assert!(object.contains_key(name), "missing {}", name);
        }
        assert_eq!(object["valid_count"], 3);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("n=6 nan=1 inf=2"));
        assert!(text.contains("mean=2.0000e0"));
    }
}
