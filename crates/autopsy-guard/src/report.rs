//! Failure reports produced by a watch

use autopsy_stats::StatsReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a failing array came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureSource {
    /// A named input of the watched call
    Input(String),
    /// The value the watched call returned
    ReturnValue,
}

impl fmt::Display for FailureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureSource::Input(name) => write!(f, "Input '{}'", name),
            FailureSource::ReturnValue => write!(f, "Return Value"),
        }
    }
}

/// A non-finite array found by a watch, with its statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub function: String,
    pub source: FailureSource,
    pub report: StatsReport,
}

impl FailureReport {
    pub fn new(function: impl Into<String>, source: FailureSource, report: StatsReport) -> Self {
        Self {
            function: function.into(),
            source,
            report,
        }
    }

    /// Table rows as (label, value) pairs
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Function", self.function.clone()),
            ("Source", self.source.to_string()),
            ("NaN Count", self.report.nan_count.to_string()),
            ("Inf Count", self.report.inf_count.to_string()),
            ("Mean", format!("{:.4e}", self.report.mean)),
            ("L2 Norm", format!("{:.4e}", self.report.l2_norm)),
            ("Variance", format!("{:.4e}", self.report.variance)),
        ]
    }

    /// Multi-line table for logs and terminals
    pub fn render(&self) -> String {
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        let mut out = String::from("NUMERICAL FAILURE DETECTED");
        for (label, value) in rows {
            out.push_str(&format!("\n  {:<width$}  {}", label, value, width = width));
        }
        out
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}: {} NaN, {} Inf",
            self.source, self.function, self.report.nan_count, self.report.inf_count
        )
    }
}
