//! Inspection wrapper around a computation's inputs and output
//!
//! A [`Watch`] runs a closure, checking named input arrays before the call
//! and the returned array after it. Every array with NaN or Inf elements
//! becomes a [`FailureReport`] that is logged and handed back alongside the
//! value. Arrays the adapter cannot analyze (not 1-D, not float) are skipped.

use crate::config::{GuardMode, WatchConfig};
use crate::error::{GuardError, GuardResult};
use crate::report::{FailureReport, FailureSource};
use autopsy_io::{analyze, ArrayAdapter, HostArray};
use autopsy_stats::{SanitizePolicy, StatElement};
use ndarray::{ArrayBase, DataMut, Dimension};
use std::path::Path;

/// Values whose non-finite elements can be replaced in place
pub trait Neutralize {
    /// Replace NaN/Inf elements, returning how many were replaced
    fn neutralize(&mut self) -> usize;
}

impl Neutralize for HostArray {
    fn neutralize(&mut self) -> usize {
        self.sanitize_in_place()
    }
}

impl<A, S, D> Neutralize for ArrayBase<S, D>
where
    A: StatElement,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    fn neutralize(&mut self) -> usize {
        let policy = SanitizePolicy::<A>::default();
        let mut replaced = 0;
        for x in self.iter_mut() {
            if let Some(value) = policy.replacement(*x) {
                *x = value;
                replaced += 1;
            }
        }
        replaced
    }
}

/// Result of a watched call
#[derive(Debug, Clone)]
pub struct Outcome<R> {
    /// The returned value, neutralized if the config asked for it
    pub value: R,
    /// Failures found in inputs and output, in inspection order
    pub failures: Vec<FailureReport>,
    /// Number of output elements replaced by neutralization
    pub neutralized: usize,
}

impl<R> Outcome<R> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_value(self) -> R {
        self.value
    }
}

/// A named inspection wrapper
#[derive(Debug, Clone)]
pub struct Watch {
    name: String,
    config: WatchConfig,
}

impl Watch {
    /// Watch with the default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, WatchConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: WatchConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Watch configured from the standard config locations
    pub fn from_standard_config(
        name: impl Into<String>,
        project_root: Option<&Path>,
    ) -> GuardResult<Self> {
        let config = WatchConfig::load_standard(project_root)?;
        Ok(Self::with_config(name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Check one array, returning a failure report if it holds NaN or Inf
    ///
    /// Arrays the adapter rejects yield `None`.
    pub fn inspect<A: ArrayAdapter + ?Sized>(
        &self,
        source: FailureSource,
        array: &A,
    ) -> Option<FailureReport> {
        match analyze(array) {
            Ok(report) if report.has_failure() => {
                Some(FailureReport::new(self.name.clone(), source, report))
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("{}: skipping {} ({})", self.name, source, e);
                None
            }
        }
    }

    /// Run `f` under the watch
    ///
    /// Inputs are inspected before the call, the returned value after it.
    /// In strict mode with `halt_on_failure` set, any failure turns into
    /// [`GuardError::Halted`]. Lenient mode never halts; with `neutralize`
    /// set the returned value has its NaN/Inf elements replaced.
    pub fn run<R, F>(&self, inputs: &[(&str, &dyn ArrayAdapter)], f: F) -> GuardResult<Outcome<R>>
    where
        F: FnOnce() -> R,
        R: ArrayAdapter + Neutralize,
    {
        if self.config.verbose {
            tracing::debug!("{}: execution started", self.name);
        }

        let mut failures = Vec::new();

        if self.config.inspect_args {
            for (name, array) in inputs {
                if let Some(failure) = self.inspect(FailureSource::Input(name.to_string()), *array)
                {
                    self.record(failure, &mut failures);
                }
            }
        }

        let mut value = f();

        if self.config.inspect_return {
            if let Some(failure) = self.inspect(FailureSource::ReturnValue, &value) {
                self.record(failure, &mut failures);
            }
        }

        let mut neutralized = 0;
        if self.config.neutralizes() {
            neutralized = value.neutralize();
            if neutralized > 0 {
                tracing::info!(
                    "{}: neutralized {} non-finite output element(s)",
                    self.name,
                    neutralized
                );
            }
        }

        if failures.is_empty() {
            if self.config.verbose {
                tracing::info!("{}: finished with no numerical failures", self.name);
            }
        } else if self.config.halt_on_failure && self.config.mode == GuardMode::Strict {
            return Err(GuardError::Halted {
                function: self.name.clone(),
                failures,
            });
        }

        Ok(Outcome {
            value,
            failures,
            neutralized,
        })
    }

    fn record(&self, failure: FailureReport, failures: &mut Vec<FailureReport>) {
        tracing::warn!("{}", failure.render());
        failures.push(failure);
    }
}
