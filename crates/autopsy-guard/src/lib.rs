//! autopsy-guard - Numerical failure guard
//!
//! Wraps a computation in a [`Watch`] that checks its array inputs and its
//! returned array for NaN and Inf, reports what it finds through `tracing`,
//! and can either halt or neutralize the result.
//!
//! ```no_run
//! use autopsy_guard::{Watch, WatchConfig};
//! use ndarray::Array1;
//!
//! let x = Array1::from(vec![1.0f64, 0.0]);
//! let watch = Watch::with_config("invert", WatchConfig::lenient());
//! let outcome = watch
//!     .run(&[("x", &x)], || x.mapv(|v| 1.0 / v))
//!     .unwrap();
//! assert_eq!(outcome.failures.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod watch;

pub use config::{GuardMode, WatchConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, GuardError, GuardResult};
pub use report::{FailureReport, FailureSource};
pub use watch::{Neutralize, Outcome, Watch};

/// Name of the statistics engine behind every watch
pub const ENGINE_NAME: &str = "Rust Stats Core";

/// Which engine the guard is running on
pub fn engine_status() -> &'static str {
    ENGINE_NAME
}
