//! autopsy-stats - Numeric quality statistics for float buffers
//!
//! This crate provides the diagnostic core of autopsy:
//!
//! - **Engine**: single-pass NaN/Inf classification plus mean, population
//!   variance, L2 norm and extrema over the finite elements
//! - **Report**: the fixed eight-field `StatsReport`
//! - **Sanitize**: replacing non-finite elements with finite substitutes
//!
//! # Widths
//!
//! The engine is generic over [`StatElement`], implemented for `f32` and
//! `f64`. Both widths share one kernel and the same semantics.

pub mod element;
pub mod engine;
pub mod report;
pub mod sanitize;

pub use element::*;
pub use engine::*;
pub use report::*;
pub use sanitize::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
