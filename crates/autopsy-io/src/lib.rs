//! autopsy-io - Host boundary for the autopsy stats engine
//!
//! This crate turns host arrays into something the engine can reduce over:
//!
//! - **Adapter**: the `ArrayAdapter` trait, shape/type validation and float
//!   width dispatch
//! - **Schema**: element types and the owned `HostArray`
//! - **ndarray**: adapters for `ndarray` arrays and views
//! - **NPY**: NumPy `.npy` file reader
//! - **Marshal**: reports as named records / JSON
//!
//! # Design
//!
//! The engine never sees a host object. Every array goes through
//! `ArrayAdapter::float_view`, which either yields a contiguous read-only
//! buffer of a known width or fails with a shape or type error.

pub mod adapter;
pub mod marshal;
pub mod schema;

#[cfg(feature = "ndarray")]
pub mod ndarray_adapter;

#[cfg(feature = "npy")]
pub mod npy_reader;

#[cfg(feature = "uniffi")]
pub mod ffi;

pub use adapter::*;
pub use marshal::*;
pub use schema::*;

#[cfg(feature = "ndarray")]
pub use ndarray_adapter::AdapterElement;

#[cfg(feature = "npy")]
pub use npy_reader::{open_npy, read_npy};

pub use autopsy_stats::{FloatWidth, StatsReport};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
