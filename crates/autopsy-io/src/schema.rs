//! Element types and owned host arrays

use crate::adapter::{AdapterError, AdapterResult, ArrayAdapter, FloatView};
use autopsy_stats::{sanitize_in_place, FloatWidth, SanitizePolicy};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Element type of a host array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Float16,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Bool,
    Unknown,
}

impl ElementType {
    /// Host-facing dtype name
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Float16 => "float16",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::UInt8 => "uint8",
            ElementType::UInt16 => "uint16",
            ElementType::UInt32 => "uint32",
            ElementType::UInt64 => "uint64",
            ElementType::Bool => "bool",
            ElementType::Unknown => "unknown",
        }
    }

    /// Size in bytes for fixed-width types
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            ElementType::Bool | ElementType::Int8 | ElementType::UInt8 => Some(1),
            ElementType::Float16 | ElementType::Int16 | ElementType::UInt16 => Some(2),
            ElementType::Float32 | ElementType::Int32 | ElementType::UInt32 => Some(4),
            ElementType::Float64 | ElementType::Int64 | ElementType::UInt64 => Some(8),
            ElementType::Unknown => None,
        }
    }

    /// Float width the stats engine can reduce over, if any
    pub fn float_width(&self) -> Option<FloatWidth> {
        match self {
            ElementType::Float32 => Some(FloatWidth::F32),
            ElementType::Float64 => Some(FloatWidth::F64),
            _ => None,
        }
    }
}

impl From<FloatWidth> for ElementType {
    fn from(width: FloatWidth) -> Self {
        match width {
            FloatWidth::F32 => ElementType::Float32,
            FloatWidth::F64 => ElementType::Float64,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flat element storage of a host array
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    UInt8(Vec<u8>),
    Bool(Vec<bool>),
}

impl HostData {
    /// Get the element type
    pub fn element_type(&self) -> ElementType {
        match self {
            HostData::Float32(_) => ElementType::Float32,
            HostData::Float64(_) => ElementType::Float64,
            HostData::Int32(_) => ElementType::Int32,
            HostData::Int64(_) => ElementType::Int64,
            HostData::UInt8(_) => ElementType::UInt8,
            HostData::Bool(_) => ElementType::Bool,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            HostData::Float32(v) => v.len(),
            HostData::Float64(v) => v.len(),
            HostData::Int32(v) => v.len(),
            HostData::Int64(v) => v.len(),
            HostData::UInt8(v) => v.len(),
            HostData::Bool(v) => v.len(),
        }
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An owned array as a host runtime would hand it over: shape plus flat
/// row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    shape: Vec<usize>,
    data: HostData,
}

impl HostArray {
    /// Create a host array, checking that the shape covers the storage
    pub fn new(shape: Vec<usize>, data: HostData) -> AdapterResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(AdapterError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over any storage
    pub fn from_data_1d(data: HostData) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// One-dimensional float32 array
    pub fn from_f32(values: Vec<f32>) -> Self {
        Self::from_data_1d(HostData::Float32(values))
    }

    /// One-dimensional float64 array
    pub fn from_f64(values: Vec<f64>) -> Self {
        Self::from_data_1d(HostData::Float64(values))
    }

    /// Get the storage
    pub fn data(&self) -> &HostData {
        &self.data
    }

    /// Consume the array, returning its storage
    pub fn into_data(self) -> HostData {
        self.data
    }

    /// Replace NaN and infinite elements in place with the default policy
    ///
    /// Returns how many elements were replaced; non-float storage is left
    /// untouched.
    pub fn sanitize_in_place(&mut self) -> usize {
        match &mut self.data {
            HostData::Float32(v) => sanitize_in_place(v, &SanitizePolicy::default()),
            HostData::Float64(v) => sanitize_in_place(v, &SanitizePolicy::default()),
            _ => 0,
        }
    }

    /// Flatten to one dimension, keeping the storage order
    pub fn flatten(mut self) -> Self {
        self.shape = vec![self.data.len()];
        self
    }
}

impl ArrayAdapter for HostArray {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    fn float_view(&self) -> AdapterResult<FloatView<'_>> {
        crate::adapter::validate_one_dimensional(&self.shape)?;
        match &self.data {
            HostData::Float32(v) => Ok(FloatView::F32(Cow::Borrowed(v.as_slice()))),
            HostData::Float64(v) => Ok(FloatView::F64(Cow::Borrowed(v.as_slice()))),
            other => Err(AdapterError::UnsupportedDtype {
                dtype: other.element_type().to_string(),
            }),
        }
    }
}
