//! Host array adapter trait and width dispatch
//!
//! The stats engine only understands "a contiguous read-only buffer of N
//! elements of a known float width". The `ArrayAdapter` trait is the single
//! seam between that contract and whatever array object a host hands over:
//! it either produces such a view or rejects the array with a shape or type
//! error.

use crate::schema::ElementType;
use autopsy_stats::{compute_statistics, has_failure, FloatWidth, StatsReport};
use std::borrow::Cow;
use thiserror::Error;

/// Errors raised at the host boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum AdapterError {
    #[error("Input must be 1-dimensional, got {ndim} dimensions")]
    NotOneDimensional { ndim: usize },

    #[error("Unsupported dtype {dtype}. Use float32 or float64.")]
    UnsupportedDtype { dtype: String },

    #[error("Shape mismatch: shape covers {expected} elements, data has {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AdapterError {
    /// Whether this is a shape error (as opposed to a type or format error)
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            AdapterError::NotOneDimensional { .. } | AdapterError::ShapeMismatch { .. }
        )
    }

    /// Whether this is an element type error
    pub fn is_type_error(&self) -> bool {
        matches!(self, AdapterError::UnsupportedDtype { .. })
    }
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// A contiguous read-only float buffer of a known width
///
/// Borrowed when the host storage is already contiguous; owned when the
/// adapter had to gather a strided view.
#[derive(Debug, Clone, PartialEq)]
pub enum FloatView<'a> {
    F32(Cow<'a, [f32]>),
    F64(Cow<'a, [f64]>),
}

impl FloatView<'_> {
    /// Width of the elements
    pub fn width(&self) -> FloatWidth {
        match self {
            FloatView::F32(_) => FloatWidth::F32,
            FloatView::F64(_) => FloatWidth::F64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            FloatView::F32(v) => v.len(),
            FloatView::F64(v) => v.len(),
        }
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the view borrows the host storage
    pub fn is_borrowed(&self) -> bool {
        matches!(
            self,
            FloatView::F32(Cow::Borrowed(_)) | FloatView::F64(Cow::Borrowed(_))
        )
    }

    /// Run the stats engine instantiation matching the width
    pub fn compute_statistics(&self) -> StatsReport {
        match self {
            FloatView::F32(v) => compute_statistics::<f32>(v),
            FloatView::F64(v) => compute_statistics::<f64>(v),
        }
    }

    /// Whether any element is NaN or infinite
    pub fn has_failure(&self) -> bool {
        match self {
            FloatView::F32(v) => has_failure::<f32>(v),
            FloatView::F64(v) => has_failure::<f64>(v),
        }
    }
}

/// Something a host can hand to the stats engine
///
/// Implementations only need to produce a float view; `shape` and
/// `element_type` describe the array for validation and error messages.
pub trait ArrayAdapter {
    /// Array shape, one entry per dimension
    fn shape(&self) -> &[usize];

    /// Element type of the underlying storage
    fn element_type(&self) -> ElementType;

    /// Produce a contiguous read-only float view, or fail with a shape or
    /// type error
    fn float_view(&self) -> AdapterResult<FloatView<'_>>;

    /// Number of dimensions
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements
    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }
}

/// Reject anything that is not one-dimensional
pub fn validate_one_dimensional(shape: &[usize]) -> AdapterResult<()> {
    if shape.len() != 1 {
        return Err(AdapterError::NotOneDimensional { ndim: shape.len() });
    }
    Ok(())
}

/// Reject element types the engine has no instantiation for
pub fn validate_float_type(element_type: ElementType) -> AdapterResult<FloatWidth> {
    element_type
        .float_width()
        .ok_or_else(|| AdapterError::UnsupportedDtype {
            dtype: element_type.name().to_string(),
        })
}

/// Validate a host array and compute its quality report
pub fn analyze<A: ArrayAdapter + ?Sized>(array: &A) -> AdapterResult<StatsReport> {
    validate_one_dimensional(array.shape())?;
    validate_float_type(array.element_type())?;
    Ok(array.float_view()?.compute_statistics())
}

/// Whether a host array contains any NaN or infinite element
pub fn has_non_finite<A: ArrayAdapter + ?Sized>(array: &A) -> AdapterResult<bool> {
    validate_one_dimensional(array.shape())?;
    validate_float_type(array.element_type())?;
    Ok(array.float_view()?.has_failure())
}

/// Quality report for a float32 buffer
pub fn analyze_f32(data: &[f32]) -> StatsReport {
    compute_statistics(data)
}

/// Quality report for a float64 buffer
pub fn analyze_f64(data: &[f64]) -> StatsReport {
    compute_statistics(data)
}
