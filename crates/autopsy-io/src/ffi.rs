//! UniFFI exports for host bindings
//!
//! Swift/Kotlin/Python hosts pass flat buffers; width selection happens by
//! calling the matching export.

use crate::adapter::{analyze, AdapterError};
use crate::schema::{HostArray, HostData};
use autopsy_stats::{compute_statistics, has_failure, StatsReport};

/// Quality report for a float32 buffer
#[uniffi::export]
pub fn analyze_float32(data: Vec<f32>) -> StatsReport {
    compute_statistics(&data)
}

/// Quality report for a float64 buffer
#[uniffi::export]
pub fn analyze_float64(data: Vec<f64>) -> StatsReport {
    compute_statistics(&data)
}

/// Quality report for a float64 array with an explicit shape
///
/// Rejects anything that is not one-dimensional.
#[uniffi::export]
pub fn analyze_shaped_float64(shape: Vec<u64>, data: Vec<f64>) -> Result<StatsReport, AdapterError> {
    let shape = shape
        .into_iter()
        .map(|dim| {
            usize::try_from(dim).map_err(|_| {
                AdapterError::InvalidFormat(format!("Dimension {} does not fit in memory", dim))
            })
        })
        .collect::<Result<Vec<usize>, AdapterError>>()?;
    let array = HostArray::new(shape, HostData::Float64(data))?;
    analyze(&array)
}

/// Fast check for NaN or infinite elements in a float32 buffer
#[uniffi::export]
pub fn has_non_finite_float32(data: Vec<f32>) -> bool {
    has_failure(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaped_vector() {
        let report = analyze_shaped_float64(vec![3], vec![1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(report.valid_count, 2);
        assert_eq!(report.mean, 2.0);
    }

    #[test]
    fn test_shaped_matrix_rejected() {
        let err = analyze_shaped_float64(vec![2, 2], vec![0.0; 4]).unwrap_err();
        assert_eq!(err, AdapterError::NotOneDimensional { ndim: 2 });
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_oversized_dimension_rejected() {
        let err = analyze_shaped_float64(vec![u64::MAX], Vec::new()).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidFormat(_)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_dimension_is_shape_mismatch() {
        // Fits usize here, so the shape check catches it
        let err = analyze_shaped_float64(vec![u64::MAX], Vec::new()).unwrap_err();
        assert!(err.is_shape_error());
    }
}
