//! Neutralizing non-finite values
//!
//! Replaces NaN and infinite elements with finite substitutes. The default
//! policy matches numpy's `nan_to_num`: NaN becomes zero and the infinities
//! clamp to the largest finite magnitude of the element type.

use crate::element::StatElement;

/// Replacement values for non-finite elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizePolicy<T: StatElement> {
    /// Replacement for NaN
    pub nan: T,
    /// Replacement for +Infinity
    pub pos_inf: T,
    /// Replacement for -Infinity
    pub neg_inf: T,
}

impl<T: StatElement> Default for SanitizePolicy<T> {
    fn default() -> Self {
        Self {
            nan: T::zero(),
            pos_inf: T::max_value(),
            neg_inf: T::min_value(),
        }
    }
}

impl<T: StatElement> SanitizePolicy<T> {
    /// Replace every non-finite value with the same constant
    pub fn uniform(value: T) -> Self {
        Self {
            nan: value,
            pos_inf: value,
            neg_inf: value,
        }
    }

    /// Set the NaN replacement
    pub fn with_nan(mut self, value: T) -> Self {
        self.nan = value;
        self
    }

    /// Substitute for a single element, or `None` if it is already finite
    #[inline]
    pub fn replacement(&self, x: T) -> Option<T> {
        if x.is_nan() {
            Some(self.nan)
        } else if x.is_infinite() {
            if x.is_sign_positive() {
                Some(self.pos_inf)
            } else {
                Some(self.neg_inf)
            }
        } else {
            None
        }
    }
}

/// Return a copy of `data` with non-finite values replaced
pub fn sanitize<T: StatElement>(data: &[T], policy: &SanitizePolicy<T>) -> Vec<T> {
    data.iter()
        .map(|&x| policy.replacement(x).unwrap_or(x))
        .collect()
}

/// Replace non-finite values in place, returning how many were replaced
pub fn sanitize_in_place<T: StatElement>(data: &mut [T], policy: &SanitizePolicy<T>) -> usize {
    let mut replaced = 0;
    for x in data.iter_mut() {
        if let Some(r) = policy.replacement(*x) {
            *x = r;
            replaced += 1;
        }
    }
    replaced
}
