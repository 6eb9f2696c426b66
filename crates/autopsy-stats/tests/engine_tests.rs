//! Stats engine integration tests
//!
//! Reference values are computed with a plain two-pass f64 formula.

use autopsy_stats::{compute_statistics, has_failure, FloatWidth, StatElement, StatsReport};
use proptest::prelude::*;
use rstest::rstest;

/// Two-pass population statistics over the finite elements, in f64
fn reference(values: &[f64]) -> (f64, f64, f64) {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let l2 = finite.iter().map(|x| x * x).sum::<f64>().sqrt();
    (mean, variance, l2)
}

fn close(actual: f64, expected: f64, rel: f64, abs: f64) -> bool {
    (actual - expected).abs() <= abs + rel * expected.abs()
}

// === Documented Cases ===

#[rstest]
#[case(FloatWidth::F32)]
#[case(FloatWidth::F64)]
fn test_mixed_nan_inf_buffer(#[case] width: FloatWidth) {
    let report = match width {
        FloatWidth::F32 => compute_statistics(&[1.0f32, f32::NAN, 2.0, f32::INFINITY, 3.0]),
        FloatWidth::F64 => compute_statistics(&[1.0f64, f64::NAN, 2.0, f64::INFINITY, 3.0]),
    };

    assert_eq!(report.nan_count, 1);
    assert_eq!(report.inf_count, 1);
    assert_eq!(report.valid_count, 3);
    assert_eq!(report.mean, 2.0);
    assert_eq!(report.min_val, 1.0);
    assert_eq!(report.max_val, 3.0);
    assert!(close(report.variance, 2.0 / 3.0, width.tolerance(), 0.0));
}

#[rstest]
#[case(&[])]
#[case(&[f64::NAN])]
#[case(&[f64::INFINITY, f64::NEG_INFINITY])]
#[case(&[f64::NAN, f64::INFINITY, f64::NAN])]
fn test_no_valid_elements_yield_nan_sentinels(#[case] data: &[f64]) {
    let report = compute_statistics(data);

    assert_eq!(report.len(), data.len() as u64);
    assert_eq!(report.valid_count, 0);
    assert!(!report.has_valid_data());
    assert!(report.mean.is_nan());
    assert!(report.variance.is_nan());
    assert!(report.l2_norm.is_nan());
    assert!(report.min_val.is_nan());
    assert!(report.max_val.is_nan());
}

#[rstest]
#[case(3.5, 1)]
#[case(-2.0, 16)]
#[case(0.0, 100)]
#[case(1e-3, 10_000)]
fn test_constant_buffer(#[case] v: f64, #[case] n: usize) {
    let data = vec![v; n];
    let report = compute_statistics(&data);

    assert_eq!(report.valid_count, n as u64);
    assert_eq!(report.mean, v);
    assert_eq!(report.variance, 0.0);
    assert_eq!(report.min_val, v);
    assert_eq!(report.max_val, v);
    assert!(close(report.l2_norm, v.abs() * (n as f64).sqrt(), 1e-10, 0.0));
}

#[test]
fn test_constant_buffer_f32() {
    let data = vec![-0.75f32; 4096];
    let report = compute_statistics(&data);

    assert_eq!(report.mean, -0.75);
    assert_eq!(report.variance, 0.0);
    assert_eq!(report.min_val, -0.75);
    assert_eq!(report.max_val, -0.75);
    assert!(close(report.l2_norm, 0.75 * 64.0, 1e-5, 0.0));
}

#[rstest]
#[case(vec![1e20f32, 1e20], 1e20f32 as f64, 0.0)]
#[case(vec![3e38f32, -3e38], 0.0, (3e38f32 as f64).powi(2))]
#[case(vec![f32::MAX, f32::MAX, f32::MAX], f32::MAX as f64, 0.0)]
fn test_large_f32_magnitudes(#[case] data: Vec<f32>, #[case] mean: f64, #[case] variance: f64) {
    let report = compute_statistics(&data);
    let widened: Vec<f64> = data.iter().map(|x| x.widen()).collect();
    let (_, _, l2) = reference(&widened);

    assert!(close(report.mean, mean, 1e-12, 0.0), "mean {}", report.mean);
    assert!(close(report.variance, variance, 1e-12, 0.0), "variance {}", report.variance);
    assert!(report.l2_norm.is_finite());
    assert!(close(report.l2_norm, l2, 1e-12, 0.0));
}

#[rstest]
#[case(vec![1e150, -1e150, 1e150])]
#[case(vec![1e300, 1e300, 1e300, 1e300])]
#[case(vec![-1e-300, 1e-300, 5e-301])]
fn test_large_and_tiny_f64_magnitudes(#[case] data: Vec<f64>) {
    let report = compute_statistics(&data);
    let (mean, _, _) = reference(&data);

    assert!(close(report.mean, mean, 1e-12, 0.0), "mean {} vs {}", report.mean, mean);
    assert!(report.mean.is_finite());
    assert!(report.variance.is_finite() && report.variance >= 0.0);
}

#[test]
fn test_population_not_sample_divisor() {
    let data = [1.0f64, 2.0, 3.0, 4.0];
    let report = compute_statistics(&data);
    // Population: 5/4. The sample estimator would give 5/3.
    assert!(close(report.variance, 1.25, 1e-12, 0.0));
}

#[test]
fn test_report_fields_for_host() {
    let report = compute_statistics(&[2.0f32, f32::NAN]);
    let names: Vec<&str> = report.fields().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, StatsReport::FIELD_NAMES.to_vec());
}

// === Property-Based Tests ===

fn any_f64_with_specials() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1e6f64..1e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => any::<f64>(),
    ]
}

proptest! {
    #[test]
    fn test_counts_partition_length(data in prop::collection::vec(any_f64_with_specials(), 0..512)) {
        let report = compute_statistics(&data);
        prop_assert_eq!(report.nan_count + report.inf_count + report.valid_count, data.len() as u64);

        let narrow: Vec<f32> = data.iter().map(|&x| x as f32).collect();
        let report = compute_statistics(&narrow);
        prop_assert_eq!(report.len(), narrow.len() as u64);
    }

    #[test]
    fn test_has_failure_agrees_with_counts(data in prop::collection::vec(any_f64_with_specials(), 0..256)) {
        let report = compute_statistics(&data);
        prop_assert_eq!(has_failure(&data), report.has_failure());
    }

    #[test]
    fn test_extrema_bound_valid_elements(data in prop::collection::vec(any_f64_with_specials(), 1..512)) {
        let report = compute_statistics(&data);
        for &x in data.iter().filter(|x| x.is_finite()) {
            prop_assert!(report.min_val <= x && x <= report.max_val);
        }
    }

    #[test]
    fn test_variance_matches_reference_f64(data in prop::collection::vec(-1e3f64..1e3, 1..10_000)) {
        let report = compute_statistics(&data);
        let (mean, variance, l2) = reference(&data);

        prop_assert!(close(report.mean, mean, 1e-9, 1e-9), "mean {} vs {}", report.mean, mean);
        prop_assert!(close(report.variance, variance, 1e-9, 1e-9), "variance {} vs {}", report.variance, variance);
        prop_assert!(close(report.l2_norm, l2, 1e-9, 0.0));
    }

    #[test]
    fn test_variance_matches_reference_f32(data in prop::collection::vec(-1e2f32..1e2, 1..10_000)) {
        let report = compute_statistics(&data);
        let widened: Vec<f64> = data.iter().map(|x| x.widen()).collect();
        let (mean, variance, l2) = reference(&widened);

        prop_assert!(close(report.mean, mean, 1e-9, 1e-9), "mean {} vs {}", report.mean, mean);
        prop_assert!(close(report.variance, variance, 1e-9, 1e-9), "variance {} vs {}", report.variance, variance);
        prop_assert!(close(report.l2_norm, l2, 1e-9, 0.0));
    }

    #[test]
    fn test_widths_agree(data in prop::collection::vec(-1e30f32..1e30, 1..4096)) {
        let wide: Vec<f64> = data.iter().map(|&x| x as f64).collect();
        let narrow = compute_statistics(&data);
        let wide = compute_statistics(&wide);
        let tol = FloatWidth::F32.tolerance();

        prop_assert_eq!(narrow.valid_count, wide.valid_count);
        prop_assert_eq!(narrow.min_val, wide.min_val);
        prop_assert_eq!(narrow.max_val, wide.max_val);
        prop_assert!(narrow.variance.is_finite() && narrow.variance >= 0.0);
        prop_assert!(narrow.l2_norm.is_finite());
        prop_assert!(close(narrow.mean, wide.mean, tol, 0.0));
        prop_assert!(close(narrow.variance, wide.variance, tol, 0.0));
        prop_assert!(close(narrow.l2_norm, wide.l2_norm, tol, 0.0));
    }

    #[test]
    fn test_finite_f32_moments_stay_finite(data in prop::collection::vec(any::<f32>().prop_filter("finite", |x| x.is_finite()), 1..512)) {
        let report = compute_statistics(&data);

        prop_assert_eq!(report.valid_count, data.len() as u64);
        prop_assert!(report.mean.is_finite());
        prop_assert!(report.min_val <= report.mean && report.mean <= report.max_val);
        prop_assert!(report.variance.is_finite() && report.variance >= 0.0);
        prop_assert!(report.l2_norm.is_finite());
    }

    #[test]
    fn test_finite_f64_moments_never_nan(data in prop::collection::vec(any::<f64>().prop_filter("finite", |x| x.is_finite()), 1..512)) {
        let report = compute_statistics(&data);

        prop_assert!(!report.mean.is_nan());
        prop_assert!(report.min_val <= report.mean && report.mean <= report.max_val);
        prop_assert!(!report.variance.is_nan() && report.variance >= 0.0);
        prop_assert!(!report.l2_norm.is_nan());
    }
}
