use geodesic_explorer::sampling::downsample::{sample_indices, stride};
use geodesic_explorer::sampling::{DEFAULT_PADDING, downsample, viewport};

fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
    let x = (0..n).map(|i| i as f64).collect();
    let y = (0..n).map(|i| (i as f64) * 0.5).collect();
    (x, y)
}

#[test]
fn short_input_passes_through_unchanged() {
    let (x, y) = ramp(10);
    let out = downsample(&x, &y, 7000);
    assert_eq!(out.x, x);
    assert_eq!(out.y, y);
    assert_eq!(out.step, 1);
}

#[test]
fn input_at_budget_is_not_decimated() {
    let (x, y) = ramp(7000);
    let out = downsample(&x, &y, 7000);
    assert_eq!(out.len(), 7000);
    assert_eq!(out.step, 1);
}

#[test]
fn large_input_respects_budget_and_keeps_endpoints() {
    let (x, y) = ramp(20_000);
    let out = downsample(&x, &y, 7000);
    assert_eq!(out.step, 3);
    assert!(out.len() <= 7000);
    assert_eq!(out.x.first(), Some(&0.0));
    assert_eq!(out.x.last(), Some(&19_999.0));
    assert_eq!(out.y.last(), Some(&(19_999.0 * 0.5)));
}

#[test]
fn output_is_strictly_increasing_subsequence() {
    let (x, y) = ramp(12_345);
    let out = downsample(&x, &y, 1000);
    assert!(out.len() <= 1000);
    assert!(out.x.windows(2).all(|w| w[1] > w[0]));
    for (&px, &py) in out.x.iter().zip(&out.y) {
        // Every retained pair is a source pair.
        assert_eq!(py, px * 0.5);
    }
}

#[test]
fn last_index_replaces_tail_when_budget_is_full() {
    // 10 samples, budget 5: stride 2 gives 0,2,4,6,8 (already 5), so 9 replaces 8.
    assert_eq!(stride(10, 5), 2);
    assert_eq!(sample_indices(10, 5), vec![0, 2, 4, 6, 9]);
    // 10 samples, budget 4: stride 3 gives 0,3,6,9 which already ends on the last index.
    assert_eq!(sample_indices(10, 4), vec![0, 3, 6, 9]);
    // 11 samples, budget 4: stride 3 gives 0,3,6,9, then 10 replaces 9.
    assert_eq!(sample_indices(11, 4), vec![0, 3, 6, 10]);
}

#[test]
fn last_index_is_appended_when_budget_has_room() {
    // 7 samples, budget 4: stride 2 gives 0,2,4,6 which ends on the last index.
    assert_eq!(sample_indices(7, 4), vec![0, 2, 4, 6]);
    // 8 samples, budget 5: stride 2 gives 0,2,4,6 and 7 is appended.
    assert_eq!(sample_indices(8, 5), vec![0, 2, 4, 6, 7]);
}

#[test]
fn zero_budget_and_empty_input_yield_empty_output() {
    let (x, y) = ramp(50);
    assert!(downsample(&x, &y, 0).is_empty());
    assert!(downsample(&[], &[], 10).is_empty());
}

#[test]
fn mismatched_lengths_use_shorter_sequence() {
    let x = vec![1.0, 2.0, 3.0, 4.0];
    let y = vec![10.0, 20.0];
    let out = downsample(&x, &y, 100);
    assert_eq!(out.x, vec![1.0, 2.0]);
    assert_eq!(out.y, vec![10.0, 20.0]);
}

#[test]
fn viewport_is_square_and_padded() {
    let x = vec![-10.0, 10.0, 0.0];
    let y = vec![0.0, 2.0, 4.0];
    let vp = viewport(&x, &y, DEFAULT_PADDING).expect("viewport");
    assert!((vp.width() - vp.height()).abs() < 1e-12);
    assert!((vp.half_extent() - 10.0 * 1.08).abs() < 1e-9);
    let (cx, cy) = vp.center();
    assert!(cx.abs() < 1e-12);
    assert!((cy - 2.0).abs() < 1e-12);
}

#[test]
fn viewport_skips_non_finite_pairs() {
    let x = vec![1.0, f64::NAN, 3.0, 1000.0];
    let y = vec![1.0, 500.0, 3.0, f64::INFINITY];
    let vp = viewport(&x, &y, 0.0).expect("viewport");
    assert_eq!(vp.x_range, (1.0, 3.0));
    assert_eq!(vp.y_range, (1.0, 3.0));
}

#[test]
fn single_point_viewport_uses_unit_half_extent() {
    let vp = viewport(&[5.0], &[5.0], 0.08).expect("viewport");
    assert!((vp.x_range.0 - 3.92).abs() < 1e-12);
    assert!((vp.x_range.1 - 6.08).abs() < 1e-12);
    assert!((vp.y_range.0 - 3.92).abs() < 1e-12);
    assert!((vp.y_range.1 - 6.08).abs() < 1e-12);
}

#[test]
fn viewport_without_finite_samples_is_none() {
    assert!(viewport(&[f64::NAN], &[1.0], 0.08).is_none());
    assert!(viewport(&[], &[], 0.08).is_none());
}

#[test]
fn overflowing_extent_falls_back_to_auto_scale() {
    assert!(viewport(&[-1e308, 1e308], &[0.0, 0.0], DEFAULT_PADDING).is_none());
    assert!(viewport(&[0.0, 0.0], &[1.7e308, 1.7e308], DEFAULT_PADDING).is_none());
    // Large but representable extents are still framed.
    let vp = viewport(&[-1e300, 1e300], &[0.0, 0.0], DEFAULT_PADDING).expect("viewport");
    assert!(vp.x_range.1.is_finite());
}
