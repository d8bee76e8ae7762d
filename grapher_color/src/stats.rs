// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small numeric helpers shared by the binning strategies and the color scale.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Rounds `value` to `sig_figs` significant figures.
///
/// Halves round toward positive infinity, so `-0.25` rounds to `-0.2` at one
/// significant figure. Zero and non-finite values are returned unchanged.
pub fn round_sig_fig(value: f64, sig_figs: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite f64 is within +/-400"
    )]
    let precision = sig_figs.max(1) as i32 - 1 - magnitude as i32;
    round_to(value, precision)
}

/// Rounds to `precision` decimal places (negative precision rounds to tens, hundreds, ...).
fn round_to(value: f64, precision: i32) -> f64 {
    if precision >= 0 {
        let factor = 10_f64.powi(precision);
        (value * factor + 0.5).floor() / factor
    } else {
        let factor = 10_f64.powi(-precision);
        (value / factor + 0.5).floor() * factor
    }
}

/// Arithmetic mean, or `None` for an empty sample.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample (n - 1) standard deviation, or `None` when fewer than two values are given.
pub(crate) fn sample_deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// The `p`-quantile of an ascending slice, linearly interpolated between neighbors.
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n == 1 {
        return sorted.first().copied();
    }
    if p >= 1.0 {
        return sorted.last().copied();
    }
    let i = (n - 1) as f64 * p;
    let i0 = i.floor();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "i0 is in [0, n - 1]"
    )]
    let idx = i0 as usize;
    let v0 = sorted[idx];
    let v1 = sorted[(idx + 1).min(n - 1)];
    Some(v0 + (v1 - v0) * (i - i0))
}

/// Counts distinct values in an ascending slice.
pub(crate) fn count_distinct_sorted(sorted: &[f64]) -> usize {
    let mut count = 0;
    let mut last: Option<f64> = None;
    for &v in sorted {
        if last != Some(v) {
            count += 1;
            last = Some(v);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn round_sig_fig_handles_magnitudes() {
        assert_eq!(round_sig_fig(0.0, 1), 0.0);
        assert_eq!(round_sig_fig(123.0, 1), 100.0);
        assert_eq!(round_sig_fig(0.0374, 1), 0.04);
        assert_eq!(round_sig_fig(-47.0, 1), -50.0);
        assert_eq!(round_sig_fig(1549.0, 2), 1500.0);
        assert_eq!(round_sig_fig(-0.25, 1), -0.2);
    }

    #[test]
    fn sample_deviation_uses_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_deviation(&values).unwrap();
        assert!((sd - 2.138_089_935_299_395).abs() < 1e-12);
        assert_eq!(sample_deviation(&[1.0]), None);
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn distinct_count_of_sorted_values() {
        assert_eq!(count_distinct_sorted(&[]), 0);
        assert_eq!(count_distinct_sorted(&[1.0, 1.0, 2.0, 3.0, 3.0]), 3);
    }
}
