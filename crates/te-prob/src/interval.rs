//! Exact binomial (Clopper-Pearson) confidence intervals.
//!
//! The interval inverts the binomial CDF through Beta quantiles, so it has
//! guaranteed coverage at any sample size. Counts are accepted as `f64` and
//! the Beta parameterisation is evaluated at the given (possibly fractional)
//! values, which extends the interval to sums of event weights in the same
//! way ROOT's `TEfficiency` does.

use statrs::distribution::{Beta, ContinuousCDF};
use te_core::{Error, Result};

/// Central coverage of a one-sigma band, used for ROC error bars.
pub const ONE_SIGMA: f64 = 0.683;

/// Central Clopper-Pearson bounds `(lower, upper)` for an efficiency.
///
/// `passed` and `total` are accumulated event weights; `passed` is clamped
/// into `[0, total]` before inversion since cumulative sums built from
/// negative-weight bins can overshoot transiently. `level` is the central
/// confidence, e.g. `0.683` for a one-sigma band.
///
/// The boundary cases are exact: `passed <= 0` pins the lower bound to 0 and
/// `passed >= total` pins the upper bound to 1.
pub fn clopper_pearson(passed: f64, total: f64, level: f64) -> Result<(f64, f64)> {
    if !passed.is_finite() || !total.is_finite() {
        return Err(Error::Validation(format!(
            "passed and total must be finite, got passed={passed} total={total}"
        )));
    }
    if total <= 0.0 {
        return Err(Error::Validation(format!(
            "total weight must be positive, got {total}"
        )));
    }
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(Error::Validation(format!(
            "confidence level must be in (0, 1), got {level}"
        )));
    }

    let k = passed.clamp(0.0, total);
    let n = total;
    let alpha = 1.0 - level;

    // Beta parameters are strictly positive on each branch, so construction
    // cannot fail.
    let lower = if k <= 0.0 {
        0.0
    } else {
        Beta::new(k, n - k + 1.0).unwrap().inverse_cdf(alpha / 2.0)
    };
    let upper = if k >= n {
        1.0
    } else {
        Beta::new(k + 1.0, n - k).unwrap().inverse_cdf(1.0 - alpha / 2.0)
    };

    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_published_95_percent_table() {
        // binom.test(5, 10) in R: [0.1870860, 0.8129140]
        let (lo, hi) = clopper_pearson(5.0, 10.0, 0.95).unwrap();
        assert!((lo - 0.187086).abs() < 1e-5);
        assert!((hi - 0.812914).abs() < 1e-5);
    }

    #[test]
    fn test_zero_passed_closed_form() {
        let (lo, hi) = clopper_pearson(0.0, 10.0, 0.95).unwrap();
        assert_eq!(lo, 0.0);
        // Upper bound for k = 0 reduces to 1 - (alpha/2)^(1/n).
        let expected = 1.0 - (0.025f64).powf(0.1);
        assert!((hi - expected).abs() < 1e-7);
    }

    #[test]
    fn test_all_passed_closed_form() {
        let (lo, hi) = clopper_pearson(10.0, 10.0, 0.95).unwrap();
        assert_eq!(hi, 1.0);
        let expected = (0.025f64).powf(0.1);
        assert!((lo - expected).abs() < 1e-7);
    }

    #[test]
    fn test_one_sigma_boundary_cases() {
        let alpha = 1.0 - ONE_SIGMA;
        let (_, hi) = clopper_pearson(0.0, 20.0, ONE_SIGMA).unwrap();
        assert!((hi - (1.0 - (alpha / 2.0).powf(1.0 / 20.0))).abs() < 1e-7);
        let (lo, _) = clopper_pearson(20.0, 20.0, ONE_SIGMA).unwrap();
        assert!((lo - (alpha / 2.0).powf(1.0 / 20.0)).abs() < 1e-7);
    }

    #[test]
    fn test_symmetry_under_complement() {
        // lower(k, n) == 1 - upper(n - k, n) for a central interval.
        for &(k, n) in &[(3.0, 12.0), (1.0, 7.0), (6.0, 9.0)] {
            let (lo, _) = clopper_pearson(k, n, 0.90).unwrap();
            let (_, hi) = clopper_pearson(n - k, n, 0.90).unwrap();
            assert!((lo - (1.0 - hi)).abs() < 1e-7);
        }
    }

    #[test]
    fn test_brackets_point_estimate() {
        for &(k, n) in &[(0.0, 5.0), (2.0, 5.0), (5.0, 5.0), (17.0, 40.0)] {
            let (lo, hi) = clopper_pearson(k, n, ONE_SIGMA).unwrap();
            assert!(lo <= k / n + 1e-12);
            assert!(hi >= k / n - 1e-12);
            assert!((0.0..=1.0).contains(&lo));
            assert!((0.0..=1.0).contains(&hi));
        }
    }

    #[test]
    fn test_weighted_counts_accepted() {
        let (lo, hi) = clopper_pearson(2.5, 7.5, ONE_SIGMA).unwrap();
        assert!(lo > 0.0 && hi < 1.0);
        assert!(lo < 2.5 / 7.5 && hi > 2.5 / 7.5);
    }

    #[test]
    fn test_passed_clamped_into_range() {
        let (lo, hi) = clopper_pearson(-0.3, 10.0, 0.95).unwrap();
        let (lo0, hi0) = clopper_pearson(0.0, 10.0, 0.95).unwrap();
        assert_eq!((lo, hi), (lo0, hi0));

        let (lo, hi) = clopper_pearson(12.0, 10.0, 0.95).unwrap();
        let (lo1, hi1) = clopper_pearson(10.0, 10.0, 0.95).unwrap();
        assert_eq!((lo, hi), (lo1, hi1));
    }

    #[test]
    fn test_narrows_with_sample_size() {
        let (lo_small, hi_small) = clopper_pearson(5.0, 10.0, 0.95).unwrap();
        let (lo_big, hi_big) = clopper_pearson(500.0, 1000.0, 0.95).unwrap();
        assert!(hi_big - lo_big < hi_small - lo_small);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(clopper_pearson(1.0, 0.0, 0.95).is_err());
        assert!(clopper_pearson(1.0, -4.0, 0.95).is_err());
        assert!(clopper_pearson(1.0, 10.0, 1.0).is_err());
        assert!(clopper_pearson(1.0, 10.0, 0.0).is_err());
        assert!(clopper_pearson(f64::NAN, 10.0, 0.95).is_err());
        assert!(clopper_pearson(1.0, f64::INFINITY, 0.95).is_err());
    }
}
