//! ROC curve artifact — signal efficiency vs background efficiency scan.
//!
//! Reduces a pair of binned classifier-output distributions (same binning,
//! under/overflow included) into a monotone sequence of
//! `(signal efficiency, background efficiency)` operating points, optionally
//! decorated with one-sigma Clopper-Pearson bands.
//!
//! This module computes the numeric artifact; rendering is handled
//! downstream.
//!
//! Two heuristics are carried over from the original evaluation tooling and
//! kept as-is:
//!
//! - the scan direction comes from comparing bin-index-weighted means, which
//!   picks the wrong end for strongly multimodal discriminants;
//! - a curve left with exactly two points collapses to its first point,
//!   treating the pair as one operating point measured twice.

use serde::{Deserialize, Serialize};
use te_core::{Error, Result};
use te_prob::interval::{ONE_SIGMA, clopper_pearson};

/// Asymmetric per-point error bands, aligned with the curve arrays.
///
/// Values are half-widths around the efficiencies. They come from exact
/// binomial bounds, so points at 0 or 1 get one-sided bands naturally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocErrorBands {
    /// Downward half-width on the signal efficiency.
    pub signal_lo: Vec<f64>,
    /// Upward half-width on the signal efficiency.
    pub signal_hi: Vec<f64>,
    /// Downward half-width on the background efficiency.
    pub background_lo: Vec<f64>,
    /// Upward half-width on the background efficiency.
    pub background_hi: Vec<f64>,
}

/// Plot-friendly ROC curve artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocCurveArtifact {
    pub schema_version: String,
    /// Signal efficiencies, non-decreasing along the scan.
    pub eff_signal: Vec<f64>,
    /// Background efficiencies, aligned with `eff_signal`.
    pub eff_background: Vec<f64>,
    /// One-sigma Clopper-Pearson bands, present when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<RocErrorBands>,
    /// Total signal weight used for normalisation.
    pub total_signal: f64,
    /// Total background weight used for normalisation.
    pub total_background: f64,
    /// Whether the scan ran from the upper end of the axis down.
    pub reversed: bool,
}

impl RocCurveArtifact {
    /// Number of operating points on the curve.
    pub fn len(&self) -> usize {
        self.eff_signal.len()
    }

    /// True when filtering left no informative point.
    pub fn is_empty(&self) -> bool {
        self.eff_signal.is_empty()
    }
}

/// Bin-index-weighted mean of a distribution. Zero when the total weight is zero.
fn index_mean(h: &[f64]) -> f64 {
    let total: f64 = h.iter().copied().sum();
    if total == 0.0 {
        return 0.0;
    }
    let weighted: f64 = h.iter().enumerate().map(|(i, &v)| i as f64 * v).sum();
    weighted / total
}

/// Prefix sums over all bins, under/overflow included.
fn cumulative(h: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(h.len());
    let mut acc = 0.0;
    for &v in h {
        acc += v;
        out.push(acc);
    }
    out
}

/// Reduce the cumulative pair to its informative monotone points.
///
/// A candidate that moves either coordinate backward relative to the last
/// retained point is dropped (negative-weight bins must not bend the curve
/// back). A candidate identical to its scan predecessor is dropped as well;
/// empty bins add exactly 0.0, so exact float equality is the right test.
fn filtered_points(cum_sig: &[f64], cum_bkg: &[f64]) -> Vec<(f64, f64)> {
    let mut retained: Vec<(f64, f64)> = Vec::new();
    for i in 1..cum_sig.len() {
        if let Some(&(last_s, last_b)) = retained.last()
            && (cum_sig[i] < last_s || cum_bkg[i] < last_b)
        {
            continue;
        }
        if cum_sig[i] != cum_sig[i - 1] || cum_bkg[i] != cum_bkg[i - 1] {
            retained.push((cum_sig[i], cum_bkg[i]));
        }
    }
    retained
}

fn error_bands(
    points: &[(f64, f64)],
    total_signal: f64,
    total_background: f64,
) -> Result<RocErrorBands> {
    let n = points.len();
    let mut bands = RocErrorBands {
        signal_lo: Vec::with_capacity(n),
        signal_hi: Vec::with_capacity(n),
        background_lo: Vec::with_capacity(n),
        background_hi: Vec::with_capacity(n),
    };
    for &(s, b) in points {
        let (s_lo, s_hi) = clopper_pearson(s, total_signal, ONE_SIGMA)?;
        let (b_lo, b_hi) = clopper_pearson(b, total_background, ONE_SIGMA)?;
        bands.signal_lo.push(s / total_signal - s_lo);
        bands.signal_hi.push(s_hi - s / total_signal);
        bands.background_lo.push(b / total_background - b_lo);
        bands.background_hi.push(b_hi - b / total_background);
    }
    Ok(bands)
}

/// Build a ROC curve artifact from signal and background distributions.
///
/// Both slices must share one binning: nominal bins plus underflow and
/// overflow at the ends. Weights may include negative MC contributions;
/// locally non-monotone cumulative stretches are filtered out rather than
/// reported as errors.
///
/// The scan accumulates from the end where signal is scarcer (decided by
/// comparing index-weighted means), drops repeated and backward-moving
/// points, removes the trivial all-pass corner, and normalises by the total
/// weights. An empty result is valid: it means no threshold separated the
/// two distributions.
///
/// Fails with [`Error::EmptyInput`] when either total weight is exactly
/// zero, since efficiencies cannot be normalised then.
pub fn roc_artifact(
    signal: &[f64],
    background: &[f64],
    with_errors: bool,
) -> Result<RocCurveArtifact> {
    if signal.len() != background.len() {
        return Err(Error::Validation(format!(
            "signal has {} bins but background has {}; binnings must match",
            signal.len(),
            background.len()
        )));
    }

    // Accumulate from the end that selects the least signal first.
    let reversed = index_mean(signal) > index_mean(background);
    let (cum_sig, cum_bkg) = if reversed {
        let sig: Vec<f64> = signal.iter().rev().copied().collect();
        let bkg: Vec<f64> = background.iter().rev().copied().collect();
        (cumulative(&sig), cumulative(&bkg))
    } else {
        (cumulative(signal), cumulative(background))
    };

    // Normalise by the final cumulative values, not by separate sums over
    // the input order: float addition is order-sensitive, and a total folded
    // the other way round can sit an ulp below a retained cumulative value,
    // pushing its efficiency past 1.
    let total_signal = cum_sig.last().copied().unwrap_or(0.0);
    let total_background = cum_bkg.last().copied().unwrap_or(0.0);
    if total_signal == 0.0 || total_background == 0.0 {
        return Err(Error::EmptyInput {
            total_signal,
            total_background,
        });
    }

    let mut points = filtered_points(&cum_sig, &cum_bkg);

    // The last retained pair is the trivial all-pass corner.
    points.pop();

    // Exactly two survivors are one operating point measured twice; keep the
    // first.
    if points.len() == 2 {
        points.truncate(1);
    }

    let eff_signal: Vec<f64> = points.iter().map(|p| p.0 / total_signal).collect();
    let eff_background: Vec<f64> = points.iter().map(|p| p.1 / total_background).collect();

    let errors = if with_errors {
        Some(error_bands(&points, total_signal, total_background)?)
    } else {
        None
    };

    Ok(RocCurveArtifact {
        schema_version: "taueval_roc_v0".to_string(),
        eff_signal,
        eff_background,
        errors,
        total_signal,
        total_background,
        reversed,
    })
}
