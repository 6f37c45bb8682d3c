//! Decay-mode migration matrix artifact.
//!
//! Tau reconstruction assigns each candidate a decay-mode category; the
//! migration matrix shows how generated categories end up reconstructed,
//! column-normalised to conditional probabilities P(reco | gen). The reco
//! axis carries a leading "None" category for generated taus that fail
//! reconstruction, so it is one row taller than the gen axis.
//!
//! This module computes the numeric artifact; rendering is handled
//! downstream.

use serde::{Deserialize, Serialize};
use te_core::{Error, Result};

// ---------------------------------------------------------------------------
// Decay-mode categories
// ---------------------------------------------------------------------------

/// Tau decay-mode categories used on migration plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecayMode {
    /// No reconstructed tau (failed the kinematic or code validity cuts).
    /// Drawn as "None"; cannot occur on the gen axis.
    Undefined,
    /// Any decay mode outside the standard hadronic categories.
    Other,
    /// Single charged pion, no neutrals.
    OneProng,
    /// Single charged pion plus pi-zeros.
    OneProngPiZeros,
    /// Three charged pions.
    ThreeProng,
    /// Three charged pions plus pi-zeros.
    ThreeProngPiZeros,
}

impl DecayMode {
    /// Reco-axis categories, "None" first.
    pub const RECO_AXIS: [DecayMode; 6] = [
        DecayMode::Undefined,
        DecayMode::Other,
        DecayMode::OneProng,
        DecayMode::OneProngPiZeros,
        DecayMode::ThreeProng,
        DecayMode::ThreeProngPiZeros,
    ];

    /// Gen-axis categories.
    pub const GEN_AXIS: [DecayMode; 5] = [
        DecayMode::Other,
        DecayMode::OneProng,
        DecayMode::OneProngPiZeros,
        DecayMode::ThreeProng,
        DecayMode::ThreeProngPiZeros,
    ];

    /// Classify a reconstructed tau from its decay-mode code and pT in GeV.
    ///
    /// Reconstruction only counts above 20 GeV and for codes in `[0, 200)`;
    /// everything else, a NaN pT included, is [`DecayMode::Undefined`].
    pub fn from_reco(code: i32, pt: f64) -> Self {
        if pt.is_nan() || pt <= 20.0 || !(0..200).contains(&code) {
            return DecayMode::Undefined;
        }
        Self::from_code(code)
    }

    /// Classify a generated tau from its decay-mode code.
    pub fn from_gen(code: i32) -> Self {
        Self::from_code(code)
    }

    fn from_code(code: i32) -> Self {
        match code {
            0 => DecayMode::OneProng,
            1 | 2 => DecayMode::OneProngPiZeros,
            10 => DecayMode::ThreeProng,
            11 => DecayMode::ThreeProngPiZeros,
            _ => DecayMode::Other,
        }
    }

    /// Axis label in ROOT TLatex notation, as drawn on migration plots.
    pub fn label(self) -> &'static str {
        match self {
            DecayMode::Undefined => "None",
            DecayMode::Other => "Other",
            DecayMode::OneProng => "#pi",
            DecayMode::OneProngPiZeros => "#pi#pi^{0}s",
            DecayMode::ThreeProng => "#pi#pi#pi",
            DecayMode::ThreeProngPiZeros => "#pi#pi#pi#pi^{0}s",
        }
    }

    fn reco_index(self) -> usize {
        Self::RECO_AXIS.iter().position(|m| *m == self).unwrap_or(0)
    }

    fn gen_index(self) -> Option<usize> {
        Self::GEN_AXIS.iter().position(|m| *m == self)
    }
}

/// Default gen-axis labels, matching [`DecayMode::GEN_AXIS`].
pub fn default_gen_labels() -> Vec<String> {
    DecayMode::GEN_AXIS.iter().map(|m| m.label().to_string()).collect()
}

/// Default reco-axis labels, matching [`DecayMode::RECO_AXIS`].
pub fn default_reco_labels() -> Vec<String> {
    DecayMode::RECO_AXIS.iter().map(|m| m.label().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Migration matrix artifact
// ---------------------------------------------------------------------------

/// Plot-friendly artifact for a decay-mode migration matrix.
///
/// The matrix element `matrix[i][j]` gives the probability (or event count)
/// of gen category `j` being reconstructed in reco category `i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmMigrationArtifact {
    pub schema_version: String,
    /// Gen-axis (column) labels.
    pub gen_labels: Vec<String>,
    /// Reco-axis (row) labels.
    pub reco_labels: Vec<String>,
    /// Matrix in row-major order: `matrix[reco_idx][gen_idx]`. Values are
    /// conditional probabilities P(reco | gen) if normalised, raw event
    /// counts otherwise.
    pub matrix: Vec<Vec<f64>>,
    /// Whether columns were normalised to conditional probabilities.
    pub normalised: bool,
    /// Per-gen-category fraction reconstructed in the matching reco
    /// category. Zero for columns with no weight.
    pub diagonal_fraction: Vec<f64>,
}

impl DmMigrationArtifact {
    /// Build a migration artifact from a raw count matrix.
    ///
    /// `counts` is `[reco_idx][gen_idx]` and must match the label lengths.
    /// With `normalise` set, each column is divided by its sum; a column
    /// with zero total weight is left untouched. Extra reco rows (like the
    /// leading "None") are assumed to sit before the shared categories when
    /// pairing rows and columns for `diagonal_fraction`.
    pub fn new(
        counts: Vec<Vec<f64>>,
        gen_labels: Vec<String>,
        reco_labels: Vec<String>,
        normalise: bool,
    ) -> Result<Self> {
        let n_gen = gen_labels.len();
        let n_reco = reco_labels.len();

        if n_gen == 0 || n_reco == 0 {
            return Err(Error::Validation("axis labels must be non-empty".into()));
        }
        if counts.len() != n_reco {
            return Err(Error::Validation(format!(
                "matrix row count {} != n_reco {}",
                counts.len(),
                n_reco
            )));
        }
        for (i, row) in counts.iter().enumerate() {
            if row.len() != n_gen {
                return Err(Error::Validation(format!(
                    "matrix row {} length {} != n_gen {}",
                    i,
                    row.len(),
                    n_gen
                )));
            }
        }

        // Column sums for normalisation and diagonal fractions.
        let mut col_sums = vec![0.0_f64; n_gen];
        for row in &counts {
            for (j, &v) in row.iter().enumerate() {
                col_sums[j] += v;
            }
        }

        let out_matrix = if normalise {
            counts
                .iter()
                .map(|row| {
                    row.iter()
                        .enumerate()
                        .map(|(j, &v)| if col_sums[j] != 0.0 { v / col_sums[j] } else { v })
                        .collect()
                })
                .collect()
        } else {
            counts.clone()
        };

        // Gen category j pairs with reco row j + offset, skipping the extra
        // leading reco rows.
        let offset = n_reco.saturating_sub(n_gen);
        let diagonal_fraction: Vec<f64> = (0..n_gen)
            .map(|j| {
                let r = j + offset;
                if col_sums[j] != 0.0 && r < n_reco { counts[r][j] / col_sums[j] } else { 0.0 }
            })
            .collect();

        Ok(Self {
            schema_version: "taueval_dm_migration_v0".to_string(),
            gen_labels,
            reco_labels,
            matrix: out_matrix,
            normalised: normalise,
            diagonal_fraction,
        })
    }

    /// Build a migration artifact by accumulating `(gen, reco)` category
    /// pairs with unit weight on the default axes.
    ///
    /// Pairs with an [`DecayMode::Undefined`] gen category fall outside the
    /// gen axis and are dropped.
    pub fn from_pairs(pairs: &[(DecayMode, DecayMode)], normalise: bool) -> Result<Self> {
        let n_gen = DecayMode::GEN_AXIS.len();
        let n_reco = DecayMode::RECO_AXIS.len();
        let mut counts = vec![vec![0.0_f64; n_gen]; n_reco];

        for &(gen_mode, reco_mode) in pairs {
            if let Some(j) = gen_mode.gen_index() {
                counts[reco_mode.reco_index()][j] += 1.0;
            }
        }

        Self::new(counts, default_gen_labels(), default_reco_labels(), normalise)
    }
}
