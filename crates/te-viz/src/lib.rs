//! # te-viz
//!
//! Plot artifacts for tau classifier evaluation.
//!
//! This crate reduces binned evaluation inputs into plot-ready JSON
//! structures (flat arrays instead of nested objects) and stays
//! deliberately dependency-light. Rendering is a downstream concern;
//! every artifact carries a `schema_version` so consumers can evolve
//! independently.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// ROC curve artifacts (efficiency scans with optional error bands).
pub mod roc;

/// Decay-mode migration matrix artifacts.
pub mod migration;

pub use migration::{DecayMode, DmMigrationArtifact};
pub use roc::{RocCurveArtifact, RocErrorBands, roc_artifact};
