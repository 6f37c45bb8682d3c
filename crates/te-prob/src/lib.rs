//! Probability building blocks for taueval.
//!
//! Small, pure statistical functions that the artifact builders share,
//! kept separate so they can be reused and tested in isolation:
//!
//! - exact binomial (Clopper-Pearson) confidence intervals for
//!   efficiencies, including the weighted-count generalisation

pub mod interval;

pub use interval::clopper_pearson;
