//! Core types shared across the taueval workspace.
//!
//! Hosts the common error type and crate-wide constants. Everything else
//! (probability helpers, plot artifacts, the CLI) builds on top of this.

pub mod error;

pub use error::{Error, Result};

/// Workspace version, embedded in CLI output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
