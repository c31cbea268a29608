//! Session-oriented preview API.

/// Scene list cursor with playability checks.
pub mod navigator;
/// Session options.
pub mod opts;
/// The preview session.
pub mod preview;
