//! Storage layer: artifact files and the in-memory pattern index.
//!
//! Two JSON artifacts are read once at startup: the fitted scaler and the
//! feature bundle (embedding matrix, feature names, qubit count, historical
//! table). They are validated against each other and frozen into a
//! [`PatternIndex`] that is never mutated afterwards.

/// Artifact file formats and loaders.
pub mod artifacts;
/// Immutable pattern index with the search operations.
pub mod index;

pub use artifacts::{load_bundle, load_scaler, FeatureBundle};
pub use index::PatternIndex;
