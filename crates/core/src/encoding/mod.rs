//! OHLC encoding pipeline.
//!
//! Turns one day's open/high/low/close quartet into an embedding comparable
//! with the stored matrix:
//!
//! 1. [`features`]: feature-name dispatch to a raw vector;
//! 2. [`scaler`]: the fitted standard scaler;
//! 3. `arctan(x) + π/2` squashing and L2 normalization;
//! 4. [`circuit`]: the fixed state-vector feature map, one `⟨Z⟩` per qubit.

/// State-vector simulation of the fixed feature-map circuit.
pub mod circuit;
/// End-to-end encoder combining every pipeline stage.
pub mod encoder;
/// Feature-name dispatch from OHLC prices to raw feature values.
pub mod features;
/// Fitted standard scaler loaded from the scaler artifact.
pub mod scaler;

pub use circuit::FeatureMap;
pub use encoder::Encoder;
pub use features::{FeatureKind, Ohlc};
pub use scaler::StandardScaler;
