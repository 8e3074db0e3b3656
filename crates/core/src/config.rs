//! Global configuration constants for qstock.
//!
//! Search limits, encoder circuit parameters, and server defaults are defined
//! here. Runtime configuration is handled via CLI arguments and environment
//! variables in the server's `main.rs`.

/// Number of entangling layers applied after the angle embedding.
pub const ENTANGLER_LAYERS: usize = 2;

/// RX angle used for every wire of every entangling layer.
///
/// The embedding matrix was built with all entangler weights fixed to one.
pub const ENTANGLER_WEIGHT: f64 = 1.0;

/// Multiplier applied to each input value for the per-wire readout RY rotation.
pub const READOUT_ROTATION_SCALE: f64 = 0.1;

/// Maximum supported qubit count.
///
/// The feature map holds `2^n` complex amplitudes, so 20 qubits is 16 MiB
/// per encoded query.
pub const MAX_QUBITS: usize = 20;

/// Feature-name prefix for zero-filled padding columns.
pub const PADDING_PREFIX: &str = "padding_";

/// Name of the date column in the historical table.
pub const DATE_COLUMN: &str = "Date";

/// Default number of results for pattern and date search.
pub const DEFAULT_TOP_K: usize = 5;

/// Default number of results for the volatility ranking.
pub const DEFAULT_VOLATILITY_TOP_K: usize = 10;

/// Maximum number of results (`top_k`) per search request.
pub const MAX_TOP_K: usize = 10_000;

/// Default path of the fitted scaler artifact.
pub const DEFAULT_SCALER_PATH: &str = "quantum_stock_scaler.json";

/// Default path of the embedding bundle artifact.
pub const DEFAULT_FEATURES_PATH: &str = "quantum_stock_features.json";

/// Default directory holding the bundled front-end.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default HTTP bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 512;
