//! Global constants for tint-core

/// Coordinate quantization factor for fingerprints (multiply, then truncate)
pub const FINGERPRINT_PRECISION: f64 = 1000.0;

/// Alpha applied to non-debugged faces while debug overrides are active
pub const DEBUG_ALPHA: f32 = 0.2;

/// Number of fingerprint characters used as a face label
pub const LABEL_LENGTH: usize = 6;

/// Fallback face color (orange, RGBA)
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 0.647, 0.0, 1.0];

/// Default color for debugged faces (red, RGBA)
pub const DEFAULT_DEBUG_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
