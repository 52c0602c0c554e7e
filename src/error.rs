//! Error types returned by the filtering engine and its helpers.

use thiserror::Error;

/// Errors raised while constructing or running a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Both the numerator and the denominator coefficient sequences are empty.
    #[error("invalid coefficients: `b` and `a` are both empty")]
    InvalidCoefficients,
    /// The signal is too short for the boundary extension of this filter.
    #[error("signal of length {len} is too short, at least {required} samples are required")]
    InsufficientSignalLength {
        /// Length of the offending signal.
        len: usize,
        /// Minimum length accepted by the filter, `3 * ntaps + 1`.
        required: usize,
    },
    /// Gyroscope and accelerometer streams do not pair up sample by sample.
    #[error(
        "sample count mismatch: {gyroscope} gyroscope samples, {accelerometer} accelerometer samples"
    )]
    SampleCountMismatch {
        /// Number of gyroscope samples.
        gyroscope: usize,
        /// Number of accelerometer samples.
        accelerometer: usize,
    },
}

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
