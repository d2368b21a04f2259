//! Error types for the pitch detection pipeline.

use std::fmt;

/// Errors surfaced by constructors, configuration setters and analysis calls.
///
/// Signal conditions (silence, no key maxima, sub-threshold volume) are not
/// errors; [`find_pitch`](crate::PitchDetector::find_pitch) reports them by
/// returning `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A detector or autocorrelator was constructed with an input length of zero.
    InvalidLength,

    /// A borrowed buffer did not match the configured input length.
    WrongLength {
        /// The input length the instance was constructed with.
        expected: usize,
        /// The length of the buffer that was passed in.
        got: usize,
    },

    /// A configuration setter was called with an out-of-range value.
    /// The instance keeps its previous configuration.
    InvalidConfig {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength => write!(f, "input length must be at least 1"),
            Error::WrongLength { expected, got } => {
                write!(f, "wrong buffer length: expected {}, got {}", expected, got)
            }
            Error::InvalidConfig { parameter, reason } => {
                write!(f, "invalid {}: {}", parameter, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
