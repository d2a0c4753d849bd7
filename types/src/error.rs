//! Error types for malformed consensus encodings.

use thiserror::Error;

/// A compact target word that cannot name a valid work threshold.
///
/// Never corrected silently: a block claiming a malformed threshold is
/// rejected outright by proof-of-work validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedCompact {
    #[error("compact target has the sign bit set")]
    Negative,

    #[error("compact target overflows 256 bits")]
    Overflow,

    #[error("compact target has a zero mantissa")]
    ZeroMantissa,
}
