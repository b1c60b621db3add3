//! Stable error taxonomy shared by every engine and driver in this crate.

use thiserror::Error;

/// Every fallible operation in this crate returns one of these codes.
///
/// Variants are stable: a caller may match on a specific variant and expect
/// its meaning not to change across versions.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SrcError {
    #[error("converter state is invalid or has been closed")]
    BadState,
    #[error("request descriptor is malformed")]
    BadData,
    #[error("input or output slice is missing where frames were requested")]
    BadDataPtr,
    #[error("src_ratio is outside the supported range of 1/256 ..= 256")]
    BadSrcRatio,
    #[error("unknown converter type identifier")]
    BadConverter,
    #[error("channel count must be between 1 and 128")]
    BadChannelCount,
    #[error("internal engine function pointer table is incomplete")]
    BadProcPtr,
    #[error("input and output slices alias one another")]
    DataOverlap,
    #[error("user callback returned an error")]
    BadCallback,
    #[error("operation is not valid for the converter's current mode")]
    BadMode,
    #[error("no callback has been installed")]
    NullCallback,
    #[error("this converter was not constructed to accept a varying ratio")]
    NoVariableRatio,
    #[error("ring buffer copy length would overflow the buffer")]
    SincPrepareDataBadLen,
    #[error("internal invariant violated (this is a bug)")]
    BadInternalState,
    #[error("allocation failed")]
    MallocFailed,
}

/// Convenience alias used throughout the crate.
pub type SrcResult<T> = Result<T, SrcError>;
