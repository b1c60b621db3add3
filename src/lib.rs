//! Bandlimited sample-rate conversion for interleaved 32-bit float audio.
//!
//! Five engines cover a quality/speed tradeoff: three windowed-sinc tiers
//! (`SincBestQuality`, `SincMediumQuality`, `SincFastest`), plus a
//! zero-order-hold and a linear-interpolation engine for cases that don't
//! need bandlimiting. All five accept ratios in `1/256 ..= 256` and can vary
//! the ratio block-to-block for streaming use.
//!
//! [`Converter`] is the type most callers want: construct one for a
//! [`ConverterType`] and channel count, then feed it [`SrcData`] descriptors
//! across repeated [`Converter::process`] calls. [`CallbackConverter`] wraps
//! the same machinery behind a pull interface for callers that would rather
//! hand over an input callback than manage buffers themselves.

mod callback;
mod coeffs;
mod converter;
mod data;
mod engine;
mod error;
mod fixed;
mod format;
mod kernels;
mod linear;
mod ring;
mod sinc;
mod zoh;

pub use callback::{CallbackConverter, InputCallback};
pub use converter::Converter;
pub use data::SrcData;
pub use engine::ConverterType;
pub use error::{SrcError, SrcResult};
pub use format::{f32_to_i16, f32_to_i32, i16_to_f32, i32_to_f32};

/// Logging macros that compile to nothing unless the `log` feature is
/// enabled, so instrumenting the engines doesn't cost anything in the
/// default build.
#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(not(feature = "log"))]
macro_rules! log_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "log"))]
pub(crate) use log_noop as debug;
#[cfg(not(feature = "log"))]
pub(crate) use log_noop as error;
#[cfg(not(feature = "log"))]
pub(crate) use log_noop as info;
#[cfg(not(feature = "log"))]
pub(crate) use log_noop as trace;
#[cfg(not(feature = "log"))]
pub(crate) use log_noop as warn;
