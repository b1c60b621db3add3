//! The polymorphic dispatcher (§4.7): a capability table mapped onto a trait
//! object so `Converter` can hold any of the five engines behind one
//! `Box<dyn Engine>` and `clone`/`reset`/`close` it without matching on the
//! concrete type.

use crate::data::SrcData;
use crate::error::{SrcError, SrcResult};
use dyn_clone::DynClone;

/// Stable integer identifiers for the five converter engines (§6).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConverterType {
    SincBestQuality = 0,
    SincMediumQuality = 1,
    SincFastest = 2,
    ZeroOrderHold = 3,
    Linear = 4,
}

impl ConverterType {
    pub fn from_id(id: i32) -> SrcResult<Self> {
        match id {
            0 => Ok(ConverterType::SincBestQuality),
            1 => Ok(ConverterType::SincMediumQuality),
            2 => Ok(ConverterType::SincFastest),
            3 => Ok(ConverterType::ZeroOrderHold),
            4 => Ok(ConverterType::Linear),
            _ => Err(SrcError::BadConverter),
        }
    }

    pub fn is_sinc(self) -> bool {
        matches!(
            self,
            ConverterType::SincBestQuality
                | ConverterType::SincMediumQuality
                | ConverterType::SincFastest
        )
    }
}

/// The shared contract every engine variant implements: `process`,
/// `reset`, `clone` (via [`DynClone`]) and `close`.
///
/// `process` is called for both the constant- and variable-ratio case; per
/// §4.7 the distinction lives in the caller (`Converter::process`, which
/// decides whether `last_ratio` and `data.src_ratio` are close enough to
/// skip ratio interpolation), not in the engine, so sinc, ZOH and linear
/// engines each expose a single `process` entry point.
pub trait Engine: DynClone + Send {
    fn channels(&self) -> usize;

    /// Advance `last_ratio`/`last_position` (the portion of converter state
    /// that §3 keeps outside the engine body) while filling `data.data_out`.
    fn process(
        &mut self,
        last_ratio: &mut f64,
        last_position: &mut f64,
        data: &mut SrcData,
    ) -> SrcResult<()>;

    /// Clear engine-owned buffers so the next call starts a fresh stream.
    fn reset(&mut self);

    /// Release engine-owned memory. Most engines have nothing beyond normal
    /// `Drop` to do; the sinc engine additionally truncates its ring buffer
    /// so a `Converter` that keeps the (now unusable) box around doesn't
    /// hold onto megabytes of buffer for no reason.
    fn close(&mut self);
}

dyn_clone::clone_trait_object!(Engine);

/// Build the engine variant for `kind`, failing with `BadChannelCount` or
/// `BadConverter` per §4.7.
pub fn create_engine(kind: ConverterType, channels: usize) -> SrcResult<Box<dyn Engine>> {
    if channels == 0 || channels > 128 {
        crate::error!("rejecting engine creation with channels={channels}");
        return Err(SrcError::BadChannelCount);
    }
    Ok(match kind {
        ConverterType::SincBestQuality => {
            Box::new(crate::sinc::SincEngine::new(&crate::coeffs::SINC_BEST, channels))
        }
        ConverterType::SincMediumQuality => {
            Box::new(crate::sinc::SincEngine::new(&crate::coeffs::SINC_MEDIUM, channels))
        }
        ConverterType::SincFastest => {
            Box::new(crate::sinc::SincEngine::new(&crate::coeffs::SINC_FASTEST, channels))
        }
        ConverterType::ZeroOrderHold => Box::new(crate::zoh::ZohEngine::new(channels)),
        ConverterType::Linear => Box::new(crate::linear::LinearEngine::new(channels)),
    })
}

/// Linearly interpolate the ratio across the current output block (§4.5c),
/// shared by the sinc, ZOH and linear process loops.
#[inline]
pub fn interpolate_ratio(last_ratio: f64, target_ratio: f64, gen: usize, requested: usize) -> f64 {
    if (last_ratio - target_ratio).abs() <= 1e-20 || requested == 0 {
        return target_ratio;
    }
    let t = gen as f64 / requested as f64;
    let ratio = last_ratio + t * (target_ratio - last_ratio);
    ratio.clamp(1.0 / 256.0, 256.0)
}
