//! The streaming façade (§4.8, §4.10): `Converter` owns one engine instance
//! plus the cross-call state (`last_ratio`, `last_position`, the last error)
//! and is the type applications hold onto across repeated `process` calls.

use crate::data::SrcData;
use crate::engine::{create_engine, ConverterType, Engine};
use crate::error::{SrcError, SrcResult};
use crate::{info, trace, warn};

const MIN_RATIO: f64 = 1.0 / 256.0;
const MAX_RATIO: f64 = 256.0;

/// Whether a `Converter` may have its ratio changed mid-stream.
///
/// [`Converter::simple`] builds a one-shot converter in [`Mode::OneShot`];
/// [`set_ratio`](Converter::set_ratio) rejects anything but [`Mode::Streaming`]
/// with [`SrcError::NoVariableRatio`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Streaming,
    OneShot,
}

#[derive(Clone)]
pub struct Converter {
    engine: Box<dyn Engine>,
    converter_type: ConverterType,
    channels: usize,
    mode: Mode,
    last_ratio: f64,
    last_position: f64,
    last_error: Option<SrcError>,
}

impl Converter {
    /// Build a streaming converter for `kind` over `channels` interleaved
    /// channels (§4.7, §4.8).
    pub fn new(kind: ConverterType, channels: usize) -> SrcResult<Self> {
        info!("creating {kind:?} converter for {channels} channels");
        Ok(Converter {
            engine: create_engine(kind, channels)?,
            converter_type: kind,
            channels,
            mode: Mode::Streaming,
            // Below MIN_RATIO is never a real ratio; it marks "not yet set",
            // so the first `process` call adopts `data.src_ratio` outright
            // instead of interpolating from a default.
            last_ratio: -1.0,
            last_position: 0.0,
            last_error: None,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn converter_type(&self) -> ConverterType {
        self.converter_type
    }

    pub fn last_error(&self) -> Option<SrcError> {
        self.last_error
    }

    /// Validate and run one `process` call (§4.8): checks `src_ratio` range
    /// and slice capacity before handing off to the engine, and records
    /// whatever error the call produces (if any) for `last_error`.
    pub fn process(&mut self, data: &mut SrcData) -> SrcResult<()> {
        data.input_frames_used = 0;
        data.output_frames_gen = 0;

        if let Err(e) = self.validate(data) {
            self.last_error = Some(e);
            return Err(e);
        }

        if self.last_ratio < MIN_RATIO {
            trace!("adopting initial src_ratio {} for {:?}", data.src_ratio, self.converter_type);
            self.last_ratio = data.src_ratio;
        }

        let result = self
            .engine
            .process(&mut self.last_ratio, &mut self.last_position, data);
        if let Err(e) = result {
            warn!("process failed for {:?}: {e}", self.converter_type);
            self.last_error = Some(e);
        }
        result
    }

    fn validate(&self, data: &SrcData) -> SrcResult<()> {
        if !(MIN_RATIO..=MAX_RATIO).contains(&data.src_ratio) {
            return Err(SrcError::BadSrcRatio);
        }
        if data.input_frames > 0 && data.data_in.len() < data.input_frames * self.channels {
            return Err(SrcError::BadDataPtr);
        }
        if data.output_frames > 0 && data.data_out.len() < data.output_frames * self.channels {
            return Err(SrcError::BadDataPtr);
        }
        Ok(())
    }

    /// One-shot conversion (§4.10): build a fresh converter, run a single
    /// `process` call with `end_of_input` forced true, and discard the
    /// converter. Does not support a follow-up call with more input.
    pub fn simple(data: &mut SrcData, kind: ConverterType, channels: usize) -> SrcResult<()> {
        let mut converter = Converter::new(kind, channels)?;
        converter.mode = Mode::OneShot;
        data.end_of_input = true;
        converter.process(data)
    }

    /// Drop all buffered state and rewind `last_ratio`/`last_position` so the
    /// next `process` call behaves as if the converter were newly built.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_ratio = -1.0;
        self.last_position = 0.0;
        self.last_error = None;
    }

    /// Release engine-owned buffers. The converter remains valid to call
    /// `reset` on afterward, but `process` against stale buffers is
    /// undefined by the engine's own contract, so callers should treat a
    /// closed converter as spent.
    pub fn close(&mut self) {
        self.engine.close();
    }

    /// Jump `last_ratio` straight to `ratio` (§4.10), skipping the usual
    /// per-block interpolation on the very next `process` call. Only valid
    /// on a streaming converter.
    pub fn set_ratio(&mut self, ratio: f64) -> SrcResult<()> {
        if self.mode != Mode::Streaming {
            return Err(SrcError::NoVariableRatio);
        }
        if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
            return Err(SrcError::BadSrcRatio);
        }
        self.last_ratio = ratio;
        Ok(())
    }
}
