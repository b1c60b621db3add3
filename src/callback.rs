//! The pull-style callback driver (§4.9): wraps a [`Converter`] and a
//! user-supplied input callback so a caller can just ask for N frames at a
//! time without managing its own input buffer.

use crate::converter::Converter;
use crate::data::SrcData;
use crate::engine::ConverterType;
use crate::debug;
use crate::error::{SrcError, SrcResult};

const MIN_RATIO: f64 = 1.0 / 256.0;
const MAX_RATIO: f64 = 256.0;

/// Supplies interleaved input frames on demand. An empty return marks
/// end of stream. Any `Err` is reported to [`CallbackConverter::read`]'s
/// caller as [`SrcError::BadCallback`], regardless of the underlying cause.
pub type InputCallback = Box<dyn FnMut() -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> + Send>;

/// Drives a [`Converter`] by pulling input from a callback instead of being
/// handed pre-loaded buffers. One callback invocation's worth of input is
/// held at a time; the engine's own lookahead requirements mean a callback
/// that hands back very small chunks will produce fewer output frames per
/// call than requested rather than block to accumulate more.
pub struct CallbackConverter {
    converter: Converter,
    callback: InputCallback,
    ratio: f64,
    pending: Vec<f32>,
    pending_frames: usize,
    pending_used: usize,
    input_eof: bool,
}

impl CallbackConverter {
    pub fn new(
        kind: ConverterType,
        channels: usize,
        ratio: f64,
        callback: InputCallback,
    ) -> SrcResult<Self> {
        if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
            return Err(SrcError::BadSrcRatio);
        }
        Ok(CallbackConverter {
            converter: Converter::new(kind, channels)?,
            callback,
            ratio,
            pending: Vec::new(),
            pending_frames: 0,
            pending_used: 0,
            input_eof: false,
        })
    }

    pub fn set_ratio(&mut self, ratio: f64) -> SrcResult<()> {
        self.converter.set_ratio(ratio)?;
        self.ratio = ratio;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.converter.reset();
        self.pending.clear();
        self.pending_frames = 0;
        self.pending_used = 0;
        self.input_eof = false;
    }

    /// Pull up to `frames_requested` frames into `out`, calling the
    /// installed callback whenever buffered input runs dry. Returns the
    /// number of frames actually written; zero with no error means the
    /// stream has fully drained.
    pub fn read(&mut self, frames_requested: usize, out: &mut [f32]) -> SrcResult<usize> {
        let channels = self.converter.channels();
        if out.len() < frames_requested * channels {
            return Err(SrcError::BadDataPtr);
        }

        let mut produced = 0;
        while produced < frames_requested {
            if self.pending_used >= self.pending_frames && !self.input_eof {
                let chunk = (self.callback)().map_err(|_| SrcError::BadCallback)?;
                if chunk.len() % channels != 0 {
                    return Err(SrcError::BadData);
                }
                if chunk.is_empty() {
                    debug!("input callback reported end of stream");
                    self.input_eof = true;
                } else {
                    self.pending_frames = chunk.len() / channels;
                    self.pending = chunk;
                    self.pending_used = 0;
                }
            }

            let available_in = self.pending_frames - self.pending_used;
            let remaining_out = frames_requested - produced;
            let in_offset = self.pending_used * channels;
            let out_offset = produced * channels;

            let mut data = SrcData::new(
                &self.pending[in_offset..],
                &mut out[out_offset..out_offset + remaining_out * channels],
                available_in,
                remaining_out,
                self.ratio,
                self.input_eof,
            );
            self.converter.process(&mut data)?;

            self.pending_used += data.input_frames_used;
            produced += data.output_frames_gen;

            if data.output_frames_gen == 0 {
                if self.input_eof {
                    break;
                }
                if available_in == 0 {
                    continue;
                }
                break;
            }
        }
        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_chunked_callback_to_completion() {
        let mut chunks = vec![vec![1.0f32; 8], vec![1.0f32; 8], Vec::new()].into_iter();
        let callback: InputCallback = Box::new(move || Ok(chunks.next().unwrap_or_default()));
        let mut conv = CallbackConverter::new(ConverterType::Linear, 1, 1.0, callback).unwrap();

        let mut out = vec![0.0f32; 64];
        let mut total = 0;
        loop {
            let n = conv.read(16, &mut out).unwrap();
            if n == 0 {
                break;
            }
            total += n;
            assert!(total < 1000, "callback driver failed to terminate");
        }
        assert!(total > 0);
    }

    #[test]
    fn rejects_ratio_outside_supported_range() {
        let callback: InputCallback = Box::new(|| Ok(Vec::new()));
        let err = CallbackConverter::new(ConverterType::Linear, 1, 500.0, callback).unwrap_err();
        assert_eq!(err, SrcError::BadSrcRatio);
    }
}
