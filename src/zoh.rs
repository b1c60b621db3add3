//! Zero-order-hold engine (§4.6): emits the most recently consumed input
//! frame until the fractional cursor advances past it. No ring buffer is
//! needed — this engine only ever looks one frame behind `last_value`.

use crate::data::SrcData;
use crate::engine::{interpolate_ratio, Engine};
use crate::error::SrcResult;
use crate::fixed::fmod_one;

#[derive(Clone)]
pub struct ZohEngine {
    channels: usize,
    last_value: Vec<f32>,
    dirty: bool,
}

impl ZohEngine {
    pub fn new(channels: usize) -> Self {
        ZohEngine {
            channels,
            last_value: vec![0.0; channels],
            dirty: false,
        }
    }
}

impl Engine for ZohEngine {
    fn channels(&self) -> usize {
        self.channels
    }

    fn process(
        &mut self,
        last_ratio: &mut f64,
        last_position: &mut f64,
        data: &mut SrcData,
    ) -> SrcResult<()> {
        let requested = data.output_frames;
        let mut input_position = *last_position;
        let mut ratio = *last_ratio;

        if !self.dirty && data.input_frames > 0 {
            self.last_value
                .copy_from_slice(&data.data_in[..self.channels]);
            self.dirty = true;
        }

        while data.output_frames_gen < requested {
            ratio = interpolate_ratio(*last_ratio, data.src_ratio, data.output_frames_gen, requested);

            let new_position = input_position + 1.0 / ratio;
            let step = new_position.floor() as usize;
            if step > 0 && data.input_frames_used + step > data.input_frames {
                // Not enough input available yet to advance past the held
                // frame; wait for the caller's next chunk.
                break;
            }

            let out_offset = data.output_frames_gen * self.channels;
            data.data_out[out_offset..out_offset + self.channels].copy_from_slice(&self.last_value);
            data.output_frames_gen += 1;

            if step > 0 {
                data.input_frames_used += step;
                let in_offset = (data.input_frames_used - 1) * self.channels;
                self.last_value
                    .copy_from_slice(&data.data_in[in_offset..in_offset + self.channels]);
            }
            input_position = fmod_one(new_position);
        }

        *last_position = input_position;
        *last_ratio = ratio;
        Ok(())
    }

    fn reset(&mut self) {
        self.dirty = false;
        for v in self.last_value.iter_mut() {
            *v = 0.0;
        }
    }

    fn close(&mut self) {
        self.reset();
    }
}
