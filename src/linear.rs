//! Two-point linear interpolation engine (§4.6): interpolates between the
//! last fully-consumed input frame and the next one, with the fractional
//! cursor as the interpolation weight.

use crate::data::SrcData;
use crate::engine::{interpolate_ratio, Engine};
use crate::error::SrcResult;
use crate::fixed::fmod_one;

#[derive(Clone)]
pub struct LinearEngine {
    channels: usize,
    last_value: Vec<f32>,
    dirty: bool,
}

impl LinearEngine {
    pub fn new(channels: usize) -> Self {
        LinearEngine {
            channels,
            last_value: vec![0.0; channels],
            dirty: false,
        }
    }
}

impl Engine for LinearEngine {
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

        // Seed `last_value` from the very first frame this engine ever
        // sees, and treat that frame as already spent: the next frame
        // (index 1) is what interpolation looks ahead to from here on.
        if !self.dirty && data.input_frames > 0 {
            self.last_value
                .copy_from_slice(&data.data_in[..self.channels]);
            self.dirty = true;
            data.input_frames_used = 1;
        }

        while data.output_frames_gen < requested {
            let have_next = data.input_frames_used < data.input_frames;

            ratio = interpolate_ratio(*last_ratio, data.src_ratio, data.output_frames_gen, requested);
            let new_position = input_position + 1.0 / ratio;
            let step = new_position.floor() as usize;

            if !have_next && (input_position > 0.0 || step > 0) {
                // Can't interpolate toward, or advance past, a frame that
                // hasn't arrived yet.
                break;
            }
            if have_next && step > 0 && data.input_frames_used + step > data.input_frames {
                break;
            }

            let out_offset = data.output_frames_gen * self.channels;
            if have_next {
                let y1_offset = data.input_frames_used * self.channels;
                for ch in 0..self.channels {
                    let y0 = self.last_value[ch];
                    let y1 = data.data_in[y1_offset + ch];
                    data.data_out[out_offset + ch] = y0 + (y1 - y0) * input_position as f32;
                }
            } else {
                data.data_out[out_offset..out_offset + self.channels]
                    .copy_from_slice(&self.last_value);
            }
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
