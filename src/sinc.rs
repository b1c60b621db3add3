//! The sinc process loop (§4.5): drives the ring buffer and kernel to emit
//! one output frame at a time, interpolating the ratio across the block and
//! handling end-of-input drain.

use crate::coeffs::CoeffTable;
use crate::data::SrcData;
use crate::engine::{interpolate_ratio, Engine};
use crate::error::SrcResult;
use crate::fixed::{fmod_one, round_half_away_from_zero, FP_ONE};
use crate::kernels::{calc_output, KernelArgs};
use crate::ring::RingBuffer;

const MIN_RATIO: f64 = 1.0 / 256.0;
const MAX_RATIO: f64 = 256.0;

#[derive(Clone)]
pub struct SincEngine {
    table: &'static CoeffTable,
    channels: usize,
    ring: RingBuffer,
}

fn oversampling(table: &CoeffTable) -> f64 {
    (table.index_inc / FP_ONE) as f64
}

/// `half_filter_chan_len` of §4.3/§4.5, already scaled by `channels`.
fn half_filter_chan_len(table: &CoeffTable, channels: usize, ratio: f64) -> usize {
    let eff = ratio.min(1.0).max(MIN_RATIO);
    let taps = (table.coeff_half_len + 2) as f64;
    let frames = (taps / oversampling(table) / eff).ceil() as usize + 1;
    frames * channels
}

fn initial_b_len(table: &CoeffTable, channels: usize) -> usize {
    let worst_case = half_filter_chan_len(table, channels, MIN_RATIO) / channels;
    let frames = (3 * worst_case + 1).max(4096);
    frames * channels
}

impl SincEngine {
    pub fn new(table: &'static CoeffTable, channels: usize) -> Self {
        let b_len = initial_b_len(table, channels);
        SincEngine {
            table,
            channels,
            ring: RingBuffer::new(channels, b_len),
        }
    }

    fn kernel_args(&self, ratio: f64, input_position: f64) -> KernelArgs {
        let float_increment = self.table.index_inc as f64 * ratio.min(1.0);
        let increment = round_half_away_from_zero(float_increment).max(1);
        let start_filter_index = round_half_away_from_zero(input_position * float_increment);
        let scale = float_increment / self.table.index_inc as f64;
        KernelArgs {
            increment,
            start_filter_index,
            scale,
            coeff_half_len: self.table.coeff_half_len,
        }
    }
}

impl Engine for SincEngine {
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

        let sizing_ratio = last_ratio.min(data.src_ratio).clamp(MIN_RATIO, MAX_RATIO);
        let half_len = half_filter_chan_len(self.table, self.channels, sizing_ratio);

        self.ring.b_current += self.channels * input_position.floor() as usize;
        input_position = fmod_one(input_position);

        while data.output_frames_gen < requested {
            if self.ring.available() <= half_len {
                self.ring.prepare_data(
                    data.data_in,
                    data.input_frames - data.input_frames_used,
                    &mut data.input_frames_used,
                    data.end_of_input,
                    half_len,
                )?;
                if self.ring.available() <= half_len && self.ring.b_real_end.is_none() {
                    break;
                }
            }

            if let Some(real_end) = self.ring.b_real_end {
                let frontier = self.ring.b_current as f64 + input_position + 1.0 / ratio;
                if frontier >= real_end as f64 {
                    break;
                }
            }

            ratio = interpolate_ratio(*last_ratio, data.src_ratio, data.output_frames_gen, requested);

            let args = self.kernel_args(ratio, input_position);
            let out_offset = data.output_frames_gen * self.channels;
            calc_output(
                &self.ring,
                &self.table.taps,
                self.channels,
                &args,
                &mut data.data_out[out_offset..out_offset + self.channels],
            );
            data.output_frames_gen += 1;

            input_position += 1.0 / ratio;
            self.ring.b_current += self.channels * input_position.floor() as usize;
            input_position = fmod_one(input_position);
        }

        *last_position = input_position;
        *last_ratio = ratio;
        Ok(())
    }

    fn reset(&mut self) {
        self.ring.reset();
    }

    fn close(&mut self) {
        self.ring.reset();
    }
}
