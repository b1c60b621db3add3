//! Per-channel convolution kernels (§4.4): compute one output frame by
//! walking outward from `b_current` through two filter halves.
//!
//! Dedicated entry points exist for the channel counts the original design
//! special-cased (mono/stereo/quad/hex) so a caller can name the arity it
//! wants in a hot loop; all of them share [`calc_output_generic`], since the
//! only difference between them is the trip count of the inner per-channel
//! loop, not the algorithm.

use crate::coeffs::coeff_at;
use crate::fixed::to_fp_i;
use crate::ring::RingBuffer;

/// Parameters shared by every invocation of the kernel for a single output
/// frame.
pub struct KernelArgs {
    pub increment: i32,
    pub start_filter_index: i32,
    pub scale: f64,
    pub coeff_half_len: i32,
}

/// Compute one output frame into `out[..channels]`, reading around
/// `ring.b_current`.
pub fn calc_output_generic(
    ring: &RingBuffer,
    taps: &[f32],
    channels: usize,
    args: &KernelArgs,
    out: &mut [f32],
) {
    debug_assert_eq!(out.len(), channels);
    for slot in out.iter_mut() {
        *slot = 0.0;
    }

    let max_filter_index = to_fp_i(args.coeff_half_len);
    let b_current = ring.b_current as i64;

    // Left half: older samples, walking forward toward b_current.
    {
        let coeff_count = (max_filter_index - args.start_filter_index) / args.increment;
        let mut filter_index = args.start_filter_index + coeff_count * args.increment;
        let mut data_index = b_current - channels as i64 * coeff_count as i64;
        if data_index < 0 {
            let steps = ((-data_index) as usize).div_ceil(channels) as i64;
            data_index += steps * channels as i64;
            filter_index -= (steps * args.increment as i64) as i32;
        }
        while filter_index >= 0 {
            let coeff = coeff_at(taps, filter_index);
            for (ch, slot) in out.iter_mut().enumerate() {
                let idx = (data_index as usize) + ch;
                *slot += (coeff * ring.sample(idx) as f64) as f32;
            }
            filter_index -= args.increment;
            data_index += channels as i64;
        }
    }

    // Right half: newer samples, walking backward away from b_current.
    {
        let coeff_count = (max_filter_index - args.start_filter_index) / args.increment;
        let mut filter_index = args.increment - args.start_filter_index;
        let mut data_index = b_current + channels as i64 * (1 + coeff_count as i64);
        while filter_index > 0 {
            let coeff = coeff_at(taps, filter_index);
            for (ch, slot) in out.iter_mut().enumerate() {
                let idx = (data_index as usize) + ch;
                *slot += (coeff * ring.sample(idx) as f64) as f32;
            }
            filter_index -= args.increment;
            data_index -= channels as i64;
        }
    }

    for slot in out.iter_mut() {
        *slot = (*slot as f64 * args.scale) as f32;
    }
}

#[inline]
pub fn calc_output_mono(ring: &RingBuffer, taps: &[f32], args: &KernelArgs, out: &mut [f32; 1]) {
    calc_output_generic(ring, taps, 1, args, out);
}

#[inline]
pub fn calc_output_stereo(ring: &RingBuffer, taps: &[f32], args: &KernelArgs, out: &mut [f32; 2]) {
    calc_output_generic(ring, taps, 2, args, out);
}

#[inline]
pub fn calc_output_quad(ring: &RingBuffer, taps: &[f32], args: &KernelArgs, out: &mut [f32; 4]) {
    calc_output_generic(ring, taps, 4, args, out);
}

#[inline]
pub fn calc_output_hex(ring: &RingBuffer, taps: &[f32], args: &KernelArgs, out: &mut [f32; 6]) {
    calc_output_generic(ring, taps, 6, args, out);
}

/// Dispatch to the dedicated kernel for common channel counts, falling back
/// to the generic multi-channel loop otherwise. `out` must have length
/// `channels`.
pub fn calc_output(
    ring: &RingBuffer,
    taps: &[f32],
    channels: usize,
    args: &KernelArgs,
    out: &mut [f32],
) {
    match channels {
        1 => {
            let mut tmp = [0.0f32; 1];
            calc_output_mono(ring, taps, args, &mut tmp);
            out.copy_from_slice(&tmp);
        }
        2 => {
            let mut tmp = [0.0f32; 2];
            calc_output_stereo(ring, taps, args, &mut tmp);
            out.copy_from_slice(&tmp);
        }
        4 => {
            let mut tmp = [0.0f32; 4];
            calc_output_quad(ring, taps, args, &mut tmp);
            out.copy_from_slice(&tmp);
        }
        6 => {
            let mut tmp = [0.0f32; 6];
            calc_output_hex(ring, taps, args, &mut tmp);
            out.copy_from_slice(&tmp);
        }
        n => calc_output_generic(ring, taps, n, args, out),
    }
}
