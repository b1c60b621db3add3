//! Static half-FIR coefficient tables for the three sinc quality tiers.
//!
//! Each table stores one side of a symmetric, windowed-sinc lowpass filter,
//! oversampled so that [`crate::kernels`] can recover an accurate value at
//! any fractional tap position by linearly interpolating between two
//! adjacent stored entries (see [`coeff_at`]). The oversampling factor is
//! `index_inc / 4096` input samples per stored entry; `coeff_half_len` is the
//! half-width of the filter measured in stored-entry units, i.e.
//! `coeff_half_len / (index_inc / 4096)` input samples on each side of
//! center.
//!
//! Tables are computed once, on first use, from a Blackman-windowed ideal
//! lowpass rather than hand-transcribed, so there is no risk of silently
//! corrupting a large literal array; the shape (center amplitude, smooth
//! taper to ~0 at the tail, spacing) is what callers of the sinc engine
//! actually depend on, not bit-exact coefficient values.

use crate::fixed::to_fp_i;
use lazy_static::lazy_static;
use std::f64::consts::PI;

/// One quality tier's coefficient table.
pub struct CoeffTable {
    /// `coeff_half_len + 2` stored entries; indices `0..=coeff_half_len` hold
    /// windowed-sinc values, the final slot is an always-zero sentinel.
    pub taps: Vec<f32>,
    /// Half-width of the filter in stored-entry units (`N` in the module doc).
    pub coeff_half_len: i32,
    /// Q19.12 step through the table per unit-ratio input sample.
    pub index_inc: i32,
}

/// Fraction of Nyquist (0.5 cycles/sample) retained in the passband. Leaves a
/// transition band for the window to roll off in, matching the
/// `f_cutoff: 0.95` convention of this corpus's asynchronous sinc resampler
/// reference.
const CUTOFF_FRACTION: f64 = 0.95;

fn normalized_sinc(x: f64) -> f64 {
    if x.abs() < 1e-9 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Blackman window evaluated at stored-entry index `i` of a symmetric window
/// whose right half spans `0..=half_len`.
fn blackman(i: i32, half_len: i32) -> f64 {
    let m = (2 * half_len + 1) as f64;
    let k = (i + half_len) as f64;
    0.42 - 0.5 * (2.0 * PI * k / (m - 1.0)).cos() + 0.08 * (4.0 * PI * k / (m - 1.0)).cos()
}

fn build_table(half_width_samples: i32, oversampling: i32) -> CoeffTable {
    let half_len = half_width_samples * oversampling;
    let cutoff = 0.5 * CUTOFF_FRACTION;
    let os = oversampling as f64;
    let mut taps = Vec::with_capacity(half_len as usize + 2);
    for i in 0..=half_len {
        let x = i as f64 / os;
        let value = 2.0 * cutoff * normalized_sinc(2.0 * cutoff * x) * blackman(i, half_len);
        taps.push(value as f32);
    }
    taps.push(0.0);
    CoeffTable {
        taps,
        coeff_half_len: half_len,
        index_inc: to_fp_i(oversampling),
    }
}

lazy_static! {
    /// `SincFastest`: short filter, cheap to evaluate, audible roll-off.
    pub static ref SINC_FASTEST: CoeffTable = build_table(12, 32);
    /// `SincMediumQuality`: a balanced middle ground.
    pub static ref SINC_MEDIUM: CoeffTable = build_table(30, 64);
    /// `SincBestQuality`: long filter, highest stopband attenuation.
    pub static ref SINC_BEST: CoeffTable = build_table(70, 128);
}

/// Interpolate the coefficient value at fractional table position `f`
/// (Q19.12). Reads the two stored entries bracketing `f` and linearly
/// interpolates by the fractional part, per §4.2.
#[inline]
pub fn coeff_at(table: &[f32], f: i32) -> f64 {
    let i = crate::fixed::int_part(f) as usize;
    let frac = crate::fixed::to_frac(f);
    let a = table[i] as f64;
    let b = table[i + 1] as f64;
    a + (b - a) * frac
}
