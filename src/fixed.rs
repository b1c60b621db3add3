//! Q19.12 fixed-point primitives used by the sinc engine's coefficient walk.
//!
//! A real value `x` is stored as `round(x * 4096)` in an `i32`; 12 fractional
//! bits give enough precision for linear interpolation between adjacent
//! coefficient table entries while leaving headroom for `coeff_half_len *
//! index_inc` (up to ~2^24) well inside `i32::MAX`.

/// Number of fractional bits.
pub const SHIFT_BITS: u32 = 12;
/// `1 << SHIFT_BITS`, the fixed-point scale factor.
pub const FP_ONE: i32 = 1 << SHIFT_BITS;
const FRAC_MASK: i32 = FP_ONE - 1;

/// Convert a real value to Q19.12, rounding to the nearest representable step.
#[inline]
pub fn to_fp(x: f64) -> i32 {
    round_half_away_from_zero(x * FP_ONE as f64)
}

/// Convert an integer to Q19.12 (exact, no rounding needed).
#[inline]
pub fn to_fp_i(n: i32) -> i32 {
    debug_assert!(
        n.checked_mul(FP_ONE).is_some(),
        "to_fp_i overflow for n={n}"
    );
    n * FP_ONE
}

/// Integer part of a Q19.12 value (floor toward negative infinity via shift).
#[inline]
pub fn int_part(fp: i32) -> i32 {
    fp >> SHIFT_BITS
}

/// Fractional part of a Q19.12 value, as a raw integer in `0..FP_ONE`.
#[inline]
pub fn frac_part(fp: i32) -> i32 {
    fp & FRAC_MASK
}

/// Fractional part of a Q19.12 value as a `[0, 1)` real number.
#[inline]
pub fn to_frac(fp: i32) -> f64 {
    frac_part(fp) as f64 / FP_ONE as f64
}

/// `x - floor(x)`, normalized into `[0, 1)`. Rounding in the subtraction can
/// occasionally produce exactly `1.0`; fold that back down rather than let a
/// caller's cursor walk treat it as a whole extra frame.
#[inline]
pub fn fmod_one(x: f64) -> f64 {
    let mut r = x - x.floor();
    if r >= 1.0 {
        r -= 1.0;
    }
    if r < 0.0 {
        r = 0.0;
    }
    r
}

/// Round half away from zero, the rounding rule used when advancing integer
/// cursors and when converting float samples to fixed-width PCM.
#[inline]
pub fn round_half_away_from_zero(x: f64) -> i32 {
    if x >= 0.0 {
        (x + 0.5).floor() as i32
    } else {
        (x - 0.5).ceil() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_fp_round_trip() {
        assert_eq!(to_fp(1.0), FP_ONE);
        assert_eq!(to_fp(0.5), FP_ONE / 2);
        assert_eq!(int_part(to_fp(3.75)), 3);
        assert!((to_frac(to_fp(3.75)) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn to_fp_i_exact() {
        assert_eq!(to_fp_i(5), 5 * FP_ONE);
        assert_eq!(int_part(to_fp_i(5)), 5);
        assert_eq!(frac_part(to_fp_i(5)), 0);
    }

    #[test]
    fn fmod_one_stays_in_range() {
        assert!(fmod_one(3.0) < 1.0);
        assert_eq!(fmod_one(3.0), 0.0);
        let r = fmod_one(1.9999999999999998);
        assert!(r >= 0.0 && r < 1.0);
        assert!((fmod_one(2.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rounding_half_away_from_zero() {
        assert_eq!(round_half_away_from_zero(0.5), 1);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
        assert_eq!(round_half_away_from_zero(2.4), 2);
        assert_eq!(round_half_away_from_zero(-2.4), -2);
    }
}
