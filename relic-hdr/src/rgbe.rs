//! Conversion of RGBE pixels to floating point radiance.

/// The exponent bias of an RGBE pixel, including the 8 bits of the mantissa.
const EXPONENT_BIAS: i32 = 128 + 8;

/// Convert an RGBE pixel to RGB.
///
/// A zero exponent denotes black, regardless of the mantissas.
#[inline]
pub fn rgbe_to_float(rgbe: [u8; 4]) -> [f32; 3] {
    let [r, g, b, e] = rgbe;

    if e == 0 {
        return [0.0; 3];
    }

    let scale = ldexp(1.0, e as i32 - EXPONENT_BIAS) as f32;

    [r as f32 * scale, g as f32 * scale, b as f32 * scale]
}

const EXPONENT_MASK: u64 = 0x7ff << 52;
const MAX_EXPONENT: i64 = 0x7fe;
const TWO54: f64 = 18_014_398_509_481_984.0;
const TWOM54: f64 = 1.0 / TWO54;
const HUGE: f64 = 1.0e300;
const TINY: f64 = 1.0e-300;

/// Compute `x * 2^n` by adjusting the exponent of `x`.
///
/// Subnormal inputs and results are handled, results that are too large or
/// too small become infinity or zero with the sign of `x`.
pub(crate) fn ldexp(x: f64, n: i32) -> f64 {
    let mut x = x;
    let mut k = exponent(x);

    if k == 0 {
        if x == 0.0 {
            return x;
        }

        // Normalize subnormals first.
        x *= TWO54;
        k = exponent(x) - 54;
    }

    // Infinity or NaN.
    if k == 0x7ff {
        return x + x;
    }

    let k = k + n as i64;

    if k > MAX_EXPONENT {
        return HUGE * HUGE.copysign(x);
    }

    if k > 0 {
        return with_exponent(x, k);
    }

    if k <= -54 {
        return TINY * TINY.copysign(x);
    }

    with_exponent(x, k + 54) * TWOM54
}

#[inline]
fn exponent(x: f64) -> i64 {
    ((x.to_bits() & EXPONENT_MASK) >> 52) as i64
}

#[inline]
fn with_exponent(x: f64, k: i64) -> f64 {
    f64::from_bits((x.to_bits() & !EXPONENT_MASK) | ((k as u64) << 52))
}
