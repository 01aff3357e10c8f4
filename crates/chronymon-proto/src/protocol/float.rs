// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/// Width of the signed exponent field (bits 31..25).
pub const FLOAT_EXP_BITS: u32 = 7;

/// Width of the signed coefficient field (bits 24..0).
pub const FLOAT_COEF_BITS: u32 = 32 - FLOAT_EXP_BITS;

const FLOAT_EXP_MIN: i32 = -(1 << (FLOAT_EXP_BITS - 1));
const FLOAT_EXP_MAX: i32 = -FLOAT_EXP_MIN - 1;
const FLOAT_COEF_MAX: i32 = (1 << (FLOAT_COEF_BITS - 1)) - 1;
const FLOAT_COEF_MASK: u32 = (1 << FLOAT_COEF_BITS) - 1;

/// Decode chronyd's 32-bit logarithmic float into an `f64`.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Exponent   |                  Coefficient                    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Both fields are two's complement. The value is `coefficient * 2^(exponent - 25)`.
/// Every bit pattern decodes to a finite number; the result is exact because a 25-bit
/// coefficient scaled by a power of two always fits an `f64`.
pub fn decode_float(raw: u32) -> f64 {
    let mut exp = (raw >> FLOAT_COEF_BITS) as i32;
    if exp >= 1 << (FLOAT_EXP_BITS - 1) {
        exp -= 1 << FLOAT_EXP_BITS;
    }
    exp -= FLOAT_COEF_BITS as i32;

    let mut coef = (raw & FLOAT_COEF_MASK) as i32;
    if coef >= 1 << (FLOAT_COEF_BITS - 1) {
        coef -= 1 << FLOAT_COEF_BITS;
    }

    f64::from(coef) * 2.0f64.powi(exp)
}

/// Encode an `f64` the way chronyd does before putting it on the wire.
///
/// The coefficient is rounded to nearest. Magnitudes above the representable range clamp
/// to the largest value, magnitudes below it flush to zero, and NaN encodes as zero.
pub fn encode_float(value: f64) -> u32 {
    let (x, neg) = if value < 0.0 {
        (-value, 1)
    } else if value >= 0.0 {
        (value, 0)
    } else {
        (0.0, 0)
    };

    let (mut exp, mut coef): (i32, i32);
    if x < 1.0e-100 {
        exp = 0;
        coef = 0;
    } else if x > 1.0e100 {
        exp = FLOAT_EXP_MAX;
        coef = FLOAT_COEF_MAX + neg;
    } else {
        exp = (x.ln() / 2.0f64.ln() + 1.0) as i32;
        coef = (x * 2.0f64.powi(FLOAT_COEF_BITS as i32 - exp) + 0.5) as i32;

        // At most two bits too wide after rounding.
        while coef > FLOAT_COEF_MAX + neg {
            coef >>= 1;
            exp += 1;
        }

        if exp > FLOAT_EXP_MAX {
            exp = FLOAT_EXP_MAX;
            coef = FLOAT_COEF_MAX + neg;
        } else if exp < FLOAT_EXP_MIN {
            if exp + FLOAT_COEF_BITS as i32 >= FLOAT_EXP_MIN {
                coef >>= FLOAT_EXP_MIN - exp;
                exp = FLOAT_EXP_MIN;
            } else {
                exp = 0;
                coef = 0;
            }
        }
    }

    let mut coef_bits = coef as u32;
    if neg == 1 {
        coef_bits = coef_bits.wrapping_neg();
    }

    ((exp as u32) << FLOAT_COEF_BITS) | (coef_bits & FLOAT_COEF_MASK)
}
