//! SN3D normalization coefficients for the closed-form encoder gains
//!
//! One table sized for 7th order, indexed by ACN channel. Lower orders read a
//! prefix of it. Built once on first use and shared read-only.

use std::sync::LazyLock;

use crate::order::MAX_CHANNELS;

/// Per-channel normalization coefficients (ACN order)
pub static NORMALIZATION_COEFFS: LazyLock<[f64; MAX_CHANNELS]> =
    LazyLock::new(build_normalization_coeffs);

/// Coefficient for an ACN channel
#[inline]
pub fn normalization(channel: usize) -> f64 {
    NORMALIZATION_COEFFS[channel]
}

fn build_normalization_coeffs() -> [f64; MAX_CHANNELS] {
    let s = f64::sqrt;
    let mut c = [0.0f64; MAX_CHANNELS];

    // Order 0-1
    c[0] = 1.0;
    c[1] = 1.0;
    c[2] = 1.0;
    c[3] = 1.0;

    // Order 2
    c[4] = s(3.0);
    c[5] = (1.0 / 4.0) * s(3.0);
    c[6] = 3.0 / 2.0;
    c[7] = (1.0 / 4.0) * s(3.0);
    c[8] = (1.0 / 2.0) * s(3.0);

    // Order 3
    c[9] = (1.0 / 4.0) * s(10.0);
    c[10] = s(15.0);
    c[11] = (1.0 / 4.0) * s(6.0);
    c[12] = 1.0 / 2.0;
    c[13] = (1.0 / 4.0) * s(6.0);
    c[14] = (1.0 / 2.0) * s(15.0);
    c[15] = (1.0 / 4.0) * s(10.0);

    // Order 4
    c[16] = (1.0 / 32.0) * s(35.0);
    c[17] = (1.0 / 4.0) * s(70.0);
    c[18] = (1.0 / 2.0) * s(5.0);
    c[19] = (1.0 / 4.0) * s(10.0);
    c[20] = 35.0 / 8.0;
    c[21] = (1.0 / 4.0) * s(10.0);
    c[22] = (1.0 / 4.0) * s(5.0);
    c[23] = (1.0 / 4.0) * s(70.0);
    c[24] = s(35.0);

    // Order 5
    c[25] = (3.0 / 16.0) * s(14.0);
    c[26] = (3.0 / 64.0) * s(35.0);
    c[27] = (-1.0 / 16.0) * s(70.0);
    c[28] = (1.0 / 2.0) * s(105.0);
    c[29] = (1.0 / 8.0) * s(15.0);
    c[30] = 1.0 / 8.0;
    c[31] = (1.0 / 8.0) * s(15.0);
    c[32] = (1.0 / 4.0) * s(105.0);
    c[33] = (-1.0 / 16.0) * s(70.0);
    c[34] = (3.0 / 8.0) * s(35.0);
    c[35] = (3.0 / 128.0) * s(14.0);

    // Order 6
    c[36] = (1.0 / 16.0) * s(462.0);
    c[37] = (3.0 / 16.0) * s(154.0);
    c[38] = (3.0 / 256.0) * s(7.0);
    c[39] = (-1.0 / 16.0) * s(210.0);
    c[40] = (1.0 / 16.0) * s(210.0);
    c[41] = (1.0 / 8.0) * s(21.0);
    c[42] = 231.0 / 16.0;
    c[43] = 1.0 / 8.0;
    c[44] = (1.0 / 32.0) * s(210.0);
    c[45] = (-1.0 / 16.0) * s(210.0);
    c[46] = (3.0 / 16.0) * s(7.0);
    c[47] = (3.0 / 256.0) * s(154.0);
    c[48] = (1.0 / 256.0) * s(462.0);

    // Order 7
    c[49] = (1.0 / 32.0) * s(429.0);
    c[50] = (1.0 / 512.0) * s(6006.0);
    c[51] = (1.0 / 32.0) * s(231.0);
    c[52] = (1.0 / 512.0) * s(231.0);
    c[53] = (-1.0 / 32.0) * s(21.0);
    c[54] = (1.0 / 16.0) * s(42.0);
    c[55] = (1.0 / 32.0) * s(7.0);
    c[56] = 1.0 / 16.0;
    c[57] = (1.0 / 32.0) * s(7.0);
    c[58] = (1.0 / 32.0) * s(42.0);
    c[59] = (-1.0 / 32.0) * s(21.0);
    c[60] = (1.0 / 16.0) * s(231.0);
    c[61] = (1.0 / 32.0) * s(231.0);
    c[62] = (1.0 / 512.0) * s(6006.0);
    c[63] = (1.0 / 32.0) * s(429.0);

    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_order_unity() {
        for ch in 0..4 {
            assert_eq!(normalization(ch), 1.0);
        }
    }

    #[test]
    fn test_every_entry_written() {
        assert!(NORMALIZATION_COEFFS.iter().all(|c| *c != 0.0 && c.is_finite()));
    }

    #[test]
    fn test_known_values() {
        assert_relative_eq!(normalization(4), 1.7320508075688772);
        assert_relative_eq!(normalization(20), 4.375);
        assert_relative_eq!(normalization(42), 14.4375);
        assert_relative_eq!(normalization(56), 0.0625);
        assert!(normalization(53) < 0.0);
    }
}
