//! Closed-form real spherical harmonics (ACN ordering, SN3D normalization)
//!
//! Gains are evaluated from the sine and cosine of the azimuth and elevation
//! plus their multiples up to 6θ. Multiples come from the Chebyshev recurrence
//! `sin(kθ) = 2cos(θ)·sin((k-1)θ) - sin((k-2)θ)` (and likewise for cosine), so
//! each direction costs two `sin_cos` calls regardless of order.

use crate::coeffs::NORMALIZATION_COEFFS;
use crate::order::AmbisonicOrder;

/// Highest harmonic multiple tracked by [`MultipleAngles`]
pub const MAX_MULTIPLE: usize = 6;

/// sin(kθ) and cos(kθ) for k = 0..=6
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipleAngles {
    pub sin: [f64; MAX_MULTIPLE + 1],
    pub cos: [f64; MAX_MULTIPLE + 1],
}

impl MultipleAngles {
    /// Build the table for angle `theta` (radians)
    pub fn new(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        let mut sin = [0.0; MAX_MULTIPLE + 1];
        let mut cos = [0.0; MAX_MULTIPLE + 1];

        cos[0] = 1.0;
        sin[1] = s;
        cos[1] = c;
        sin[2] = 2.0 * s * c;
        cos[2] = c * c - s * s;

        for k in 3..=MAX_MULTIPLE {
            sin[k] = 2.0 * c * sin[k - 1] - sin[k - 2];
            cos[k] = 2.0 * c * cos[k - 1] - cos[k - 2];
        }

        Self { sin, cos }
    }
}

/// Write the encoding gains for direction (`azimuth`, `elevation`) in radians.
///
/// Only the first `order.channel_count()` entries of `gains` are written.
///
/// # Panics
///
/// Panics if `gains` is shorter than `order.channel_count()`.
pub fn compute_sn3d_gains(
    order: AmbisonicOrder,
    azimuth: f64,
    elevation: f64,
    gains: &mut [f64],
) {
    assert!(
        gains.len() >= order.channel_count(),
        "gain buffer holds {} channels, order {} needs {}",
        gains.len(),
        order,
        order.channel_count()
    );

    let c = &*NORMALIZATION_COEFFS;
    let n = order.as_usize();

    let a = MultipleAngles::new(azimuth);
    let e = MultipleAngles::new(elevation);

    // Azimuth terms
    let sin_a = a.sin[1];
    let cos_a = a.cos[1];
    let sin_a2 = sin_a * sin_a;
    let sin_a4 = sin_a2 * sin_a2;
    let sin_a6 = sin_a4 * sin_a2;
    let cos_a2 = cos_a * cos_a;
    let cos_a4 = cos_a2 * cos_a2;
    let cos_a6 = cos_a4 * cos_a2;
    let cos_2a = a.cos[2];
    let sin_4a = a.sin[4];
    let cos_5a = a.cos[5];
    let sin_6a = a.sin[6];
    let cos_6a = a.cos[6];

    // Elevation terms
    let sin_e = e.sin[1];
    let cos_e = e.cos[1];
    let sin_e2 = sin_e * sin_e;
    let sin_e4 = sin_e2 * sin_e2;
    let sin_e6 = sin_e4 * sin_e2;
    let cos_e2 = cos_e * cos_e;
    let cos_e3 = cos_e2 * cos_e;
    let cos_e4 = cos_e2 * cos_e2;
    let cos_e6 = cos_e4 * cos_e2;
    let cos_e7 = cos_e6 * cos_e;
    let sin_2e = e.sin[2];
    let cos_2e = e.cos[2];
    let sin_3e = e.sin[3];
    let cos_2e_1sq = (cos_2e + 1.0) * (cos_2e + 1.0);
    let cos_2e_1cu = cos_2e_1sq * (cos_2e + 1.0);

    let g = gains;

    // Order 0-1: W, Y, Z, X
    g[0] = 1.0;
    g[1] = sin_a * cos_e;
    g[2] = sin_e;
    g[3] = cos_e * cos_a;

    if n >= 2 {
        g[4] = c[4] * sin_a * cos_e2 * cos_a;
        g[5] = c[5] * 2.0 * sin_2e * sin_a;
        g[6] = c[6] * sin_e2 - 0.5;
        g[7] = c[7] * 2.0 * sin_2e * cos_a;
        g[8] = c[8] * cos_e2 * cos_2a;
    }

    if n >= 3 {
        g[9] = c[9] * (3.0 - 4.0 * sin_a2) * sin_a * cos_e3;
        g[10] = c[10] * sin_e * sin_a * cos_e2 * cos_a;
        g[11] = c[11] * (5.0 * sin_e2 - 1.0) * sin_a * cos_e;
        g[12] = c[12] * (5.0 * sin_e2 - 3.0) * sin_e;
        g[13] = c[13] * (5.0 * sin_e2 - 1.0) * cos_e * cos_a;
        g[14] = c[14] * sin_e * cos_e2 * cos_2a;
        g[15] = c[15] * (1.0 - 4.0 * sin_a2) * cos_e3 * cos_a;
    }

    if n >= 4 {
        g[16] = c[16] * cos_2e_1sq * sin_4a;
        g[17] = c[17] * (3.0 - 4.0 * sin_a2) * sin_e * sin_a * cos_e3;
        g[18] = c[18] * (7.0 * sin_e2 - 1.0) * sin_a * cos_e2 * cos_a;
        g[19] = c[19] * (7.0 * sin_e2 - 3.0) * sin_e * sin_a * cos_e;
        g[20] = c[20] * sin_e4 - 3.75 * sin_e2 + 0.375;
        g[21] = c[21] * (7.0 * sin_e2 - 3.0) * sin_e * cos_e * cos_a;
        g[22] = c[22] * (7.0 * sin_e2 - 1.0) * cos_e2 * cos_2a;
        g[23] = c[23] * (1.0 - 4.0 * sin_a2) * sin_e * cos_e3 * cos_a;
        g[24] = c[24] * (sin_a4 - sin_a2 + 0.125) * cos_e4;
    }

    if n >= 5 {
        g[25] = c[25] * (16.0 * sin_a4 - 20.0 * sin_a2 + 5.0) * sin_a * cos_e3;
        g[26] = c[26] * cos_2e_1sq * 2.0 * sin_e * sin_4a;
        g[27] = c[27] * (9.0 * sin_e2 - 1.0) * (4.0 * sin_a2 - 3.0) * sin_a * cos_e3;
        g[28] = c[28] * (3.0 * sin_e2 - 1.0) * sin_e * sin_a * cos_e2 * cos_a;
        g[29] = c[29] * (21.0 * sin_e4 - 14.0 * sin_e2 + 1.0) * sin_a * cos_e;
        g[30] = c[30] * (63.0 * sin_e4 - 70.0 * sin_e2 + 15.0) * sin_e;
        g[31] = c[31] * (21.0 * sin_e4 - 14.0 * sin_e2 + 1.0) * cos_e * cos_a;
        g[32] = c[32] * (3.0 * sin_e2 - 1.0) * sin_e * cos_e2 * cos_2a;
        g[33] = c[33] * (9.0 * sin_e2 - 1.0) * (4.0 * sin_a2 - 1.0) * cos_e3 * cos_a;
        g[34] = c[34] * (8.0 * sin_a4 - 8.0 * sin_a2 + 1.0) * sin_e * cos_e4;
        g[35] = c[35] * cos_2e_1sq * 2.0 * cos_e * cos_5a;
    }

    if n >= 6 {
        g[36] = c[36] * (16.0 * sin_a4 - 16.0 * sin_a2 + 3.0) * sin_a * cos_e6 * cos_a;
        g[37] = c[37] * (16.0 * sin_a4 - 20.0 * sin_a2 + 5.0) * sin_e * sin_a * cos_e3;
        g[38] = c[38] * cos_2e_1sq * sin_4a * (18.0 - 22.0 * cos_2e);
        g[39] = c[39] * (11.0 * sin_e2 - 3.0) * (4.0 * sin_a2 - 3.0) * sin_e * sin_a * cos_e3;
        g[40] = c[40] * (33.0 * sin_e4 - 18.0 * sin_e2 + 1.0) * sin_a * cos_e2 * cos_a;
        g[41] = c[41] * (33.0 * sin_e4 - 30.0 * sin_e2 + 5.0) * sin_e * sin_a * cos_e;
        g[42] = c[42] * sin_e6 - 19.6875 * sin_e4 + 6.5625 * sin_e2 - 0.3125;
        g[43] = c[43]
            * 4.58257569496
            * (33.0 * sin_e4 - 30.0 * sin_e2 + 5.0)
            * sin_e
            * cos_e
            * cos_a;
        g[44] = c[44] * (33.0 * sin_e4 - 18.0 * sin_e2 + 1.0) * cos_e2 * cos_2a;
        g[45] = c[45] * (11.0 * sin_e2 - 3.0) * (4.0 * sin_a2 - 1.0) * sin_e * cos_e3 * cos_a;
        g[46] = c[46] * (11.0 * sin_e2 - 1.0) * (8.0 * sin_a4 - 8.0 * sin_a2 + 1.0) * cos_e4;
        g[47] = c[47] * 2.0 * sin_2e * cos_5a * cos_2e_1sq;
        g[48] = c[48] * cos_2e_1cu * cos_6a;
    }

    if n >= 7 {
        g[49] = c[49]
            * (-57.0 * sin_a6 + 91.0 * sin_a4 - 35.0 * sin_a2 + 7.0 * cos_a6)
            * sin_a
            * cos_e7;
        g[50] = c[50] * cos_2e_1cu * (2.0 * sin_e * sin_6a);
        g[51] = c[51]
            * (13.0 * sin_e2 - 1.0)
            * (16.0 * sin_a4 - 20.0 * sin_a2 + 5.0)
            * sin_a
            * cos_e3;
        g[52] = c[52] * cos_2e_1sq * sin_4a * (54.0 * sin_e - 26.0 * sin_3e);
        g[53] = c[53]
            * (4.0 * sin_a2 - 3.0)
            * (143.0 * sin_e4 - 66.0 * sin_e2 + 3.0)
            * sin_a
            * cos_e3;
        g[54] = c[54] * (143.0 * sin_e4 - 110.0 * sin_e2 + 15.0) * sin_e * sin_a * cos_e2 * cos_a;
        g[55] = c[55] * (429.0 * sin_e6 - 495.0 * sin_e4 + 135.0 * sin_e2 - 5.0) * sin_a * cos_e;
        g[56] = c[56] * (429.0 * sin_e6 - 693.0 * sin_e4 + 315.0 * sin_e2 - 35.0) * sin_e;
        g[57] = c[57] * (429.0 * sin_e6 - 495.0 * sin_e4 + 135.0 * sin_e2 - 5.0) * cos_e * cos_a;
        g[58] = c[58] * (143.0 * sin_e4 - 110.0 * sin_e2 + 15.0) * sin_e * cos_e2 * cos_2a;
        g[59] = c[59]
            * (4.0 * sin_a2 - 1.0)
            * (143.0 * sin_e4 - 66.0 * sin_e2 + 3.0)
            * cos_e3
            * cos_a;
        g[60] = c[60]
            * (13.0 * sin_e2 - 3.0)
            * (8.0 * sin_a4 - 8.0 * sin_a2 + 1.0)
            * sin_e
            * cos_e4;
        g[61] = c[61]
            * (13.0 * sin_e2 - 1.0)
            * (16.0 * sin_a4 - 12.0 * sin_a2 + 1.0)
            * cos_e3
            * cos_a;
        g[62] = c[62] * (2.0 * sin_e * cos_6a) * cos_2e_1cu;
        g[63] = c[63]
            * (-63.0 * sin_a6 + 77.0 * sin_a4 - 21.0 * sin_a2 + cos_a6)
            * cos_e7
            * cos_a;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::MAX_CHANNELS;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn gains_for(order: AmbisonicOrder, az: f64, el: f64) -> [f64; MAX_CHANNELS] {
        let mut g = [0.0; MAX_CHANNELS];
        compute_sn3d_gains(order, az, el, &mut g);
        g
    }

    #[test]
    #[should_panic(expected = "order 2 needs 9")]
    fn test_short_gain_buffer_panics() {
        let mut g = [0.0; 8];
        compute_sn3d_gains(AmbisonicOrder::Second, 0.0, 0.0, &mut g);
    }

    #[test]
    fn test_multiple_angles_match_direct() {
        for theta in [-2.7, -FRAC_PI_2, 0.0, 0.4, FRAC_PI_4, PI] {
            let m = MultipleAngles::new(theta);
            for k in 0..=MAX_MULTIPLE {
                assert_abs_diff_eq!(m.sin[k], (k as f64 * theta).sin(), epsilon = 1e-12);
                assert_abs_diff_eq!(m.cos[k], (k as f64 * theta).cos(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_omni_always_unity() {
        for order in AmbisonicOrder::ALL {
            for (az, el) in [(0.0, 0.0), (1.3, -0.4), (-PI, FRAC_PI_2), (42.0, -17.0)] {
                assert_eq!(gains_for(order, az, el)[0], 1.0);
            }
        }
    }

    #[test]
    fn test_first_order_matches_trig() {
        let angles = [0.0, FRAC_PI_4, FRAC_PI_2, PI, -FRAC_PI_2];
        for &az in &angles {
            for &el in &angles {
                let g = gains_for(AmbisonicOrder::First, az, el);
                assert_abs_diff_eq!(g[1], az.sin() * el.cos(), epsilon = 1e-12);
                assert_abs_diff_eq!(g[2], el.sin(), epsilon = 1e-12);
                assert_abs_diff_eq!(g[3], el.cos() * az.cos(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_channels_beyond_order_untouched() {
        let mut g = [f64::NAN; MAX_CHANNELS];
        compute_sn3d_gains(AmbisonicOrder::Second, 0.7, 0.3, &mut g);
        assert!(g[..9].iter().all(|v| v.is_finite()));
        assert!(g[9..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sn3d_degree_energy_up_to_fourth() {
        // SN3D: sum of squares within each degree is 1 for every direction
        for (az, el) in [(0.3, 0.2), (-2.1, 0.9), (1.0, -1.2), (2.9, 0.05)] {
            let g = gains_for(AmbisonicOrder::Seventh, az, el);
            for l in 0..=4usize {
                let energy: f64 = g[l * l..(l + 1) * (l + 1)].iter().map(|v| v * v).sum();
                assert_relative_eq!(energy, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_high_order_reference_values() {
        let g = gains_for(AmbisonicOrder::Seventh, 0.3, 0.2);
        assert_relative_eq!(g[6], -0.4407957455021638, max_relative = 1e-9);
        assert_relative_eq!(g[20], 0.2338049210483295, max_relative = 1e-9);
        assert_relative_eq!(g[25], 0.6587835542948127, max_relative = 1e-9);
        assert_relative_eq!(g[35], 0.04487361536595331, max_relative = 1e-9);
        assert_relative_eq!(g[42], -0.08326367241537441, max_relative = 1e-9);
        assert_relative_eq!(g[50], 0.41523887101999396, max_relative = 1e-9);
        assert_relative_eq!(g[63], -0.28380937124108463, max_relative = 1e-9);
    }

    #[test]
    fn test_lower_order_is_prefix_of_higher() {
        let low = gains_for(AmbisonicOrder::Third, -0.8, 0.6);
        let high = gains_for(AmbisonicOrder::Seventh, -0.8, 0.6);
        assert_eq!(&low[..16], &high[..16]);
    }
}
