//! Precomputed binaural decoding matrices
//!
//! Basic virtual loudspeaker dome folded down to two ears. Rows are indexed by
//! `order - 1`, columns by ACN channel. Only the first `(order + 1)^2` taps of a
//! row belong to that order; the remainder is storage padding.

#![allow(clippy::excessive_precision)]

use crate::order::{AmbisonicOrder, MAX_CHANNELS, MAX_ORDER};

/// Output ear of a binaural decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ear {
    Left,
    Right,
}

/// Decoding taps for one ear at one order, exactly `order.channel_count()` long
pub fn decode_row(order: AmbisonicOrder, ear: Ear) -> &'static [f32] {
    let table = match ear {
        Ear::Left => &DECODE_LEFT,
        Ear::Right => &DECODE_RIGHT,
    };
    &table[order.index()][..order.channel_count()]
}

/// Single decoding tap. Panics if `channel` is outside the order's channel range.
pub fn decode_tap(order: AmbisonicOrder, ear: Ear, channel: usize) -> f32 {
    let n = order.channel_count();
    assert!(channel < n, "channel {channel} out of range for order {order} ({n} channels)");
    decode_row(order, ear)[channel]
}

/// Left ear decoding taps, one row per order, zero-padded to 64 channels.
#[rustfmt::skip]
pub const DECODE_LEFT: [[f32; MAX_CHANNELS]; MAX_ORDER] = [
    // Order 1 (4 ch)
    [
        0.50000000, 0.17727273, 0.12085662, -0.00000000, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 2 (9 ch)
    [
        0.50000000, 0.18145161, 0.11016334, -0.00000000, 0.00000000, 0.03083514, -0.04435484, -0.00000000,
        -0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 3 (16 ch)
    [
        0.50000000, 0.18303571, 0.10788307, -0.00000000, 0.00000000, 0.03108974, -0.04910714, 0.00000000,
        0.00000000, -0.00000000, 0.00000000, -0.01982009, 0.01813472, -0.00000000, -0.00000000, 0.00000000,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 4 (25 ch)
    [
        0.50000000, 0.18407012, 0.10482526, -0.00000000, -0.00000000, 0.03127638, -0.05221037, -0.00000000,
        -0.00000000, 0.00000000, -0.00000000, -0.01907830, 0.01453813, -0.00000000, -0.00000000, 0.00000000,
        0.00000000, 0.00000000, -0.00000000, 0.00681235, 0.00231040, 0.00000000, -0.00000000, -0.00000000,
        -0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 5 (36 ch)
    [
        0.50000000, 0.18464467, 0.10426101, -0.00000000, -0.00000000, 0.03136531, -0.05393401, -0.00000000,
        0.00000000, 0.00000000, -0.00000000, -0.01981662, 0.01371717, -0.00000000, 0.00000000, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, 0.00719272, 0.00269670, 0.00000000, 0.00000000, -0.00000000,
        0.00000000, 0.00000000, 0.00000000, -0.00000000, 0.00000000, 0.00028799, -0.00675368, -0.00000000,
        0.00000000, -0.00000000, 0.00000000, -0.00000000, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 6 (49 ch)
    [
        0.50000000, 0.18510638, 0.10271275, -0.00000000, -0.00000000, 0.03145100, -0.05531915, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, -0.01929950, 0.01192154, 0.00000000, -0.00000000, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, 0.00691091, -0.00016622, -0.00000000, -0.00000000, -0.00000000,
        -0.00000000, -0.00000000, -0.00000000, 0.00000000, 0.00000000, -0.00096567, -0.00774725, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, -0.00000000, 0.00000000, -0.00000000, -0.00000000, 0.00000000,
        0.00000000, 0.00316761, 0.00257646, 0.00000000, 0.00000000, -0.00000000, -0.00000000, -0.00000000,
        -0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 7 (64 ch)
    [
        0.50000000, 0.18540112, 0.10255810, -0.00000000, 0.00000000, 0.03149487, -0.05620336, -0.00000000,
        0.00000000, 0.00000000, 0.00000000, -0.01981499, 0.01164026, -0.00000000, 0.00000000, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, 0.00717838, 0.00042269, 0.00000000, -0.00000000, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, 0.00000000, 0.00000000, 0.00010585, -0.00878976, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, -0.00000000, -0.00000000, -0.00000000, 0.00000000, -0.00000000,
        0.00000000, 0.00325209, 0.00012207, 0.00000000, -0.00000000, 0.00000000, -0.00000000, 0.00000000,
        0.00000000, 0.00000000, 0.00000000, -0.00000000, -0.00000000, -0.00000000, 0.00000000, -0.00179410,
        -0.01801540, 0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000, -0.00000000, 0.00000000,
    ],
];

/// Right ear decoding taps, one row per order, zero-padded to 64 channels.
#[rustfmt::skip]
pub const DECODE_RIGHT: [[f32; MAX_CHANNELS]; MAX_ORDER] = [
    // Order 1 (4 ch)
    [
        0.50000000, -0.17727273, 0.12085662, -0.00000000, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 2 (9 ch)
    [
        0.50000000, -0.18145161, 0.11016334, -0.00000000, 0.00000000, -0.03083514, -0.04435484, -0.00000000,
        -0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 3 (16 ch)
    [
        0.50000000, -0.18303571, 0.10788307, -0.00000000, 0.00000000, -0.03108974, -0.04910714, -0.00000000,
        0.00000000, 0.00000000, -0.00000000, 0.01982009, 0.01813472, 0.00000000, 0.00000000, 0.00000000,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 4 (25 ch)
    [
        0.50000000, -0.18407012, 0.10482526, -0.00000000, 0.00000000, -0.03127638, -0.05221037, -0.00000000,
        0.00000000, -0.00000000, 0.00000000, 0.01907830, 0.01453813, 0.00000000, -0.00000000, -0.00000000,
        0.00000000, -0.00000000, -0.00000000, -0.00681235, 0.00231040, -0.00000000, 0.00000000, -0.00000000,
        -0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 5 (36 ch)
    [
        0.50000000, -0.18464467, 0.10426101, -0.00000000, 0.00000000, -0.03136531, -0.05393401, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, 0.01981662, 0.01371717, 0.00000000, -0.00000000, 0.00000000,
        -0.00000000, 0.00000000, -0.00000000, -0.00719272, 0.00269670, -0.00000000, -0.00000000, 0.00000000,
        0.00000000, -0.00000000, -0.00000000, 0.00000000, 0.00000000, -0.00028799, -0.00675368, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, -0.00000000, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 6 (49 ch)
    [
        0.50000000, -0.18510638, 0.10271275, -0.00000000, 0.00000000, -0.03145100, -0.05531915, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, 0.01929950, 0.01192154, 0.00000000, -0.00000000, -0.00000000,
        0.00000000, 0.00000000, 0.00000000, -0.00691091, -0.00016622, -0.00000000, -0.00000000, -0.00000000,
        0.00000000, -0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00096567, -0.00774725, -0.00000000,
        -0.00000000, 0.00000000, 0.00000000, 0.00000000, -0.00000000, -0.00000000, -0.00000000, 0.00000000,
        0.00000000, -0.00316761, 0.00257646, -0.00000000, 0.00000000, -0.00000000, 0.00000000, 0.00000000,
        0.00000000, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    // Order 7 (64 ch)
    [
        0.50000000, -0.18540112, 0.10255810, -0.00000000, 0.00000000, -0.03149487, -0.05620336, -0.00000000,
        0.00000000, 0.00000000, 0.00000000, 0.01981499, 0.01164026, -0.00000000, 0.00000000, 0.00000000,
        0.00000000, 0.00000000, -0.00000000, -0.00717838, 0.00042269, -0.00000000, -0.00000000, -0.00000000,
        0.00000000, -0.00000000, 0.00000000, 0.00000000, 0.00000000, -0.00010585, -0.00878976, -0.00000000,
        0.00000000, -0.00000000, 0.00000000, -0.00000000, 0.00000000, -0.00000000, 0.00000000, -0.00000000,
        0.00000000, -0.00325209, 0.00012207, -0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000,
        0.00000000, -0.00000000, 0.00000000, -0.00000000, -0.00000000, -0.00000000, 0.00000000, 0.00179410,
        -0.01801540, -0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000,
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lengths() {
        for order in AmbisonicOrder::ALL {
            assert_eq!(decode_row(order, Ear::Left).len(), order.channel_count());
            assert_eq!(decode_row(order, Ear::Right).len(), order.channel_count());
        }
    }

    #[test]
    fn test_omni_weight_is_half() {
        for order in AmbisonicOrder::ALL {
            assert_eq!(decode_tap(order, Ear::Left, 0), 0.5);
            assert_eq!(decode_tap(order, Ear::Right, 0), 0.5);
        }
    }

    #[test]
    fn test_left_right_mirror_on_y() {
        // Y (ACN 1) flips sign between ears, Z (ACN 2) is shared
        for order in AmbisonicOrder::ALL {
            assert_eq!(
                decode_tap(order, Ear::Left, 1),
                -decode_tap(order, Ear::Right, 1)
            );
            assert_eq!(decode_tap(order, Ear::Left, 2), decode_tap(order, Ear::Right, 2));
        }
    }

    #[test]
    fn test_padding_is_zero() {
        for order in AmbisonicOrder::ALL {
            let n = order.channel_count();
            assert!(DECODE_LEFT[order.index()][n..].iter().all(|v| *v == 0.0));
            assert!(DECODE_RIGHT[order.index()][n..].iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    #[should_panic]
    fn test_tap_beyond_order_panics() {
        decode_tap(AmbisonicOrder::First, Ear::Left, 4);
    }
}
