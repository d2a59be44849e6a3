//! ReelForge Ambisonics Core
//!
//! Real-time 3D panning and headphone rendering, orders 1 through 7:
//!
//! ## Encoding
//! - Mono source to (order + 1)^2 channels
//! - ACN channel ordering, SN3D normalization
//! - Closed-form spherical harmonics via multiple-angle recurrences
//! - Sample-accurate linear gain ramps on every pan change
//!
//! ## Binaural Decoding
//! - Fixed virtual loudspeaker dome per order
//! - 2 x N matrix applied per frame (L/R headphone feed)
//!
//! Processors work on frame-interleaved blocks through [`AmbiProcessor`].
//! All coefficient tables are immutable process-wide data and can be shared by
//! any number of instances on any number of threads.
//!
//! ```rust,ignore
//! use rf_ambi::{AmbiProcessor, AmbisonicOrder, BinauralDecoder, SphericalHarmonicEncoder};
//!
//! let mut encoder = SphericalHarmonicEncoder::new(AmbisonicOrder::Third);
//! encoder.pan(0.25, 0.1);
//! encoder.process(&mono, &mut ambi, frames)?;
//!
//! let mut decoder = BinauralDecoder::new(AmbisonicOrder::Third);
//! decoder.process(&ambi, &mut stereo, frames)?;
//! ```

pub mod chain;
pub mod coeffs;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod harmonics;
pub mod matrix;
pub mod order;

mod error;
mod processor;

pub use chain::BinauralPanner;
pub use config::{DecoderConfig, EncoderConfig};
pub use decoder::{BINAURAL_CHANNELS, BinauralDecoder};
pub use encoder::{BoundsMode, DEFAULT_UPDATE_PERIOD, SphericalHarmonicEncoder};
pub use error::{AmbiError, AmbiResult};
pub use matrix::Ear;
pub use order::{AmbisonicOrder, MAX_CHANNELS, MAX_ORDER};
pub use processor::{AmbiProcessor, ProcessorDescriptor};

use serde::Serialize;

/// One ACN channel of an order: harmonic indices and the weights applied to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelInfo {
    /// ACN channel number
    pub acn: usize,
    /// Spherical harmonic degree (0..=order)
    pub degree: i32,
    /// Index within the degree (-degree..=degree)
    pub index: i32,
    /// Encoder normalization coefficient
    pub normalization: f64,
    /// Left ear decoding tap
    pub left: f32,
    /// Right ear decoding tap
    pub right: f32,
}

/// Channel table of an order, in ACN order
pub fn channel_layout(order: AmbisonicOrder) -> Vec<ChannelInfo> {
    let max_degree = order.as_usize() as i32;
    let mut out = Vec::with_capacity(order.channel_count());
    for degree in 0..=max_degree {
        for index in -degree..=degree {
            let acn = crate::order::acn_index(degree, index);
            out.push(ChannelInfo {
                acn,
                degree,
                index,
                normalization: coeffs::normalization(acn),
                left: matrix::decode_tap(order, Ear::Left, acn),
                right: matrix::decode_tap(order, Ear::Right, acn),
            });
        }
    }
    out
}

/// Descriptors for every encoder and decoder a host would register
pub fn registry() -> Vec<ProcessorDescriptor> {
    let mut out = Vec::with_capacity(2 * MAX_ORDER);
    for order in AmbisonicOrder::ALL {
        out.push(SphericalHarmonicEncoder::new(order).descriptor());
    }
    for order in AmbisonicOrder::ALL {
        out.push(BinauralDecoder::new(order).descriptor());
    }
    out
}
