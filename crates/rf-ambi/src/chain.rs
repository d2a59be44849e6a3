//! Encoder feeding a binaural decoder: mono in, headphone stereo out

use crate::decoder::{BINAURAL_CHANNELS, BinauralDecoder};
use crate::encoder::SphericalHarmonicEncoder;
use crate::error::AmbiResult;
use crate::processor::{AmbiProcessor, ProcessorDescriptor, check_buffers};

/// Default scratch capacity in frames
pub const DEFAULT_MAX_BLOCK: usize = 512;

/// Mono source panned in Ambisonics and rendered binaurally
#[derive(Debug, Clone)]
pub struct BinauralPanner {
    encoder: SphericalHarmonicEncoder,
    decoder: BinauralDecoder,
    /// Intermediate Ambisonic block [max_block x N]
    scratch: Vec<f32>,
    /// Frames processed per inner pass
    max_block: usize,
}

impl BinauralPanner {
    /// Chain an encoder and a decoder of the same order
    pub fn new(encoder: SphericalHarmonicEncoder) -> Self {
        Self::with_max_block(encoder, DEFAULT_MAX_BLOCK)
    }

    /// Chain with an explicit scratch size; longer calls run in several passes
    pub fn with_max_block(encoder: SphericalHarmonicEncoder, max_block: usize) -> Self {
        let max_block = max_block.max(1);
        let decoder = BinauralDecoder::new(encoder.order());
        let scratch = vec![0.0; max_block * encoder.channel_count()];
        Self {
            encoder,
            decoder,
            scratch,
            max_block,
        }
    }

    /// Pan controls
    pub fn encoder(&self) -> &SphericalHarmonicEncoder {
        &self.encoder
    }

    /// Mutable pan controls
    pub fn encoder_mut(&mut self) -> &mut SphericalHarmonicEncoder {
        &mut self.encoder
    }

    /// Decoder stage
    pub fn decoder(&self) -> &BinauralDecoder {
        &self.decoder
    }
}

impl AmbiProcessor for BinauralPanner {
    fn input_channels(&self) -> usize {
        1
    }

    fn output_channels(&self) -> usize {
        BINAURAL_CHANNELS
    }

    fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize) -> AmbiResult<()> {
        check_buffers(input, 1, output, BINAURAL_CHANNELS, frames)?;

        let n = self.encoder.channel_count();
        let mut done = 0;
        while done < frames {
            let len = (frames - done).min(self.max_block);
            let ambi = &mut self.scratch[..len * n];

            self.encoder.process(&input[done..done + len], ambi, len)?;
            self.decoder.process(
                ambi,
                &mut output[done * BINAURAL_CHANNELS..(done + len) * BINAURAL_CHANNELS],
                len,
            )?;

            done += len;
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.encoder.reset();
        self.scratch.fill(0.0);
    }

    fn descriptor(&self) -> ProcessorDescriptor {
        let order = self.encoder.order();
        ProcessorDescriptor {
            name: format!("AmbiPan{}", order),
            input_channels: 1,
            output_channels: BINAURAL_CHANNELS,
            description: format!(
                "Order-{} ambisonics encoder chained into the binaural decoder.",
                order
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::BoundsMode;
    use crate::order::AmbisonicOrder;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_front_is_centered() {
        let mut panner = BinauralPanner::new(SphericalHarmonicEncoder::new(AmbisonicOrder::Third));
        let input = vec![1.0f32; 64];
        let mut output = vec![0.0f32; 128];
        panner.process(&input, &mut output, 64).unwrap();

        for frame in output.chunks_exact(2) {
            assert_abs_diff_eq!(frame[0], frame[1], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_split_passes_match_single_pass() {
        let make = |max_block| {
            let mut enc = SphericalHarmonicEncoder::with_settings(
                AmbisonicOrder::Second,
                32,
                BoundsMode::Radians,
            );
            enc.pan(FRAC_PI_2, 0.2);
            BinauralPanner::with_max_block(enc, max_block)
        };

        let input: Vec<f32> = (0..100).map(|i| (i as f32 * 0.05).sin()).collect();
        let mut whole = vec![0.0f32; 200];
        let mut split = vec![0.0f32; 200];
        make(512).process(&input, &mut whole, 100).unwrap();
        make(7).process(&input, &mut split, 100).unwrap();

        for (a, b) in whole.iter().zip(&split) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_left_pan_favors_left_ear() {
        let mut enc =
            SphericalHarmonicEncoder::with_settings(AmbisonicOrder::First, 1, BoundsMode::Radians);
        enc.pan(FRAC_PI_2, 0.0);
        let mut panner = BinauralPanner::new(enc);

        let input = vec![1.0f32; 8];
        let mut output = vec![0.0f32; 16];
        panner.process(&input, &mut output, 8).unwrap();

        let last = &output[14..16];
        assert!(last[0] > last[1]);
    }

    #[test]
    fn test_descriptor() {
        let panner = BinauralPanner::new(SphericalHarmonicEncoder::new(AmbisonicOrder::Fourth));
        let d = panner.descriptor();
        assert_eq!(d.name, "AmbiPan4");
        assert_eq!((d.input_channels, d.output_channels), (1, 2));
    }
}
