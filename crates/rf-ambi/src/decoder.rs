//! Binaural decoder - Ambisonics to headphone L/R via a fixed virtual dome

use ndarray::linalg::general_mat_mul;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::error::{AmbiError, AmbiResult};
use crate::matrix::{Ear, decode_row};
use crate::order::AmbisonicOrder;
use crate::processor::{AmbiProcessor, ProcessorDescriptor, check_buffers};

/// Number of output channels (left, right)
pub const BINAURAL_CHANNELS: usize = 2;

/// Stateless N-channel to stereo decoder
#[derive(Debug, Clone)]
pub struct BinauralDecoder {
    /// Ambisonic order
    order: AmbisonicOrder,
    /// Number of input channels
    num_input_channels: usize,
    /// Decoding matrix [ears x ambisonic_channels]
    decode_matrix: Array2<f32>,
}

impl BinauralDecoder {
    /// Create decoder for the given order
    pub fn new(order: AmbisonicOrder) -> Self {
        let n = order.channel_count();
        let left = decode_row(order, Ear::Left);
        let right = decode_row(order, Ear::Right);

        let decode_matrix = Array2::from_shape_fn((BINAURAL_CHANNELS, n), |(ear, ch)| {
            if ear == 0 { left[ch] } else { right[ch] }
        });

        log::debug!("AmbiBin{}: {} input channels", order, n);

        Self {
            order,
            num_input_channels: n,
            decode_matrix,
        }
    }

    /// Create decoder from a numeric order
    pub fn from_order(order: usize) -> AmbiResult<Self> {
        Ok(Self::new(AmbisonicOrder::from_order(order)?))
    }

    /// Ambisonic order
    pub fn order(&self) -> AmbisonicOrder {
        self.order
    }

    /// Number of input channels
    pub fn channel_count(&self) -> usize {
        self.num_input_channels
    }

    /// Decoding matrix, one row per ear
    pub fn matrix(&self) -> &Array2<f32> {
        &self.decode_matrix
    }

    /// Decode a single frame of `channel_count()` samples to (left, right)
    ///
    /// # Panics
    ///
    /// Panics if `frame` is shorter than `channel_count()`.
    #[inline]
    pub fn decode_frame(&self, frame: &[f32]) -> (f32, f32) {
        let n = self.num_input_channels;
        let mut l = 0.0f32;
        let mut r = 0.0f32;
        for (c, &s) in frame[..n].iter().enumerate() {
            l += self.decode_matrix[[0, c]] * s;
            r += self.decode_matrix[[1, c]] * s;
        }
        (l, r)
    }
}

impl AmbiProcessor for BinauralDecoder {
    fn input_channels(&self) -> usize {
        self.num_input_channels
    }

    fn output_channels(&self) -> usize {
        BINAURAL_CHANNELS
    }

    fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize) -> AmbiResult<()> {
        let n = self.num_input_channels;
        check_buffers(input, n, output, BINAURAL_CHANNELS, frames)?;

        let in_len = frames * n;
        let input = ArrayView2::from_shape((frames, n), &input[..in_len]).map_err(|_| {
            AmbiError::BufferSizeMismatch {
                expected: in_len,
                got: input.len(),
            }
        })?;

        let out_len = frames * BINAURAL_CHANNELS;
        let got = output.len();
        let mut output =
            ArrayViewMut2::from_shape((frames, BINAURAL_CHANNELS), &mut output[..out_len])
                .map_err(|_| AmbiError::BufferSizeMismatch {
                    expected: out_len,
                    got,
                })?;

        // [frames x N] * [N x 2] -> [frames x 2]
        general_mat_mul(1.0, &input, &self.decode_matrix.t(), 0.0, &mut output);

        Ok(())
    }

    fn reset(&mut self) {}

    fn descriptor(&self) -> ProcessorDescriptor {
        ProcessorDescriptor {
            name: format!("AmbiBin{}", self.order),
            input_channels: self.num_input_channels,
            output_channels: BINAURAL_CHANNELS,
            description: format!(
                "Order-{} ambisonics binaural decoder. \
                 {} inputs (ACN/SN3D), 2 outputs (L/R headphone).",
                self.order, self.num_input_channels
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_decoder_creation() {
        let decoder = BinauralDecoder::new(AmbisonicOrder::First);
        assert_eq!(decoder.channel_count(), 4);
        assert_eq!(decoder.matrix().dim(), (2, 4));
        assert!(BinauralDecoder::from_order(8).is_err());
        assert_eq!(BinauralDecoder::from_order(7).unwrap().channel_count(), 64);
    }

    #[test]
    fn test_omni_only_gives_half() {
        let mut decoder = BinauralDecoder::new(AmbisonicOrder::First);
        let frames = 32;
        let mut input = vec![0.0f32; frames * 4];
        for f in 0..frames {
            input[f * 4] = 1.0;
        }
        let mut output = vec![9.0f32; frames * 2];
        decoder.process(&input, &mut output, frames).unwrap();

        for frame in output.chunks_exact(2) {
            assert_eq!(frame[0], 0.5);
            assert_eq!(frame[1], 0.5);
        }
    }

    #[test]
    fn test_left_source_louder_left() {
        let mut decoder = BinauralDecoder::new(AmbisonicOrder::First);
        // Positive Y is to the left in ACN
        let input = [1.0f32, 1.0, 0.0, 0.0];
        let mut output = [0.0f32; 2];
        decoder.process(&input, &mut output, 1).unwrap();
        assert!(output[0] > output[1]);
        assert_abs_diff_eq!(output[0], 0.5 + 0.17727273, epsilon = 1e-6);
    }

    #[test]
    fn test_block_matches_frame_decode() {
        let mut decoder = BinauralDecoder::new(AmbisonicOrder::Fifth);
        let n = decoder.channel_count();
        let frames = 16;
        let input: Vec<f32> = (0..frames * n)
            .map(|i| ((i * 37 % 101) as f32 / 50.0) - 1.0)
            .collect();
        let mut output = vec![0.0f32; frames * 2];
        decoder.process(&input, &mut output, frames).unwrap();

        for f in 0..frames {
            let (l, r) = decoder.decode_frame(&input[f * n..(f + 1) * n]);
            assert_abs_diff_eq!(output[f * 2], l, epsilon = 1e-5);
            assert_abs_diff_eq!(output[f * 2 + 1], r, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_linearity() {
        let mut decoder = BinauralDecoder::new(AmbisonicOrder::Third);
        let a: Vec<f32> = (0..16).map(|i| (i as f32 * 0.3).sin()).collect();
        let b: Vec<f32> = (0..16).map(|i| (i as f32 * 0.7).cos()).collect();
        let sum: Vec<f32> = a.iter().zip(&b).map(|(x, y)| x + y).collect();

        let mut out_a = [0.0f32; 2];
        let mut out_b = [0.0f32; 2];
        let mut out_sum = [0.0f32; 2];
        decoder.process(&a, &mut out_a, 1).unwrap();
        decoder.process(&b, &mut out_b, 1).unwrap();
        decoder.process(&sum, &mut out_sum, 1).unwrap();

        assert_abs_diff_eq!(out_sum[0], out_a[0] + out_b[0], epsilon = 1e-5);
        assert_abs_diff_eq!(out_sum[1], out_a[1] + out_b[1], epsilon = 1e-5);
    }

    #[test]
    fn test_short_buffers_rejected() {
        let mut decoder = BinauralDecoder::new(AmbisonicOrder::Second);
        let input = [0.0f32; 18];
        let mut output = [0.0f32; 4];
        assert!(decoder.process(&input, &mut output, 2).is_ok());
        assert!(decoder.process(&input, &mut output, 3).is_err());
        assert!(decoder.process(&input, &mut output[..3], 2).is_err());
    }

    #[test]
    #[should_panic]
    fn test_decode_frame_short_frame_panics() {
        let decoder = BinauralDecoder::new(AmbisonicOrder::Second);
        decoder.decode_frame(&[1.0; 4]);
    }

    #[test]
    fn test_descriptor() {
        let d = BinauralDecoder::new(AmbisonicOrder::Third).descriptor();
        assert_eq!(d.name, "AmbiBin3");
        assert_eq!(d.input_channels, 16);
        assert_eq!(d.output_channels, 2);
    }
}
