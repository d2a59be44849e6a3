//! Block processing interface shared by encoders, decoders and chains

use serde::Serialize;

use crate::error::{AmbiError, AmbiResult};

/// Static description of a processor, as a host would register it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorDescriptor {
    /// Class name (e.g. "AmbiEnc3")
    pub name: String,
    /// Input channel width
    pub input_channels: usize,
    /// Output channel width
    pub output_channels: usize,
    /// One-line description
    pub description: String,
}

/// Frame-interleaved block processor.
///
/// Buffers hold `frames` frames; frame `f` occupies
/// `buf[f * width..(f + 1) * width]` for the side's channel width.
pub trait AmbiProcessor: Send {
    /// Channels per input frame
    fn input_channels(&self) -> usize;

    /// Channels per output frame
    fn output_channels(&self) -> usize;

    /// Process `frames` frames from `input` into `output`
    fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize) -> AmbiResult<()>;

    /// Drop any in-flight transition state
    fn reset(&mut self);

    /// Registration metadata
    fn descriptor(&self) -> ProcessorDescriptor;
}

/// Verify both buffers hold at least `frames` frames at the given widths
pub(crate) fn check_buffers(
    input: &[f32],
    input_width: usize,
    output: &[f32],
    output_width: usize,
    frames: usize,
) -> AmbiResult<()> {
    let expected_in = frames * input_width;
    if input.len() < expected_in {
        return Err(AmbiError::BufferSizeMismatch {
            expected: expected_in,
            got: input.len(),
        });
    }

    let expected_out = frames * output_width;
    if output.len() < expected_out {
        return Err(AmbiError::BufferSizeMismatch {
            expected: expected_out,
            got: output.len(),
        });
    }

    Ok(())
}
