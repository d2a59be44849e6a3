//! WAV loading and writing

use std::path::Path;

use anyhow::{Context, Result, bail};

/// Interleaved audio loaded from disk
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples, frame-major
    pub samples: Vec<f32>,
    /// Channels per frame
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Number of frames
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Average all channels into one
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }
        let scale = 1.0 / self.channels as f32;
        self.samples
            .chunks_exact(self.channels)
            .map(|frame| frame.iter().sum::<f32>() * scale)
            .collect()
    }
}

/// Load a WAV file (integer or float) as f32
pub fn load_wav(path: &Path) -> Result<AudioData> {
    let reader =
        hound::WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;

    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("{}: no channels", path.display());
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("reading {}", path.display()))?,
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("reading {}", path.display()))?
        }
    };

    log::debug!(
        "loaded {}: {} ch, {} Hz, {} samples",
        path.display(),
        spec.channels,
        spec.sample_rate,
        samples.len()
    );

    Ok(AudioData {
        samples,
        channels: spec.channels as usize,
        sample_rate: spec.sample_rate,
    })
}

/// Write interleaved f32 samples as 32-bit float WAV
pub fn write_wav(path: &Path, samples: &[f32], channels: usize, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: u16::try_from(channels).context("too many channels for WAV")?,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("creating {}", path.display()))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer
        .finalize()
        .with_context(|| format!("finalizing {}", path.display()))?;

    log::debug!("wrote {}: {} ch, {} samples", path.display(), channels, samples.len());
    Ok(())
}
