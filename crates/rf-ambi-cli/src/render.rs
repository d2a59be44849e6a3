//! Offline block renderers

use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use rf_ambi::{
    AmbiProcessor, AmbisonicOrder, BINAURAL_CHANNELS, BinauralDecoder, BinauralPanner,
    EncoderConfig, SphericalHarmonicEncoder,
};
use serde::{Deserialize, Serialize};

/// Default processing block in frames
pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// Settings for an offline render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(flatten)]
    pub encoder: EncoderConfig,
    /// Frames handed to the processor per call
    pub block_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl RenderConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

/// Linear pan trajectory, applied once per block
#[derive(Debug, Clone, Copy, Default)]
pub struct Sweep {
    pub azimuth_end: Option<f64>,
    pub elevation_end: Option<f64>,
}

impl Sweep {
    fn is_static(&self) -> bool {
        self.azimuth_end.is_none() && self.elevation_end.is_none()
    }

    /// Position at `t` in [0, 1]
    fn at(&self, start_az: f64, start_el: f64, t: f64) -> (f64, f64) {
        let lerp = |a: f64, b: Option<f64>| b.map_or(a, |b| a + (b - a) * t);
        (lerp(start_az, self.azimuth_end), lerp(start_el, self.elevation_end))
    }
}

/// Drive any processor over mono input block by block, moving the source per block
fn run_blocks<P, F>(
    processor: &mut P,
    input: &[f32],
    block_size: usize,
    mut move_source: F,
) -> Result<Vec<f32>>
where
    P: AmbiProcessor,
    F: FnMut(&mut P, f64),
{
    ensure!(block_size > 0, "block size must be at least 1");

    let in_w = processor.input_channels();
    let out_w = processor.output_channels();
    let frames = input.len() / in_w;
    let blocks = frames.div_ceil(block_size);
    let mut output = vec![0.0f32; frames * out_w];

    for b in 0..blocks {
        let start = b * block_size;
        let len = block_size.min(frames - start);
        let t = if blocks > 1 {
            b as f64 / (blocks - 1) as f64
        } else {
            0.0
        };
        move_source(processor, t);
        processor.process(
            &input[start * in_w..(start + len) * in_w],
            &mut output[start * out_w..(start + len) * out_w],
            len,
        )?;
    }
    Ok(output)
}

/// Encode mono into an ambisonic stream of `config.encoder.order`
pub fn encode(mono: &[f32], config: &RenderConfig, sweep: Sweep) -> Result<(Vec<f32>, usize)> {
    let mut encoder = config.encoder.build()?;
    let channels = encoder.channel_count();
    let (az, el) = (config.encoder.azimuth, config.encoder.elevation);

    let output = run_blocks(&mut encoder, mono, config.block_size, |enc, t| {
        if !sweep.is_static() {
            steer(enc, sweep.at(az, el, t));
        }
    })?;
    log::info!(
        "encoded {} frames to {} channels, {} ramps",
        mono.len(),
        channels,
        encoder.ramps_started()
    );
    Ok((output, channels))
}

/// Encode mono and fold straight to binaural stereo
pub fn binaural(mono: &[f32], config: &RenderConfig, sweep: Sweep) -> Result<Vec<f32>> {
    let mut panner = BinauralPanner::with_max_block(config.encoder.build()?, config.block_size);
    let (az, el) = (config.encoder.azimuth, config.encoder.elevation);

    let output = run_blocks(&mut panner, mono, config.block_size, |p, t| {
        if !sweep.is_static() {
            steer(p.encoder_mut(), sweep.at(az, el, t));
        }
    })?;
    log::info!("rendered {} frames binaural at order {}", mono.len(), panner.decoder().order());
    Ok(output)
}

/// Decode an interleaved ambisonic stream to stereo
pub fn decode(
    ambi: &[f32],
    channels: usize,
    order: Option<usize>,
    block_size: usize,
) -> Result<Vec<f32>> {
    let order = match order {
        Some(o) => AmbisonicOrder::from_order(o)?,
        None => order_for_channels(channels)?,
    };
    ensure!(
        order.channel_count() == channels,
        "order {} expects {} channels, input has {}",
        order,
        order.channel_count(),
        channels
    );

    let mut decoder = BinauralDecoder::new(order);
    let output = run_blocks(&mut decoder, ambi, block_size, |_, _| {})?;
    log::info!(
        "decoded {} frames to {} channels",
        output.len() / BINAURAL_CHANNELS,
        BINAURAL_CHANNELS
    );
    Ok(output)
}

/// Full-sphere order from an ACN channel count
pub fn order_for_channels(channels: usize) -> Result<AmbisonicOrder> {
    let side = (channels as f64).sqrt().round() as usize;
    if side * side != channels || side < 2 {
        bail!("{channels} channels is not a full-sphere ambisonic layout");
    }
    Ok(AmbisonicOrder::from_order(side - 1)?)
}

fn steer(encoder: &mut SphericalHarmonicEncoder, (azimuth, elevation): (f64, f64)) {
    encoder.set_azimuth(azimuth);
    encoder.set_elevation(elevation);
}
