//! rf-ambi - offline Ambisonics renderer
//!
//! Usage:
//!   rf-ambi encode in.wav out.wav --order 3 --azimuth 0.25
//!   rf-ambi decode ambi.wav stereo.wav
//!   rf-ambi binaural in.wav stereo.wav --azimuth -0.5 --azimuth-end 0.5
//!   rf-ambi info --order 7

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rf_ambi::{
    AmbiProcessor, AmbisonicOrder, BINAURAL_CHANNELS, BoundsMode, channel_layout, registry,
};
use rf_ambi_cli::{RenderConfig, Sweep, load_wav, render, write_wav};

#[derive(Parser)]
#[command(name = "rf-ambi", version, about = "ReelForge Ambisonics renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a mono file to ACN/SN3D Ambisonics
    Encode {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        pan: PanArgs,
    },
    /// Decode an Ambisonic file to binaural stereo
    Decode {
        input: PathBuf,
        output: PathBuf,
        /// Ambisonic order (inferred from channel count when omitted)
        #[arg(short, long)]
        order: Option<usize>,
        /// Frames per processing block
        #[arg(long, default_value_t = rf_ambi_cli::DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },
    /// Encode and decode in one pass: mono in, binaural stereo out
    Binaural {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        pan: PanArgs,
    },
    /// List processors and their channel layouts
    Info {
        /// Only show this order
        #[arg(short, long)]
        order: Option<usize>,
    },
}

#[derive(Args)]
struct PanArgs {
    /// JSON render settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Ambisonic order (1-7)
    #[arg(short, long)]
    order: Option<usize>,
    /// Ramp length in samples
    #[arg(long)]
    update_period: Option<i64>,
    /// Angle interpretation
    #[arg(long, value_enum)]
    bounds: Option<Bounds>,
    /// Source azimuth
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,
    /// Source elevation
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,
    /// Azimuth at the end of the file (linear sweep)
    #[arg(long, allow_hyphen_values = true)]
    azimuth_end: Option<f64>,
    /// Elevation at the end of the file (linear sweep)
    #[arg(long, allow_hyphen_values = true)]
    elevation_end: Option<f64>,
    /// Frames per processing block
    #[arg(long)]
    block_size: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Bounds {
    Normalized,
    Radians,
}

impl From<Bounds> for BoundsMode {
    fn from(b: Bounds) -> Self {
        match b {
            Bounds::Normalized => BoundsMode::Normalized,
            Bounds::Radians => BoundsMode::Radians,
        }
    }
}

impl PanArgs {
    fn resolve(&self) -> Result<(RenderConfig, Sweep)> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };

        if let Some(order) = self.order {
            config.encoder.order = order;
        }
        if let Some(period) = self.update_period {
            config.encoder.update_period = period;
        }
        if let Some(bounds) = self.bounds {
            config.encoder.bounds = bounds.into();
        }
        if let Some(azimuth) = self.azimuth {
            config.encoder.azimuth = azimuth;
        }
        if let Some(elevation) = self.elevation {
            config.encoder.elevation = elevation;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }

        let sweep = Sweep {
            azimuth_end: self.azimuth_end,
            elevation_end: self.elevation_end,
        };
        log::debug!("render config: {config:?}, sweep: {sweep:?}");
        Ok((config, sweep))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            pan,
        } => run_encode(&input, &output, &pan),
        Commands::Decode {
            input,
            output,
            order,
            block_size,
        } => run_decode(&input, &output, order, block_size),
        Commands::Binaural {
            input,
            output,
            pan,
        } => run_binaural(&input, &output, &pan),
        Commands::Info { order } => print_info(order),
    }
}

fn run_encode(input: &Path, output: &Path, pan: &PanArgs) -> Result<()> {
    let (config, sweep) = pan.resolve()?;
    let audio = load_wav(input)?;
    if audio.channels > 1 {
        log::warn!("{}: mixing {} channels to mono", input.display(), audio.channels);
    }

    let (ambi, channels) = render::encode(&audio.to_mono(), &config, sweep)?;
    write_wav(output, &ambi, channels, audio.sample_rate)?;
    println!(
        "Encoded {} -> {} ({} channels, order {})",
        input.display(),
        output.display(),
        channels,
        config.encoder.order
    );
    Ok(())
}

fn run_decode(input: &Path, output: &Path, order: Option<usize>, block_size: usize) -> Result<()> {
    let audio = load_wav(input)?;
    let stereo = render::decode(&audio.samples, audio.channels, order, block_size)
        .with_context(|| format!("decoding {}", input.display()))?;
    write_wav(output, &stereo, BINAURAL_CHANNELS, audio.sample_rate)?;
    println!("Decoded {} -> {}", input.display(), output.display());
    Ok(())
}

fn run_binaural(input: &Path, output: &Path, pan: &PanArgs) -> Result<()> {
    let (config, sweep) = pan.resolve()?;
    let audio = load_wav(input)?;
    if audio.channels > 1 {
        log::warn!("{}: mixing {} channels to mono", input.display(), audio.channels);
    }

    let stereo = render::binaural(&audio.to_mono(), &config, sweep)?;
    write_wav(output, &stereo, BINAURAL_CHANNELS, audio.sample_rate)?;
    println!("Rendered {} -> {}", input.display(), output.display());
    Ok(())
}

fn print_info(order: Option<usize>) -> Result<()> {
    let filter = order.map(AmbisonicOrder::from_order).transpose()?;

    for descriptor in registry() {
        let channels = descriptor.input_channels.max(descriptor.output_channels);
        if filter.is_some_and(|o| o.channel_count() != channels) {
            continue;
        }
        println!(
            "{:<10} {:>2} in  {:>2} out  {}",
            descriptor.name,
            descriptor.input_channels,
            descriptor.output_channels,
            descriptor.description
        );
    }

    if let Some(o) = filter {
        let encoder = rf_ambi::SphericalHarmonicEncoder::new(o);
        println!(
            "\norder {o}: {} channels, ramp {} samples",
            encoder.output_channels(),
            encoder.update_period()
        );
        println!(
            "{:>4} {:>3} {:>3} {:>12} {:>11} {:>11}",
            "acn", "l", "m", "norm", "left", "right"
        );
        for ch in channel_layout(o) {
            println!(
                "{:>4} {:>3} {:>3} {:>12.6} {:>11.8} {:>11.8}",
                ch.acn, ch.degree, ch.index, ch.normalization, ch.left, ch.right
            );
        }
        let json = serde_json::to_string_pretty(&RenderConfig {
            encoder: rf_ambi::EncoderConfig {
                order: o.as_usize(),
                ..Default::default()
            },
            ..Default::default()
        })?;
        println!("{json}");
    }
    Ok(())
}
