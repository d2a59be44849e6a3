//! Spherical harmonic encoder - mono source to ACN/SN3D Ambisonics
//!
//! Pan changes never jump: every new direction is reached through a linear
//! gain ramp lasting exactly `update_period` samples. A direction committed
//! while a ramp is running waits until that ramp finishes.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{AmbiError, AmbiResult};
use crate::harmonics::compute_sn3d_gains;
use crate::order::{AmbisonicOrder, MAX_CHANNELS};
use crate::processor::{AmbiProcessor, ProcessorDescriptor, check_buffers};

/// Default ramp length in samples
pub const DEFAULT_UPDATE_PERIOD: usize = 64;

/// How angle arguments are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsMode {
    /// [-1, 1] maps linearly onto [-π, π]
    #[default]
    Normalized = 0,
    /// Angles are radians, used as-is
    Radians = 1,
}

impl BoundsMode {
    /// Raw value of [`BoundsMode::Normalized`]
    pub const NORMALIZED: i64 = 0;
    /// Raw value of [`BoundsMode::Radians`]
    pub const RADIANS: i64 = 1;

    /// Raw integer value
    pub fn as_raw(&self) -> i64 {
        *self as i64
    }

    /// Map an angle argument to radians
    #[inline]
    pub fn to_radians(&self, value: f64) -> f64 {
        match self {
            BoundsMode::Normalized => scale_range(value, -1.0, 1.0, -PI, PI),
            BoundsMode::Radians => value,
        }
    }
}

impl TryFrom<i64> for BoundsMode {
    type Error = AmbiError;

    fn try_from(raw: i64) -> AmbiResult<Self> {
        match raw {
            Self::NORMALIZED => Ok(BoundsMode::Normalized),
            Self::RADIANS => Ok(BoundsMode::Radians),
            _ => Err(AmbiError::InvalidBoundsMode(raw)),
        }
    }
}

/// Linear map of `x` from [in_min, in_max] to [out_min, out_max]
#[inline]
pub fn scale_range(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Mono to N-channel Ambisonics encoder with click-free panning
#[derive(Debug, Clone)]
pub struct SphericalHarmonicEncoder {
    /// Ambisonic order
    order: AmbisonicOrder,
    /// Number of output channels
    num_channels: usize,
    /// Committed azimuth (radians)
    azimuth: f64,
    /// Committed elevation (radians)
    elevation: f64,
    /// Angle interpretation
    bounds: BoundsMode,
    /// Ramp length in samples, >= 1
    update_period: usize,
    /// Gain applied to the current sample
    gain_current: [f64; MAX_CHANNELS],
    /// Gain for the committed direction
    gain_target: [f64; MAX_CHANNELS],
    /// Per-sample increment while ramping
    gain_step: [f64; MAX_CHANNELS],
    /// Samples left in the running ramp
    samples_remaining: usize,
    /// Direction changed since the last ramp started
    pending_change: bool,
    /// Number of ramps started
    ramps_started: u64,
}

impl SphericalHarmonicEncoder {
    /// Create encoder with default period (64) and normalized bounds
    pub fn new(order: AmbisonicOrder) -> Self {
        Self::with_settings(order, DEFAULT_UPDATE_PERIOD as i64, BoundsMode::Normalized)
    }

    /// Create encoder from a numeric order
    pub fn from_order(order: usize) -> AmbiResult<Self> {
        Ok(Self::new(AmbisonicOrder::from_order(order)?))
    }

    /// Create encoder with explicit ramp length and bounds mode.
    ///
    /// `update_period` below 1 is clamped to 1.
    pub fn with_settings(order: AmbisonicOrder, update_period: i64, bounds: BoundsMode) -> Self {
        let mut encoder = Self {
            order,
            num_channels: order.channel_count(),
            azimuth: 0.0,
            elevation: 0.0,
            bounds,
            update_period: clamp_period(order, update_period),
            gain_current: [0.0; MAX_CHANNELS],
            gain_target: [0.0; MAX_CHANNELS],
            gain_step: [0.0; MAX_CHANNELS],
            samples_remaining: 0,
            pending_change: false,
            ramps_started: 0,
        };

        encoder.compute_gains();
        encoder.gain_current = encoder.gain_target;

        log::debug!(
            "AmbiEnc{}: {} channels, update period {}, bounds {:?}",
            order,
            encoder.num_channels,
            encoder.update_period,
            bounds
        );

        encoder
    }

    // ============ Pan ============

    /// Commit a new azimuth; returns the committed value in radians.
    ///
    /// Re-committing the current azimuth does not start a ramp.
    pub fn set_azimuth(&mut self, azimuth: f64) -> f64 {
        let a = self.bounds.to_radians(azimuth);
        if a != self.azimuth {
            self.azimuth = a;
            self.pending_change = true;
        }
        self.azimuth
    }

    /// Committed azimuth (radians)
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Commit a new elevation; returns the committed value in radians
    pub fn set_elevation(&mut self, elevation: f64) -> f64 {
        let e = self.bounds.to_radians(elevation);
        if e != self.elevation {
            self.elevation = e;
            self.pending_change = true;
        }
        self.elevation
    }

    /// Committed elevation (radians)
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Commit both angles. Always schedules a ramp, even if nothing changed.
    pub fn pan(&mut self, azimuth: f64, elevation: f64) -> (f64, f64) {
        self.azimuth = self.bounds.to_radians(azimuth);
        self.elevation = self.bounds.to_radians(elevation);
        self.pending_change = true;
        (self.azimuth, self.elevation)
    }

    // ============ Settings ============

    /// Set ramp length; returns the effective period.
    ///
    /// Abandons the running ramp: gains stay where they are until the next
    /// committed change.
    pub fn set_update_period(&mut self, period: i64) -> usize {
        self.update_period = clamp_period(self.order, period);
        self.samples_remaining = 0;
        self.gain_step = [0.0; MAX_CHANNELS];
        log::debug!("AmbiEnc{}: update period {}", self.order, self.update_period);
        self.update_period
    }

    /// Ramp length in samples
    pub fn update_period(&self) -> usize {
        self.update_period
    }

    /// Set bounds mode from its raw value. Unknown values leave the mode unchanged.
    pub fn set_bounds_mode(&mut self, raw: i64) -> AmbiResult<BoundsMode> {
        match BoundsMode::try_from(raw) {
            Ok(mode) => {
                self.set_bounds(mode);
                Ok(mode)
            }
            Err(err) => {
                log::warn!("AmbiEnc{}: rejected bounds mode {}", self.order, raw);
                Err(err)
            }
        }
    }

    /// Set bounds mode
    pub fn set_bounds(&mut self, mode: BoundsMode) {
        self.bounds = mode;
        log::debug!("AmbiEnc{}: bounds {:?}", self.order, mode);
    }

    /// Current bounds mode
    pub fn bounds(&self) -> BoundsMode {
        self.bounds
    }

    /// Current bounds mode as its raw value
    pub fn bounds_mode_raw(&self) -> i64 {
        self.bounds.as_raw()
    }

    // ============ State ============

    /// Ambisonic order
    pub fn order(&self) -> AmbisonicOrder {
        self.order
    }

    /// Number of output channels
    pub fn channel_count(&self) -> usize {
        self.num_channels
    }

    /// Gains applied to the next sample
    pub fn current_gains(&self) -> &[f64] {
        &self.gain_current[..self.num_channels]
    }

    /// Gains of the direction the running ramp is heading to
    pub fn target_gains(&self) -> &[f64] {
        &self.gain_target[..self.num_channels]
    }

    /// Samples left in the running ramp (0 = settled)
    pub fn samples_remaining(&self) -> usize {
        self.samples_remaining
    }

    /// A committed change is waiting for the next ramp
    pub fn is_change_pending(&self) -> bool {
        self.pending_change
    }

    /// Number of ramps started since construction
    pub fn ramps_started(&self) -> u64 {
        self.ramps_started
    }

    /// Encode one mono frame into `out`, advancing the ramp
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `channel_count()`.
    #[inline]
    pub fn process_frame(&mut self, sample: f32, out: &mut [f32]) {
        let n = self.num_channels;

        if self.samples_remaining == 0 && self.pending_change {
            self.start_ramp();
        }

        let x = sample as f64;
        for (o, g) in out[..n].iter_mut().zip(&self.gain_current[..n]) {
            *o = (g * x) as f32;
        }

        if self.samples_remaining > 0 {
            for (g, step) in self.gain_current[..n].iter_mut().zip(&self.gain_step[..n]) {
                *g += step;
            }
            self.samples_remaining -= 1;

            // Snap to the exact target so summed steps cannot drift
            if self.samples_remaining == 0 {
                self.gain_current[..n].copy_from_slice(&self.gain_target[..n]);
                self.gain_step[..n].fill(0.0);
            }
        }
    }

    fn start_ramp(&mut self) {
        let n = self.num_channels;
        self.compute_gains();

        let period = self.update_period as f64;
        for c in 0..n {
            self.gain_step[c] = (self.gain_target[c] - self.gain_current[c]) / period;
        }

        self.samples_remaining = self.update_period;
        self.pending_change = false;
        self.ramps_started += 1;
    }

    fn compute_gains(&mut self) {
        compute_sn3d_gains(self.order, self.azimuth, self.elevation, &mut self.gain_target);
    }
}

impl AmbiProcessor for SphericalHarmonicEncoder {
    fn input_channels(&self) -> usize {
        1
    }

    fn output_channels(&self) -> usize {
        self.num_channels
    }

    fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize) -> AmbiResult<()> {
        let n = self.num_channels;
        check_buffers(input, 1, output, n, frames)?;

        for (&sample, out) in input[..frames].iter().zip(output.chunks_exact_mut(n)) {
            self.process_frame(sample, out);
        }

        Ok(())
    }

    /// Settle immediately on the committed direction
    fn reset(&mut self) {
        self.compute_gains();
        self.gain_current = self.gain_target;
        self.gain_step = [0.0; MAX_CHANNELS];
        self.samples_remaining = 0;
        self.pending_change = false;
    }

    fn descriptor(&self) -> ProcessorDescriptor {
        ProcessorDescriptor {
            name: format!("AmbiEnc{}", self.order),
            input_channels: 1,
            output_channels: self.num_channels,
            description: format!(
                "Order-{} ambisonics encoder. {} output channels, ACN/SN3D.",
                self.order, self.num_channels
            ),
        }
    }
}

fn clamp_period(order: AmbisonicOrder, period: i64) -> usize {
    if period < 1 {
        log::warn!("AmbiEnc{}: update period {} clamped to 1", order, period);
    }
    period.max(1) as usize
}
