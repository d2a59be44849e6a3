//! Serializable construction settings

use serde::{Deserialize, Serialize};

use crate::decoder::BinauralDecoder;
use crate::encoder::{BoundsMode, DEFAULT_UPDATE_PERIOD, SphericalHarmonicEncoder};
use crate::error::AmbiResult;
use crate::order::AmbisonicOrder;
use crate::processor::AmbiProcessor;

/// Encoder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Ambisonic order (1-7)
    pub order: usize,
    /// Ramp length in samples; values below 1 are clamped
    pub update_period: i64,
    /// Angle interpretation
    pub bounds: BoundsMode,
    /// Initial azimuth, in `bounds` units
    pub azimuth: f64,
    /// Initial elevation, in `bounds` units
    pub elevation: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            order: 1,
            update_period: DEFAULT_UPDATE_PERIOD as i64,
            bounds: BoundsMode::Normalized,
            azimuth: 0.0,
            elevation: 0.0,
        }
    }
}

impl EncoderConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> AmbiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build an encoder already settled on the initial direction
    pub fn build(&self) -> AmbiResult<SphericalHarmonicEncoder> {
        let order = AmbisonicOrder::from_order(self.order)?;
        let mut encoder =
            SphericalHarmonicEncoder::with_settings(order, self.update_period, self.bounds);
        encoder.set_azimuth(self.azimuth);
        encoder.set_elevation(self.elevation);
        encoder.reset();
        Ok(encoder)
    }
}

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Ambisonic order (1-7)
    pub order: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { order: 1 }
    }
}

impl DecoderConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> AmbiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build a decoder
    pub fn build(&self) -> AmbiResult<BinauralDecoder> {
        BinauralDecoder::from_order(self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmbiError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = EncoderConfig::from_json(r#"{ "order": 3 }"#).unwrap();
        assert_eq!(config.order, 3);
        assert_eq!(config.update_period, 64);
        assert_eq!(config.bounds, BoundsMode::Normalized);
    }

    #[test]
    fn test_build_settles_on_initial_direction() {
        let config = EncoderConfig {
            order: 2,
            update_period: 0,
            bounds: BoundsMode::Normalized,
            azimuth: 0.5,
            elevation: 0.0,
        };
        let encoder = config.build().unwrap();
        assert_eq!(encoder.update_period(), 1);
        assert_abs_diff_eq!(encoder.azimuth(), PI / 2.0, epsilon = 1e-12);
        assert!(!encoder.is_change_pending());
        assert_eq!(encoder.samples_remaining(), 0);
        assert_abs_diff_eq!(encoder.current_gains()[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_order_rejected() {
        let config = EncoderConfig {
            order: 9,
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(AmbiError::InvalidOrder(9))));
        assert!(DecoderConfig { order: 0 }.build().is_err());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            EncoderConfig::from_json(r#"{ "bounds": "degrees" }"#),
            Err(AmbiError::Config(_))
        ));
        let decoder = DecoderConfig::from_json(r#"{ "order": 5 }"#).unwrap().build().unwrap();
        assert_eq!(decoder.channel_count(), 36);
    }
}
