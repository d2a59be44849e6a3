//! Ambisonic order and ACN channel numbering

use serde::{Deserialize, Serialize};

use crate::error::{AmbiError, AmbiResult};

/// Highest supported order
pub const MAX_ORDER: usize = 7;

/// Channel count at the highest supported order
pub const MAX_CHANNELS: usize = (MAX_ORDER + 1) * (MAX_ORDER + 1);

/// Ambisonic order (determines spatial resolution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum AmbisonicOrder {
    /// First order (4 channels) - basic 3D
    First = 1,
    /// Second order (9 channels) - good localization
    Second = 2,
    /// Third order (16 channels) - high quality
    Third = 3,
    /// Fourth order (25 channels) - studio quality
    Fourth = 4,
    /// Fifth order (36 channels) - theatrical
    Fifth = 5,
    /// Sixth order (49 channels) - research
    Sixth = 6,
    /// Seventh order (64 channels) - maximum
    Seventh = 7,
}

impl AmbisonicOrder {
    /// All supported orders, lowest first
    pub const ALL: [AmbisonicOrder; MAX_ORDER] = [
        AmbisonicOrder::First,
        AmbisonicOrder::Second,
        AmbisonicOrder::Third,
        AmbisonicOrder::Fourth,
        AmbisonicOrder::Fifth,
        AmbisonicOrder::Sixth,
        AmbisonicOrder::Seventh,
    ];

    /// Get channel count for this order
    pub fn channel_count(&self) -> usize {
        let n = *self as usize;
        (n + 1) * (n + 1)
    }

    /// Create from order number
    pub fn from_order(order: usize) -> AmbiResult<Self> {
        match order {
            1 => Ok(AmbisonicOrder::First),
            2 => Ok(AmbisonicOrder::Second),
            3 => Ok(AmbisonicOrder::Third),
            4 => Ok(AmbisonicOrder::Fourth),
            5 => Ok(AmbisonicOrder::Fifth),
            6 => Ok(AmbisonicOrder::Sixth),
            7 => Ok(AmbisonicOrder::Seventh),
            _ => Err(AmbiError::InvalidOrder(order)),
        }
    }

    /// Get order number
    pub fn as_usize(&self) -> usize {
        *self as usize
    }

    /// Row of the per-order constant tables
    pub fn index(&self) -> usize {
        self.as_usize() - 1
    }
}

impl TryFrom<usize> for AmbisonicOrder {
    type Error = AmbiError;

    fn try_from(order: usize) -> AmbiResult<Self> {
        Self::from_order(order)
    }
}

impl From<AmbisonicOrder> for usize {
    fn from(order: AmbisonicOrder) -> usize {
        order.as_usize()
    }
}

impl std::fmt::Display for AmbisonicOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

/// ACN channel index of spherical harmonic degree `l`, index `m` (`-l <= m <= l`)
pub fn acn_index(l: i32, m: i32) -> usize {
    (l * l + l + m) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count() {
        assert_eq!(AmbisonicOrder::First.channel_count(), 4);
        assert_eq!(AmbisonicOrder::Second.channel_count(), 9);
        assert_eq!(AmbisonicOrder::Third.channel_count(), 16);
        assert_eq!(AmbisonicOrder::Seventh.channel_count(), MAX_CHANNELS);
    }

    #[test]
    fn test_from_order_rejects_out_of_range() {
        assert!(matches!(
            AmbisonicOrder::from_order(0),
            Err(AmbiError::InvalidOrder(0))
        ));
        assert!(matches!(
            AmbisonicOrder::from_order(8),
            Err(AmbiError::InvalidOrder(8))
        ));
        for (i, order) in AmbisonicOrder::ALL.iter().enumerate() {
            assert_eq!(AmbisonicOrder::from_order(i + 1).unwrap(), *order);
            assert_eq!(order.index(), i);
        }
    }

    #[test]
    fn test_acn_index() {
        assert_eq!(acn_index(0, 0), 0); // W
        assert_eq!(acn_index(1, -1), 1); // Y
        assert_eq!(acn_index(1, 0), 2); // Z
        assert_eq!(acn_index(1, 1), 3); // X
        assert_eq!(acn_index(2, -2), 4);
        assert_eq!(acn_index(7, -7), 49);
        assert_eq!(acn_index(7, 7), 63);
    }

    #[test]
    fn test_serde_as_number() {
        let order: AmbisonicOrder = serde_json::from_str("3").unwrap();
        assert_eq!(order, AmbisonicOrder::Third);
        assert!(serde_json::from_str::<AmbisonicOrder>("9").is_err());
        assert_eq!(serde_json::to_string(&AmbisonicOrder::Fifth).unwrap(), "5");
    }
}
