//! Configuration for zone generation

use navzone_common::{Error, Result};

/// Default vertex welding tolerance
pub const DEFAULT_WELD_TOLERANCE: f32 = 1e-4;

/// Largest supported value for [`ZoneConfig::round_decimals`]
pub const MAX_ROUND_DECIMALS: u32 = 6;

/// Configuration parameters for zone generation
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneConfig {
    /// Vertices closer than this (per axis bucket) are welded into one
    pub weld_tolerance: f32,
    /// Decimal places kept on welded vertices and node centroids
    pub round_decimals: u32,
    /// Drop triangles that collapse to fewer than 3 distinct vertices after
    /// welding, or that have zero area
    pub discard_degenerate: bool,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            round_decimals: 2,
            discard_degenerate: false,
        }
    }
}

impl ZoneConfig {
    /// Creates a new ZoneConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default configuration with the given weld tolerance
    pub fn with_tolerance(weld_tolerance: f32) -> Self {
        Self {
            weld_tolerance,
            ..Self::default()
        }
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.weld_tolerance.is_finite() && self.weld_tolerance >= f32::EPSILON) {
            return Err(Error::InvalidTolerance(self.weld_tolerance));
        }

        if self.round_decimals > MAX_ROUND_DECIMALS {
            return Err(Error::InvalidConfig(format!(
                "round_decimals {} exceeds {}",
                self.round_decimals, MAX_ROUND_DECIMALS
            )));
        }

        Ok(())
    }
}
