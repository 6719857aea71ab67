//! Deployment profiles.
//!
//! A `GameConfig` is passed to the `with_config` constructor (or built by
//! `new` / `fast`) and stored read-only in contract storage.

use crate::Balance;

// =========================================================================
// CONSTANTS
// =========================================================================

/// Largest accepted board side. 64 × 64 = 4 096 cells.
pub const MAX_GRID_SIDE: u32 = 64;

/// Starting price of a stroke in base units.
pub const DEFAULT_INITIAL_PRICE: Balance = 1_000_000_000_000;

/// Price growth per accepted stroke: 1% = 100 BPS.
pub const DEFAULT_PRICE_STEP_BPS: u32 = 100;

// ── Production profile ───────────────────────────────────────────────────

pub const PRODUCTION_GRID_SIDE: u32 = 16;
pub const PRODUCTION_INACTIVITY_SECS: u64 = 600;

// ── Fast-iteration profile ───────────────────────────────────────────────

pub const FAST_GRID_SIDE: u32 = 2;
pub const FAST_INACTIVITY_SECS: u64 = 5;

// =========================================================================
// TYPES
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct GameConfig {
    /// Board dimension; the board has `grid_side²` cells.
    pub grid_side: u32,
    /// Seconds without a paint before the time bank unlocks.
    pub inactivity_threshold_secs: u64,
    /// Price of the first stroke.
    pub initial_price: Balance,
    /// Growth of the price after each stroke, in basis points.
    pub price_step_bps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum ConfigError {
    /// `grid_side` is zero.
    EmptyGrid,
    /// `grid_side` exceeds `MAX_GRID_SIDE`.
    GridTooLarge,
    /// `inactivity_threshold_secs` is zero.
    ZeroInactivityThreshold,
    /// `initial_price` is zero.
    ZeroInitialPrice,
    /// `price_step_bps` is zero.
    ZeroPriceStep,
}

impl GameConfig {
    pub const fn production() -> Self {
        Self {
            grid_side: PRODUCTION_GRID_SIDE,
            inactivity_threshold_secs: PRODUCTION_INACTIVITY_SECS,
            initial_price: DEFAULT_INITIAL_PRICE,
            price_step_bps: DEFAULT_PRICE_STEP_BPS,
        }
    }

    /// Small board and short threshold for local iteration and testnets.
    pub const fn fast() -> Self {
        Self {
            grid_side: FAST_GRID_SIDE,
            inactivity_threshold_secs: FAST_INACTIVITY_SECS,
            initial_price: DEFAULT_INITIAL_PRICE,
            price_step_bps: DEFAULT_PRICE_STEP_BPS,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_side == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_side > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge);
        }
        if self.inactivity_threshold_secs == 0 {
            return Err(ConfigError::ZeroInactivityThreshold);
        }
        if self.initial_price == 0 {
            return Err(ConfigError::ZeroInitialPrice);
        }
        if self.price_step_bps == 0 {
            return Err(ConfigError::ZeroPriceStep);
        }
        Ok(())
    }

    /// Number of cells on the board.
    pub const fn grid_cells(&self) -> u32 {
        self.grid_side * self.grid_side
    }

    /// Inactivity threshold in the millisecond unit of block timestamps.
    pub const fn inactivity_threshold_ms(&self) -> u64 {
        self.inactivity_threshold_secs.saturating_mul(1_000)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::production()
    }
}
