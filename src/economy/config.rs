// ============================================================================
// Economy Configuration
// Tunable constants for earning, offline generation and prestige
// ============================================================================

use crate::numeric::ScaledDecimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default active bonus multiplier at the start of each stage
pub const DEFAULT_ACTIVE_BONUS_BASE: f32 = 1.0;

/// Default global money multiplier
pub const DEFAULT_GLOBAL_MONEY_MULTIPLIER: f32 = 1.0;

/// Duration of one double-cash activation (30 minutes)
pub const DEFAULT_DOUBLE_CASH_DURATION_SECS: f32 = 30.0 * 60.0;

/// Default offline generation window
pub const DEFAULT_OFFLINE_CAP_MINUTES: f32 = 20.0;

/// Hard ceiling on the offline generation window (12 hours)
pub const MAX_OFFLINE_CAP_MINUTES: f32 = 12.0 * 60.0;

/// Default seconds between passive spawns
pub const DEFAULT_PASSIVE_SPAWN_INTERVAL_SECS: f32 = 3.0;

/// Default soldiers per passive spawn
pub const DEFAULT_PASSIVE_SPAWN_PACK_SIZE: f32 = 10.0;

/// Default money value of one soldier
pub const DEFAULT_SOLDIER_VALUE: f32 = 1.0;

/// Default damping factor of the prestige growth table
pub const DEFAULT_PRESTIGE_SLOW_GROWTH: f32 = 0.75;

/// Default number of stages covered by the prestige table
pub const DEFAULT_PRESTIGE_TABLE_LEN: usize = 200;

// ============================================================================
// Economy Configuration
// ============================================================================

/// Economy tuning shared by wallets, offline earnings and prestige
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    /// Active bonus multiplier restored at the start of every stage
    pub active_bonus_base: f32,

    /// Multiplier applied to every bonus-eligible earning
    pub global_money_multiplier: f32,

    /// Seconds added per double-cash activation
    pub double_cash_duration_secs: f32,

    /// Offline generation window in minutes
    pub offline_cap_minutes: f32,

    /// Seconds between passive spawns
    pub passive_spawn_interval_secs: f32,

    /// Soldiers produced per passive spawn
    pub passive_spawn_pack_size: ScaledDecimal,

    /// Money value of one soldier
    pub soldier_value: ScaledDecimal,

    /// Damping factor for the prestige growth table
    pub prestige_slow_growth: f32,

    /// Number of stages covered by the prestige table
    pub prestige_table_len: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            active_bonus_base: DEFAULT_ACTIVE_BONUS_BASE,
            global_money_multiplier: DEFAULT_GLOBAL_MONEY_MULTIPLIER,
            double_cash_duration_secs: DEFAULT_DOUBLE_CASH_DURATION_SECS,
            offline_cap_minutes: DEFAULT_OFFLINE_CAP_MINUTES,
            passive_spawn_interval_secs: DEFAULT_PASSIVE_SPAWN_INTERVAL_SECS,
            passive_spawn_pack_size: ScaledDecimal::new(DEFAULT_PASSIVE_SPAWN_PACK_SIZE),
            soldier_value: ScaledDecimal::new(DEFAULT_SOLDIER_VALUE),
            prestige_slow_growth: DEFAULT_PRESTIGE_SLOW_GROWTH,
            prestige_table_len: DEFAULT_PRESTIGE_TABLE_LEN,
        }
    }
}

impl EconomyConfig {
    /// Create a configuration with the stock tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set global money multiplier
    pub fn with_global_money_multiplier(mut self, multiplier: f32) -> Self {
        self.global_money_multiplier = multiplier;
        self
    }

    /// Builder method: Set active bonus base
    pub fn with_active_bonus_base(mut self, base: f32) -> Self {
        self.active_bonus_base = base;
        self
    }

    /// Builder method: Set offline generation window
    pub fn with_offline_cap_minutes(mut self, minutes: f32) -> Self {
        self.offline_cap_minutes = minutes;
        self
    }

    /// Builder method: Set passive spawn rate
    pub fn with_passive_spawn(mut self, interval_secs: f32, pack_size: ScaledDecimal) -> Self {
        self.passive_spawn_interval_secs = interval_secs;
        self.passive_spawn_pack_size = pack_size;
        self
    }

    /// Builder method: Set soldier value
    pub fn with_soldier_value(mut self, value: ScaledDecimal) -> Self {
        self.soldier_value = value;
        self
    }

    /// Builder method: Set prestige table shape
    pub fn with_prestige(mut self, slow_growth: f32, table_len: usize) -> Self {
        self.prestige_slow_growth = slow_growth;
        self.prestige_table_len = table_len;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.active_bonus_base > 0.0) {
            return Err("Active bonus base must be positive".to_string());
        }

        if !(self.global_money_multiplier > 0.0) {
            return Err("Global money multiplier must be positive".to_string());
        }

        if !(self.double_cash_duration_secs >= 0.0) {
            return Err("Double cash duration cannot be negative".to_string());
        }

        if !(self.offline_cap_minutes >= 0.0 && self.offline_cap_minutes <= MAX_OFFLINE_CAP_MINUTES)
        {
            return Err(format!(
                "Offline cap must be between 0 and {} minutes",
                MAX_OFFLINE_CAP_MINUTES
            ));
        }

        if !(self.passive_spawn_interval_secs > 0.0) {
            return Err("Passive spawn interval must be positive".to_string());
        }

        if !self.passive_spawn_pack_size.is_positive() {
            return Err("Passive spawn pack size must be positive".to_string());
        }

        if self.soldier_value.is_negative() {
            return Err("Soldier value cannot be negative".to_string());
        }

        if !(self.prestige_slow_growth > 0.0) {
            return Err("Prestige slow growth must be positive".to_string());
        }

        if self.prestige_table_len < 2 {
            return Err("Prestige table needs at least two stages".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EconomyConfig {
    /// Stock tuning used by a fresh save
    /// - 20 minute offline window
    /// - One passive spawn of 10 soldiers every 3 seconds
    pub fn fresh_save() -> Self {
        Self::default()
    }

    /// Late-game tuning once the offline cap upgrades are maxed
    /// - 12 hour offline window
    pub fn fully_upgraded_offline() -> Self {
        Self::default().with_offline_cap_minutes(MAX_OFFLINE_CAP_MINUTES)
    }
}

// ============================================================================
// Loading
// ============================================================================

#[cfg(feature = "serde")]
impl EconomyConfig {
    /// Parse and validate a JSON document.
    ///
    /// Missing fields fall back to the stock tuning; amounts may be written
    /// as tagged strings (`"BN1.5K"`).
    pub fn from_json(json: &str) -> super::EconomyResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| super::EconomyError::InvalidConfig(err.to_string()))?;
        config
            .validate()
            .map_err(super::EconomyError::InvalidConfig)?;
        Ok(config)
    }
}
