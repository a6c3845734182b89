// ============================================================================
// Offline Earnings
// Money generated by passive spawns while the game was closed
// ============================================================================

use super::config::EconomyConfig;
use crate::numeric::ScaledDecimal;
use chrono::{DateTime, Utc};

/// Result of an offline earnings computation
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineEarnings {
    /// Seconds credited, after adding uncollected time and applying the cap
    pub credited_secs: f32,
    /// Whole passive spawns that fit in the credited time
    pub spawns: f32,
    /// Money generated by those spawns
    pub amount: ScaledDecimal,
}

impl OfflineEarnings {
    /// Credited time in minutes, for the collect dialog
    pub fn credited_minutes(&self) -> f32 {
        self.credited_secs / 60.0
    }
}

/// Compute offline earnings between the last save and `now`.
///
/// Clock skew that puts `now` before `saved_at` counts as zero elapsed time.
/// Time left uncollected from a previous session is added before the cap.
pub fn compute_offline_earnings(
    config: &EconomyConfig,
    saved_at: DateTime<Utc>,
    now: DateTime<Utc>,
    uncollected_secs: f32,
) -> OfflineEarnings {
    let elapsed = ((now - saved_at).num_milliseconds() as f32 / 1000.0).max(0.0);
    let cap_secs = config.offline_cap_minutes * 60.0;
    let credited_secs = (elapsed + uncollected_secs.max(0.0)).min(cap_secs);

    let spawns = (credited_secs / config.passive_spawn_interval_secs).floor();
    let amount = spawn_value(config, spawns);

    tracing::debug!(
        credited_secs,
        spawns,
        amount = %amount,
        "Computed offline earnings"
    );

    OfflineEarnings {
        credited_secs,
        spawns,
        amount,
    }
}

/// Money generated by a full offline window at the current tuning.
///
/// Used to price upgrades that scale with offline income.
pub fn offline_cap_amount(config: &EconomyConfig) -> ScaledDecimal {
    let spawns = config.offline_cap_minutes * 60.0 / config.passive_spawn_interval_secs;
    spawn_value(config, spawns)
}

fn spawn_value(config: &EconomyConfig, spawns: f32) -> ScaledDecimal {
    let mut amount = config.soldier_value.clone();
    amount
        .multiply(&config.passive_spawn_pack_size)
        .multiply_f32(spawns);
    amount
}
