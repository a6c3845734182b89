// ============================================================================
// Upgrades
// Cost curves for purchasable upgrades and stacked tier modifiers
// ============================================================================

use super::errors::{EconomyError, EconomyResult};
use super::wallet::Wallet;
use crate::numeric::ScaledDecimal;

// ============================================================================
// Upgrade Track
// ============================================================================

/// Level and cost progression of a single upgrade.
///
/// Every purchased level multiplies the cost by `increment_factor`.
#[derive(Debug, Clone)]
pub struct UpgradeTrack {
    initial_cost: ScaledDecimal,
    current_cost: ScaledDecimal,
    increment_factor: f32,
    level: u32,
    max_level: u32,
}

impl UpgradeTrack {
    /// Create from an authored cost string such as `"BN1.5K"`.
    ///
    /// # Errors
    /// - `Numeric` if the cost string does not parse
    /// - `InvalidConfig` if the factor is not positive or `max_level` is 0
    pub fn new(initial_cost: &str, increment_factor: f32, max_level: u32) -> EconomyResult<Self> {
        let cost = ScaledDecimal::parse_tagged(initial_cost)?;
        Self::with_cost(cost, increment_factor, max_level)
    }

    /// Create from an already-parsed cost
    pub fn with_cost(
        initial_cost: ScaledDecimal,
        increment_factor: f32,
        max_level: u32,
    ) -> EconomyResult<Self> {
        if !(increment_factor > 0.0) {
            return Err(EconomyError::InvalidConfig(
                "Cost increment factor must be positive".to_string(),
            ));
        }
        if max_level == 0 {
            return Err(EconomyError::InvalidConfig(
                "Max level must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            current_cost: initial_cost.clone(),
            initial_cost,
            increment_factor,
            level: 0,
            max_level,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Price of the next level
    pub fn current_cost(&self) -> &ScaledDecimal {
        &self.current_cost
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// True if the next level can be bought from `wallet` right now
    pub fn is_affordable(&self, wallet: &Wallet) -> bool {
        !self.is_maxed() && wallet.can_afford(&self.current_cost)
    }

    /// Buy one level, charging the current cost to `wallet`.
    ///
    /// Returns the amount paid.
    ///
    /// # Errors
    /// - `UpgradeMaxed` at the level cap
    /// - `InsufficientFunds` if the wallet cannot cover the cost; the track
    ///   is left unchanged
    pub fn purchase(&mut self, wallet: &mut Wallet) -> EconomyResult<ScaledDecimal> {
        if self.is_maxed() {
            return Err(EconomyError::UpgradeMaxed {
                max_level: self.max_level,
            });
        }

        let paid = self.current_cost.clone();
        wallet.spend(&paid)?;
        self.advance(1);

        tracing::debug!(level = self.level, paid = %paid, next = %self.current_cost, "Upgrade purchased");
        Ok(paid)
    }

    /// Re-apply levels loaded from a save without charging for them.
    ///
    /// Levels beyond the cap are ignored.
    pub fn restore_levels(&mut self, levels: u32) {
        let levels = levels.min(self.max_level - self.level);
        self.advance(levels);
    }

    /// Back to level 0 at the initial cost
    pub fn reset(&mut self) {
        self.level = 0;
        self.current_cost = self.initial_cost.clone();
    }

    fn advance(&mut self, levels: u32) {
        if levels == 0 {
            return;
        }
        self.level += levels;
        let factor = self.increment_factor.powi(levels as i32);
        self.current_cost.multiply_f32(factor);
    }
}

// ============================================================================
// Tier Modifiers
// ============================================================================

/// Multiplicative stacking of upgrade tiers.
///
/// Each tier starts at 1.0 and accumulates its modifiers additively; the
/// total is the product over all tiers. Two +0.5 upgrades in tier 1 and one
/// +1.0 in tier 2 give `2.0 × 2.0 = 4.0`.
#[derive(Debug, Clone, Default)]
pub struct TierModifiers {
    tiers: Vec<f32>,
}

impl TierModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `modifier` to a 1-based tier and return the new total.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for tier 0.
    pub fn upgrade(&mut self, tier: usize, modifier: f32) -> EconomyResult<f32> {
        if tier == 0 {
            return Err(EconomyError::InvalidConfig(
                "Upgrade tiers start at 1".to_string(),
            ));
        }

        if self.tiers.len() < tier {
            self.tiers.resize(tier, 1.0);
        }
        self.tiers[tier - 1] += modifier;

        Ok(self.total())
    }

    /// Product of all tier multipliers (1.0 when empty)
    pub fn total(&self) -> f32 {
        self.tiers.iter().product()
    }

    /// `base` scaled by the current total
    pub fn apply(&self, base: &ScaledDecimal) -> ScaledDecimal {
        let mut value = base.clone();
        value.multiply_f32(self.total());
        value
    }

    pub fn reset(&mut self) {
        self.tiers.clear();
    }
}
