// ============================================================================
// Wallet
// Money ledger with bonus-multiplied earning and guarded spending
// ============================================================================

use super::config::EconomyConfig;
use super::errors::{EconomyError, EconomyResult};
use super::offline::OfflineEarnings;
use crate::interfaces::{BalanceEvent, BalanceObserver, SubscriptionId};
use crate::numeric::ScaledDecimal;
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

/// Player money with the multipliers that apply to it.
///
/// Every balance change, and every refused spend, is reported to the
/// subscribed observers.
pub struct Wallet {
    /// Economy tuning
    config: EconomyConfig,

    /// Current money
    balance: ScaledDecimal,

    /// Per-stage active bonus, reset when a stage is passed
    active_bonus: ScaledDecimal,

    /// Multiplier granted by prestige
    prestige_multiplier: ScaledDecimal,

    /// Seconds of double cash left
    double_cash_remaining_secs: f32,

    /// Registered observers
    observers: RwLock<HashMap<SubscriptionId, Arc<dyn BalanceObserver>>>,
}

impl Wallet {
    /// Create an empty wallet.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: EconomyConfig) -> EconomyResult<Self> {
        Self::with_balance(config, ScaledDecimal::zero())
    }

    /// Create a wallet holding a balance restored from a save
    pub fn with_balance(config: EconomyConfig, balance: ScaledDecimal) -> EconomyResult<Self> {
        config.validate().map_err(EconomyError::InvalidConfig)?;

        Ok(Self {
            active_bonus: ScaledDecimal::new(config.active_bonus_base),
            config,
            balance,
            prestige_multiplier: ScaledDecimal::new(1.0),
            double_cash_remaining_secs: 0.0,
            observers: RwLock::new(HashMap::new()),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn balance(&self) -> &ScaledDecimal {
        &self.balance
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn active_bonus(&self) -> &ScaledDecimal {
        &self.active_bonus
    }

    pub fn set_active_bonus(&mut self, bonus: ScaledDecimal) {
        self.active_bonus = bonus;
    }

    pub fn prestige_multiplier(&self) -> &ScaledDecimal {
        &self.prestige_multiplier
    }

    /// Set the prestige multiplier, usually `PrestigeLedger::cash_modifier`
    pub fn set_prestige_multiplier(&mut self, multiplier: ScaledDecimal) {
        self.prestige_multiplier = multiplier;
    }

    /// Combined multiplier applied by [`earn`](Self::earn)
    pub fn earning_multiplier(&self) -> ScaledDecimal {
        let mut multiplier = self.active_bonus.clone();
        multiplier
            .multiply_f32(self.config.global_money_multiplier)
            .multiply(&self.prestige_multiplier);

        if self.is_double_cash_active() {
            multiplier.multiply_f32(2.0);
        }

        multiplier
    }

    // ========================================================================
    // Balance Operations
    // ========================================================================

    /// Credit money earned through gameplay, applying every multiplier.
    ///
    /// Returns the amount actually credited.
    pub fn earn(&mut self, raw: &ScaledDecimal) -> ScaledDecimal {
        let mut credited = raw.clone();
        credited.multiply(&self.earning_multiplier());
        self.balance.add(&credited);

        self.notify(BalanceEvent::Earned {
            raw: raw.clone(),
            credited: credited.clone(),
            balance: self.balance.clone(),
            timestamp: Utc::now(),
        });

        credited
    }

    /// Credit money without any multiplier
    pub fn earn_raw(&mut self, amount: &ScaledDecimal) {
        self.balance.add(amount);

        self.notify(BalanceEvent::Deposited {
            amount: amount.clone(),
            balance: self.balance.clone(),
            timestamp: Utc::now(),
        });
    }

    /// True if the balance covers `cost`
    pub fn can_afford(&self, cost: &ScaledDecimal) -> bool {
        self.balance.compare(cost) != Ordering::Less
    }

    /// Spend `cost`.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` when the balance is lower than `cost`;
    /// the balance is left untouched.
    pub fn spend(&mut self, cost: &ScaledDecimal) -> EconomyResult<()> {
        if !self.can_afford(cost) {
            tracing::warn!(cost = %cost, balance = %self.balance, "Trying to spend more than the balance");

            self.notify(BalanceEvent::SpendRejected {
                cost: cost.clone(),
                balance: self.balance.clone(),
                timestamp: Utc::now(),
            });

            return Err(EconomyError::InsufficientFunds {
                cost: cost.clone(),
                balance: self.balance.clone(),
            });
        }

        self.balance.subtract(cost);

        self.notify(BalanceEvent::Spent {
            amount: cost.clone(),
            balance: self.balance.clone(),
            timestamp: Utc::now(),
        });

        Ok(())
    }

    /// Credit offline earnings, twice when `doubled` (rewarded ad).
    ///
    /// Returns the amount credited.
    pub fn collect_offline(&mut self, earnings: &OfflineEarnings, doubled: bool) -> ScaledDecimal {
        let mut collected = earnings.amount.clone();
        if doubled {
            collected.multiply_f32(2.0);
        }
        self.balance.add(&collected);

        self.notify(BalanceEvent::OfflineCollected {
            amount: collected.clone(),
            doubled,
            balance: self.balance.clone(),
            timestamp: Utc::now(),
        });

        collected
    }

    // ========================================================================
    // Bonuses
    // ========================================================================

    /// Extend double cash by the configured duration
    pub fn activate_double_cash(&mut self) {
        self.double_cash_remaining_secs += self.config.double_cash_duration_secs;
        tracing::debug!(
            remaining_secs = self.double_cash_remaining_secs,
            "Double cash activated"
        );
    }

    pub fn is_double_cash_active(&self) -> bool {
        self.double_cash_remaining_secs > 0.0
    }

    pub fn double_cash_remaining_secs(&self) -> f32 {
        self.double_cash_remaining_secs
    }

    /// Advance timers by one frame
    pub fn tick(&mut self, delta_secs: f32) {
        if self.double_cash_remaining_secs > 0.0 {
            self.double_cash_remaining_secs = (self.double_cash_remaining_secs - delta_secs).max(0.0);
        }
    }

    /// Stage passed: the active bonus goes back to its base value
    pub fn reset_for_stage(&mut self) {
        self.active_bonus = ScaledDecimal::new(self.config.active_bonus_base);
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register an observer for balance events
    pub fn subscribe(&self, observer: Arc<dyn BalanceObserver>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.observers.write().insert(id, observer);
        id
    }

    /// Remove an observer. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.write().remove(&id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    fn notify(&self, event: BalanceEvent) {
        let observers = self.observers.read();
        for observer in observers.values() {
            observer.on_event(event.clone());
        }
    }
}
