// ============================================================================
// Balance Observer Interface
// Defines the contract for reacting to wallet balance changes
// ============================================================================

use crate::numeric::ScaledDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Handle returned when an observer subscribes to a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Events emitted by a wallet whenever its balance moves or a spend fails
#[derive(Debug, Clone)]
pub enum BalanceEvent {
    /// Money earned through gameplay, after bonuses
    Earned {
        raw: ScaledDecimal,
        credited: ScaledDecimal,
        balance: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },

    /// Money credited as-is (rewards, refunds)
    Deposited {
        amount: ScaledDecimal,
        balance: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },

    /// Money spent
    Spent {
        amount: ScaledDecimal,
        balance: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },

    /// Spend refused because the balance was too low
    SpendRejected {
        cost: ScaledDecimal,
        balance: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },

    /// Offline earnings collected
    OfflineCollected {
        amount: ScaledDecimal,
        doubled: bool,
        balance: ScaledDecimal,
        timestamp: DateTime<Utc>,
    },
}

impl BalanceEvent {
    /// Balance after the event (unchanged for rejected spends)
    pub fn balance(&self) -> &ScaledDecimal {
        match self {
            BalanceEvent::Earned { balance, .. }
            | BalanceEvent::Deposited { balance, .. }
            | BalanceEvent::Spent { balance, .. }
            | BalanceEvent::SpendRejected { balance, .. }
            | BalanceEvent::OfflineCollected { balance, .. } => balance,
        }
    }
}

/// Observer trait for wallet events.
/// Implementations typically refresh affordability of buttons, log, etc.
pub trait BalanceObserver: Send + Sync {
    /// Handle a balance event
    fn on_event(&self, event: BalanceEvent);

    /// Batch handler (optional optimization)
    fn on_events(&self, events: Vec<BalanceEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer for testing
pub struct NoOpBalanceObserver;

impl BalanceObserver for NoOpBalanceObserver {
    fn on_event(&self, _event: BalanceEvent) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingBalanceObserver;

impl BalanceObserver for LoggingBalanceObserver {
    fn on_event(&self, event: BalanceEvent) {
        tracing::debug!(balance = %event.balance(), "Wallet event: {:?}", event);
    }
}
