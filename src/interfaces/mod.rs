// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod balance_observer;

pub use balance_observer::{
    BalanceEvent, BalanceObserver, LoggingBalanceObserver, NoOpBalanceObserver, SubscriptionId,
};
