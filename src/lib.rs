// ============================================================================
// Scaled Decimal Library
// Engineering-notation numbers and the idle-game economy built on them
// ============================================================================

//! # Scaled Decimal
//!
//! An `f32`-mantissa, power-of-1000 number type for idle-game currencies,
//! plus the wallet, upgrade, offline and prestige arithmetic that uses it.
//!
//! ## Features
//!
//! - **Engineering notation**: `mantissa × 10^exponent`, exponent a multiple of 3
//! - **Unit suffixes**: `K M G T P E Z Y`, compounding past `Y` (`"3.000YY"`)
//! - **Tagged strings**: authored content like `"BN1.5K"` parses directly
//! - **Dead zone**: operands more than 10^9 apart do not combine
//! - **Economy layer**: bonus-multiplied earning, guarded spending, cost curves
//!
//! ## Example
//!
//! ```rust
//! use scaled_decimal::prelude::*;
//!
//! let mut wallet = Wallet::new(EconomyConfig::default()).unwrap();
//! wallet.earn(&ScaledDecimal::new(2500.0));
//! assert_eq!(wallet.balance().to_string(), "2.500K");
//!
//! let mut upgrade = UpgradeTrack::new("BN1.5K", 1.15, 10).unwrap();
//! upgrade.purchase(&mut wallet).unwrap();
//! assert_eq!(wallet.balance().to_string(), "1.000K");
//! ```

pub mod economy;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::economy::{
        compute_offline_earnings, offline_cap_amount, CubitTable, EconomyConfig, EconomyError,
        EconomyResult, OfflineEarnings, PrestigeLedger, TierModifiers, UpgradeTrack, Wallet,
    };
    pub use crate::interfaces::{
        BalanceEvent, BalanceObserver, LoggingBalanceObserver, NoOpBalanceObserver,
        SubscriptionId,
    };
    pub use crate::numeric::{NumericError, NumericResult, ScaledDecimal};
}
