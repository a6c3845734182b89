// ============================================================================
// Economy Module
// Money, upgrades, offline generation and prestige built on ScaledDecimal
// ============================================================================

pub mod config;
mod errors;
pub mod offline;
pub mod prestige;
pub mod upgrade;
pub mod wallet;

pub use config::EconomyConfig;
pub use errors::{EconomyError, EconomyResult};
pub use offline::{compute_offline_earnings, offline_cap_amount, OfflineEarnings};
pub use prestige::{CubitTable, PrestigeLedger};
pub use upgrade::{TierModifiers, UpgradeTrack};
pub use wallet::Wallet;
