// ============================================================================
// Economy Errors
// ============================================================================

use crate::numeric::{NumericError, ScaledDecimal};
use std::fmt;

/// Errors raised by wallets, upgrade tracks and configuration loading.
#[derive(Debug, Clone, PartialEq)]
pub enum EconomyError {
    /// Balance is lower than the requested spend
    InsufficientFunds {
        cost: ScaledDecimal,
        balance: ScaledDecimal,
    },
    /// Upgrade already at its maximum level
    UpgradeMaxed { max_level: u32 },
    /// Configuration failed validation or could not be parsed
    InvalidConfig(String),
    /// Underlying numeric failure (bad tagged cost, division by zero)
    Numeric(NumericError),
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomyError::InsufficientFunds { cost, balance } => {
                write!(f, "insufficient funds: cost {} exceeds balance {}", cost, balance)
            },
            EconomyError::UpgradeMaxed { max_level } => {
                write!(f, "upgrade already at max level {}", max_level)
            },
            EconomyError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            EconomyError::Numeric(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EconomyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EconomyError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for EconomyError {
    fn from(err: NumericError) -> Self {
        EconomyError::Numeric(err)
    }
}

/// Result type alias for economy operations
pub type EconomyResult<T> = Result<T, EconomyError>;
