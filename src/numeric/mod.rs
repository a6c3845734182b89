// ============================================================================
// Numeric Module
// Engineering-notation arithmetic for idle-game currencies and stats
// ============================================================================
//
// This module provides:
// - ScaledDecimal: mantissa × 10^exponent with exponent a multiple of 3
// - suffix: the K/M/G/T/P/E/Z/Y unit table used for display and parsing
// - NumericError: Error types for parsing and division
//
// Design principles:
// - f32 mantissa, i32 exponent; magnitudes far beyond f32 range
// - Cached display string refreshed on every mutation
// - Operands more than 10^9 apart do not combine (dead zone)
// - Exponents stay within MAX_EXPONENT; overflowing results saturate
// - Fallible operations return Result (no panics)

mod errors;
mod scaled_decimal;
pub mod suffix;

pub use errors::{NumericError, NumericResult};
pub use scaled_decimal::{ScaledDecimal, DEAD_ZONE_EXPONENT_GAP, MAX_EXPONENT, TAG};
