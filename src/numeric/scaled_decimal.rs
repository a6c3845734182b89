// ============================================================================
// Scaled Decimal
// Engineering-notation value: mantissa × 10^exponent, exponent a multiple of 3
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::suffix;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{AddAssign, MulAssign, Neg, SubAssign};
use std::str::FromStr;

/// Marker that introduces a tagged string such as `"BN24.55MY"`.
pub const TAG: &str = "BN";

/// Exponent gap beyond which the smaller operand of an addition or
/// subtraction is ignored entirely.
///
/// The gap is measured in powers of ten: a gap of exactly 9 is still
/// aligned and combined, 12 and above is not.
pub const DEAD_ZONE_EXPONENT_GAP: i32 = 9;

/// Largest exponent a value can carry (`999 × 10^9999` at most).
///
/// Results past it saturate to the limit; inputs past it are rejected.
pub const MAX_EXPONENT: i32 = 9_999;

/// One engineering-notation group (10^3)
const GROUP: f32 = 1000.0;

/// Mantissas above this magnitude move up one group
const MANTISSA_CEILING: f32 = 999.0;

/// Scaled decimal for currency and stat values that outgrow `f32`.
///
/// Stores `mantissa × 10^exponent` with `exponent` always a non-negative
/// multiple of 3. The human-readable rendering (e.g. `"5.000K"`) is cached
/// and refreshed by every mutating operation, so `Display` never formats
/// the number on the fly.
///
/// Arithmetic mutates the receiver in place and returns `&mut Self` so calls
/// can be chained:
///
/// ```
/// use scaled_decimal::numeric::ScaledDecimal;
///
/// let mut cost = ScaledDecimal::new(5.0);
/// cost.multiply(&ScaledDecimal::new(1000.0));
/// assert_eq!(cost.exponent(), 3);
/// assert_eq!(cost.to_string(), "5.000K");
///
/// let parsed: ScaledDecimal = "BN24.55MY".parse().unwrap();
/// assert_eq!(parsed.exponent(), 30);
/// ```
#[derive(Clone)]
pub struct ScaledDecimal {
    mantissa: f32,
    exponent: i32,
    display: String,
}

impl ScaledDecimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from a plain float at exponent 0, then normalize.
    pub fn new(value: f32) -> Self {
        let mut result = Self {
            mantissa: value,
            exponent: 0,
            display: String::new(),
        };
        result.normalize();
        result
    }

    /// Zero value (`0.000`)
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    /// Create from a mantissa and an explicit exponent.
    ///
    /// # Errors
    /// - `MisalignedExponent` if `exponent` is not a multiple of 3
    /// - `ExponentOutOfRange` if `exponent` lies outside `±MAX_EXPONENT`
    pub fn from_parts(mantissa: f32, exponent: i32) -> NumericResult<Self> {
        if exponent % 3 != 0 {
            return Err(NumericError::MisalignedExponent(exponent));
        }
        if exponent.unsigned_abs() > MAX_EXPONENT as u32 {
            return Err(NumericError::ExponentOutOfRange(exponent));
        }

        let mut result = Self {
            mantissa,
            exponent,
            display: String::new(),
        };
        result.normalize();
        Ok(result)
    }

    /// Parse a plain float or a tagged string.
    ///
    /// Tagged strings start with `"BN"`, followed by a float and any number
    /// of unit letters. Letters add up, so `"BN24.55MY"` is
    /// `24.55 × 10^(6 + 24)`.
    ///
    /// # Errors
    /// - `UnknownSuffix` if a trailing letter is not in the unit table
    /// - `ExponentOutOfRange` if the letters add up past `MAX_EXPONENT`
    /// - `InvalidFormat` if the numeric part is missing, unparsable or not
    ///   finite, or if the marker appears anywhere but the front
    pub fn parse_tagged(input: &str) -> NumericResult<Self> {
        let input = input.trim();

        let Some(body) = input.strip_prefix(TAG) else {
            if input.contains(TAG) {
                return Err(NumericError::InvalidFormat);
            }
            return parse_mantissa(input).map(Self::new);
        };

        // Walk back over the unit letters; the rest is the mantissa
        let mut exponent: i32 = 0;
        for (index, ch) in body.char_indices().rev() {
            if !ch.is_alphabetic() {
                let mantissa = parse_mantissa(&body[..index + ch.len_utf8()])?;
                return Self::from_parts(mantissa, exponent);
            }

            let power = suffix::exponent_for(ch).ok_or(NumericError::UnknownSuffix(ch))?;
            exponent += power;
            if exponent > MAX_EXPONENT {
                return Err(NumericError::ExponentOutOfRange(exponent));
            }
        }

        Err(NumericError::InvalidFormat)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Normalized mantissa; carries the sign.
    #[inline]
    pub fn mantissa(&self) -> f32 {
        self.mantissa
    }

    /// Power of ten applied to the mantissa. Always a multiple of 3.
    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Cached display string, e.g. `"24.550MY"`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Tagged encoding of the display string, e.g. `"BN24.550MY"`.
    pub fn to_tagged(&self) -> String {
        format!("{}{}", TAG, self.display)
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.mantissa > 0.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    // ========================================================================
    // In-place Mutation
    // ========================================================================

    /// Replace the value with a plain float.
    pub fn set_value(&mut self, value: f32) -> &mut Self {
        self.mantissa = value;
        self.exponent = 0;
        self.normalize();
        self
    }

    pub fn reset_to_zero(&mut self) -> &mut Self {
        self.set_value(0.0)
    }

    /// Round the mantissa to the nearest integer (ties to even).
    ///
    /// Only applies at exponent 0; scaled values are left untouched.
    pub fn round(&mut self) -> &mut Self {
        if self.exponent == 0 {
            self.mantissa = self.mantissa.round_ties_even();
            self.normalize();
        }
        self
    }

    /// Multiply the mantissa by `e^power`.
    pub fn scale_by_exp(&mut self, power: f32) -> &mut Self {
        self.mantissa *= power.exp();
        self.normalize();
        self
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Add `other` in place.
    ///
    /// When the exponents differ by more than `DEAD_ZONE_EXPONENT_GAP` the
    /// smaller operand is dropped: a dominant receiver stays as it is, a
    /// dominant `other` replaces the receiver.
    pub fn add(&mut self, other: &ScaledDecimal) -> &mut Self {
        if self.exponent >= other.exponent {
            if self.exponent > other.exponent + DEAD_ZONE_EXPONENT_GAP {
                return self;
            }
            self.mantissa += align(other.mantissa, other.exponent, self.exponent);
        } else if other.exponent > self.exponent + DEAD_ZONE_EXPONENT_GAP {
            self.mantissa = other.mantissa;
            self.exponent = other.exponent;
        } else {
            self.mantissa = align(self.mantissa, self.exponent, other.exponent) + other.mantissa;
            self.exponent = other.exponent;
        }

        self.normalize();
        self
    }

    pub fn add_f32(&mut self, value: f32) -> &mut Self {
        self.add(&Self::new(value))
    }

    /// Subtract `other` in place.
    ///
    /// Same dead-zone policy as [`add`](Self::add): a dominant `other`
    /// turns the receiver into `-other`.
    pub fn subtract(&mut self, other: &ScaledDecimal) -> &mut Self {
        if self.exponent <= other.exponent {
            if other.exponent - self.exponent > DEAD_ZONE_EXPONENT_GAP {
                self.mantissa = -other.mantissa;
            } else {
                self.mantissa =
                    align(self.mantissa, self.exponent, other.exponent) - other.mantissa;
            }
            self.exponent = other.exponent;
        } else {
            if self.exponent > other.exponent + DEAD_ZONE_EXPONENT_GAP {
                return self;
            }
            self.mantissa -= align(other.mantissa, other.exponent, self.exponent);
        }

        self.normalize();
        self
    }

    pub fn subtract_f32(&mut self, value: f32) -> &mut Self {
        self.subtract(&Self::new(value))
    }

    /// Multiply by `other` in place, saturating at `MAX_EXPONENT`.
    pub fn multiply(&mut self, other: &ScaledDecimal) -> &mut Self {
        self.mantissa *= other.mantissa;
        self.exponent += other.exponent;
        self.normalize();
        self
    }

    pub fn multiply_f32(&mut self, value: f32) -> &mut Self {
        self.multiply(&Self::new(value))
    }

    /// Divide by `other` in place.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `other` is zero. The receiver is left
    /// unchanged.
    pub fn divide(&mut self, other: &ScaledDecimal) -> NumericResult<&mut Self> {
        if other.mantissa == 0.0 {
            tracing::error!(dividend = %self, "scaled decimal division by zero");
            return Err(NumericError::DivisionByZero);
        }

        self.mantissa /= other.mantissa;
        self.exponent -= other.exponent;
        self.normalize();
        Ok(self)
    }

    pub fn divide_f32(&mut self, value: f32) -> NumericResult<&mut Self> {
        self.divide(&Self::new(value))
    }

    /// `self / other` as a plain float.
    ///
    /// Loses precision by design; meant for UI ratios such as bar fills.
    pub fn ratio_to(&self, other: &ScaledDecimal) -> f32 {
        let base = self.mantissa / other.mantissa;
        base * 10f64.powi(self.exponent - other.exponent) as f32
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Three-way comparison.
    ///
    /// Opposite signs resolve on sign alone. Non-negative pairs order by
    /// exponent then mantissa; non-positive pairs order by inverted exponent
    /// then mantissa. A NaN mantissa compares `Equal`.
    pub fn compare(&self, other: &ScaledDecimal) -> Ordering {
        let (a, b) = (self.mantissa, other.mantissa);

        if a >= 0.0 && b < 0.0 {
            Ordering::Greater
        } else if a <= 0.0 && b > 0.0 {
            Ordering::Less
        } else if a >= 0.0 && b >= 0.0 {
            self.exponent
                .cmp(&other.exponent)
                .then_with(|| mantissa_order(a, b))
        } else if a <= 0.0 && b <= 0.0 {
            other
                .exponent
                .cmp(&self.exponent)
                .then_with(|| mantissa_order(a, b))
        } else {
            Ordering::Equal
        }
    }

    pub fn compare_f32(&self, value: f32) -> Ordering {
        self.compare(&Self::new(value))
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Lossy conversion to `f64`.
    pub fn to_f64(&self) -> f64 {
        self.mantissa as f64 * 10f64.powi(self.exponent)
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Intended for API boundaries. Returns `None` when the magnitude does
    /// not fit in a `Decimal` (roughly above 7.9 × 10^28).
    pub fn to_decimal(&self) -> Option<rust_decimal::Decimal> {
        use rust_decimal::prelude::FromPrimitive;
        use rust_decimal::Decimal;

        let mantissa = Decimal::from_f32(self.mantissa)?;
        let scale = 10i128.checked_pow(u32::try_from(self.exponent).ok()?)?;
        let scale = Decimal::try_from_i128_with_scale(scale, 0).ok()?;
        mantissa.checked_mul(scale)
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Restore the engineering-notation invariants and refresh the display.
    fn normalize(&mut self) {
        if self.mantissa == 0.0 {
            self.exponent = 0;
        }

        // A step whose result would exceed the ceiling is undone right
        // below, so it is skipped here.
        while self.mantissa.abs() < 1.0
            && self.exponent >= 3
            && self.mantissa.abs() * GROUP <= MANTISSA_CEILING
        {
            self.mantissa *= GROUP;
            self.exponent -= 3;
        }

        while self.exponent < 0
            || (self.mantissa.is_finite() && self.mantissa.abs() > MANTISSA_CEILING)
        {
            if self.mantissa == 0.0 || !self.mantissa.is_finite() {
                self.exponent = self.exponent.max(0);
                break;
            }
            self.mantissa /= GROUP;
            self.exponent += 3;
        }

        if self.exponent > MAX_EXPONENT {
            tracing::debug!(
                mantissa = self.mantissa,
                exponent = self.exponent,
                "scaled decimal saturated at the exponent limit"
            );
            if self.mantissa.is_finite() {
                self.mantissa = MANTISSA_CEILING.copysign(self.mantissa);
            }
            self.exponent = MAX_EXPONENT;
        }

        if self.mantissa == 0.0 {
            // Drops negative zero, including underflow from the loop above
            self.mantissa = 0.0;
            self.exponent = 0;
        }

        self.display = self.render();
    }

    /// Display pass, independent of the stored representation.
    fn render(&self) -> String {
        let mut base = self.mantissa;
        let mut power = self.exponent;

        while base.is_finite() && base.abs() > GROUP {
            base /= GROUP;
            power += 3;
        }

        while base.abs() < 1.0 && power > 0 {
            base *= GROUP;
            power -= 3;
        }

        format!("{:.3}{}", base, suffix::unit_suffix(power))
    }
}

/// Scale a mantissa down one group at a time until it sits at `target`.
#[inline]
fn align(mut mantissa: f32, mut exponent: i32, target: i32) -> f32 {
    while exponent < target {
        exponent += 3;
        mantissa /= GROUP;
    }
    mantissa
}

#[inline]
fn mantissa_order(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn parse_mantissa(text: &str) -> NumericResult<f32> {
    let value: f32 = text.parse().map_err(|_| NumericError::InvalidFormat)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericError::InvalidFormat)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for ScaledDecimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f32> for ScaledDecimal {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl PartialEq for ScaledDecimal {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.exponent == other.exponent
    }
}

impl PartialOrd for ScaledDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.mantissa.is_nan() || other.mantissa.is_nan() {
            None
        } else {
            Some(self.compare(other))
        }
    }
}

impl Neg for ScaledDecimal {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.mantissa = -self.mantissa;
        self.normalize();
        self
    }
}

impl AddAssign<&ScaledDecimal> for ScaledDecimal {
    fn add_assign(&mut self, rhs: &ScaledDecimal) {
        self.add(rhs);
    }
}

impl AddAssign<f32> for ScaledDecimal {
    fn add_assign(&mut self, rhs: f32) {
        self.add_f32(rhs);
    }
}

impl SubAssign<&ScaledDecimal> for ScaledDecimal {
    fn sub_assign(&mut self, rhs: &ScaledDecimal) {
        self.subtract(rhs);
    }
}

impl SubAssign<f32> for ScaledDecimal {
    fn sub_assign(&mut self, rhs: f32) {
        self.subtract_f32(rhs);
    }
}

impl MulAssign<&ScaledDecimal> for ScaledDecimal {
    fn mul_assign(&mut self, rhs: &ScaledDecimal) {
        self.multiply(rhs);
    }
}

impl MulAssign<f32> for ScaledDecimal {
    fn mul_assign(&mut self, rhs: f32) {
        self.multiply_f32(rhs);
    }
}

impl<'a> Sum<&'a ScaledDecimal> for ScaledDecimal {
    fn sum<I: Iterator<Item = &'a ScaledDecimal>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, x| {
            acc.add(x);
            acc
        })
    }
}

impl Sum for ScaledDecimal {
    fn sum<I: Iterator<Item = ScaledDecimal>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, x| {
            acc.add(&x);
            acc
        })
    }
}

impl FromStr for ScaledDecimal {
    type Err = NumericError;

    /// Parse a plain float (`"1500"`) or a tagged string (`"BN1.5K"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_tagged(s)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl fmt::Debug for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScaledDecimal({}, mantissa={}, exponent={})",
            self.display, self.mantissa, self.exponent
        )
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for ScaledDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, RON, etc. - tagged string, same as authored content
            serializer.serialize_str(&self.to_tagged())
        } else {
            serde::Serialize::serialize(&(self.mantissa, self.exponent), serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ScaledDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde::Deserialize;

        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::parse_tagged(&s).map_err(D::Error::custom)
        } else {
            let (mantissa, exponent) = <(f32, i32)>::deserialize(deserializer)?;
            Self::from_parts(mantissa, exponent).map_err(D::Error::custom)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sd(mantissa: f32, exponent: i32) -> ScaledDecimal {
        ScaledDecimal::from_parts(mantissa, exponent).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn test_new_normalizes() {
        let x = ScaledDecimal::new(1500.0);
        assert!(approx(x.mantissa(), 1.5));
        assert_eq!(x.exponent(), 3);
        assert_eq!(x.to_string(), "1.500K");

        let small = ScaledDecimal::new(0.25);
        assert_eq!(small.mantissa(), 0.25);
        assert_eq!(small.exponent(), 0);
        assert_eq!(small.to_string(), "0.250");
    }

    #[test]
    fn test_zero() {
        let zero = ScaledDecimal::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.exponent(), 0);
        assert_eq!(zero.to_string(), "0.000");
        assert_eq!(ScaledDecimal::default(), zero);
    }

    #[test]
    fn test_negative_zero_is_canonical() {
        let mut x = ScaledDecimal::new(-5.0);
        x.multiply_f32(0.0);
        assert!(x.is_zero());
        assert!(x.mantissa().is_sign_positive());
        assert_eq!(x.to_string(), "0.000");
    }

    #[test]
    fn test_from_parts() {
        let x = sd(24.55, 30);
        assert!(approx(x.mantissa(), 24.55));
        assert_eq!(x.exponent(), 30);
        assert_eq!(x.to_string(), "24.550MY");

        let pulled_down = sd(0.5, 6);
        assert!(approx(pulled_down.mantissa(), 500.0));
        assert_eq!(pulled_down.exponent(), 3);
    }

    #[test]
    fn test_from_parts_misaligned() {
        let result = ScaledDecimal::from_parts(1.0, 4);
        assert_eq!(result.unwrap_err(), NumericError::MisalignedExponent(4));
    }

    #[test]
    fn test_ceiling_edge_moves_up_a_group() {
        // Values in (999, 1000) rest as 0.999... one group up
        let x = ScaledDecimal::new(999.5);
        assert!(approx(x.mantissa(), 0.9995));
        assert_eq!(x.exponent(), 3);
        assert_eq!(x.to_string(), "999.500");

        let at_ceiling = ScaledDecimal::new(999.0);
        assert_eq!(at_ceiling.mantissa(), 999.0);
        assert_eq!(at_ceiling.exponent(), 0);
    }

    #[test]
    fn test_display_suffixes() {
        assert_eq!(sd(1.0, 0).to_string(), "1.000");
        assert_eq!(sd(1.0, 6).to_string(), "1.000M");
        assert_eq!(sd(7.25, 24).to_string(), "7.250Y");
        assert_eq!(sd(3.0, 48).to_string(), "3.000YY");
        assert_eq!(sd(-12.5, 9).to_string(), "-12.500G");
        assert_eq!(sd(1.0, 6).as_str(), "1.000M");
    }

    #[test]
    fn test_parse_tagged() {
        let x = ScaledDecimal::parse_tagged("BN24.55MY").unwrap();
        assert!(approx(x.mantissa(), 24.55));
        assert_eq!(x.exponent(), 30);

        let k: ScaledDecimal = "BN1.5K".parse().unwrap();
        assert!(approx(k.mantissa(), 1.5));
        assert_eq!(k.exponent(), 3);

        let compound: ScaledDecimal = "BN2YY".parse().unwrap();
        assert_eq!(compound.exponent(), 48);

        let no_suffix: ScaledDecimal = "BN12.5".parse().unwrap();
        assert_eq!(no_suffix.mantissa(), 12.5);
        assert_eq!(no_suffix.exponent(), 0);

        let normalized: ScaledDecimal = "BN1500K".parse().unwrap();
        assert!(approx(normalized.mantissa(), 1.5));
        assert_eq!(normalized.exponent(), 6);
    }

    #[test]
    fn test_parse_plain_float() {
        let x: ScaledDecimal = "1500".parse().unwrap();
        assert!(approx(x.mantissa(), 1.5));
        assert_eq!(x.exponent(), 3);

        let neg: ScaledDecimal = " -42.5 ".parse().unwrap();
        assert_eq!(neg.mantissa(), -42.5);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "not_a_number".parse::<ScaledDecimal>(),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(
            "BN12Q".parse::<ScaledDecimal>(),
            Err(NumericError::UnknownSuffix('Q'))
        );
        assert_eq!(
            "BN1.5k".parse::<ScaledDecimal>(),
            Err(NumericError::UnknownSuffix('k'))
        );
        assert_eq!("BNK".parse::<ScaledDecimal>(), Err(NumericError::InvalidFormat));
        assert_eq!("BN".parse::<ScaledDecimal>(), Err(NumericError::InvalidFormat));
        assert_eq!("12BN".parse::<ScaledDecimal>(), Err(NumericError::InvalidFormat));
        assert_eq!("BN1..2K".parse::<ScaledDecimal>(), Err(NumericError::InvalidFormat));
        assert_eq!("inf".parse::<ScaledDecimal>(), Err(NumericError::InvalidFormat));
    }

    #[test]
    fn test_tagged_round_trip() {
        let values = [
            0.0, 1.0, 999.999, 1000.0, 1e6, 1e24, 1e30, -1.0, -42.5, -7.5e12,
        ];

        for value in values {
            let x = ScaledDecimal::new(value);
            let parsed = ScaledDecimal::parse_tagged(&x.to_tagged()).unwrap();

            assert_eq!(parsed.exponent(), x.exponent(), "exponent for {}", value);
            if x.is_zero() {
                assert!(parsed.is_zero());
            } else {
                assert!(
                    (parsed.ratio_to(&x) - 1.0).abs() < 1e-3,
                    "{:?} vs {:?}",
                    parsed,
                    x
                );
            }
        }
    }

    #[test]
    fn test_add_same_exponent() {
        let mut x = ScaledDecimal::new(250.0);
        x.add(&ScaledDecimal::new(100.0));
        assert_eq!(x.mantissa(), 350.0);
        assert_eq!(x.exponent(), 0);
    }

    #[test]
    fn test_add_carries_over_group() {
        let mut x = ScaledDecimal::new(999.5);
        x.add(&ScaledDecimal::new(999.5));
        assert!(approx(x.mantissa(), 1.999));
        assert_eq!(x.exponent(), 3);
        assert_eq!(x.to_string(), "1.999K");
    }

    #[test]
    fn test_add_aligns_exponents() {
        let mut x = sd(500.0, 0);
        x.add(&sd(1.0, 6));
        assert!(approx(x.mantissa(), 1.0005));
        assert_eq!(x.exponent(), 6);

        let mut y = sd(2.0, 6);
        y.add(&sd(500.0, 3));
        assert!(approx(y.mantissa(), 2.5));
        assert_eq!(y.exponent(), 6);
    }

    #[test]
    fn test_add_dead_zone() {
        // Receiver dominates: unchanged
        let mut big = sd(1.0, 30);
        big.add(&sd(1.0, 0));
        assert_eq!(big, sd(1.0, 30));

        // Argument dominates: receiver takes its value, its own part is lost
        let mut small = sd(1.0, 0);
        small.add(&sd(1.0, 30));
        assert_eq!(small.mantissa(), 1.0);
        assert_eq!(small.exponent(), 30);

        // Gap of 12 is ignored
        let mut x = sd(999.0, 12);
        x.add(&sd(999.0, 0));
        assert_eq!(x, sd(999.0, 12));
    }

    #[test]
    fn test_add_gap_of_nine_is_aligned() {
        let mut x = sd(999.0, 0);
        x.add(&sd(1.0, 9));
        assert_eq!(x.exponent(), 9);
        assert!(x.mantissa() > 1.0);

        let mut y = sd(1.0, 9);
        y.add(&sd(999.0, 0));
        assert_eq!(y.exponent(), 9);
        assert!(y.mantissa() > 1.0);
    }

    #[test]
    fn test_add_zero_identity() {
        for x in [sd(1.0, 0), sd(123.456, 9), sd(-7.5, 30), sd(0.125, 0)] {
            let mut y = x.clone();
            y.add(&ScaledDecimal::zero());
            assert_eq!(y.mantissa().to_bits(), x.mantissa().to_bits());
            assert_eq!(y.exponent(), x.exponent());
        }
    }

    #[test]
    fn test_subtract() {
        let mut x = ScaledDecimal::new(100.0);
        x.subtract(&ScaledDecimal::new(30.0));
        assert_eq!(x.mantissa(), 70.0);

        x.subtract_f32(100.0);
        assert_eq!(x.mantissa(), -30.0);
        assert!(x.is_negative());

        let mut y = sd(1.5, 3);
        y.subtract(&sd(600.0, 0));
        assert!(approx(y.mantissa(), 900.0));
        assert_eq!(y.exponent(), 0);
    }

    #[test]
    fn test_subtract_dead_zone() {
        let mut big = sd(5.0, 24);
        big.subtract(&sd(5.0, 0));
        assert_eq!(big, sd(5.0, 24));

        let mut small = sd(5.0, 0);
        small.subtract(&sd(2.0, 24));
        assert_eq!(small.mantissa(), -2.0);
        assert_eq!(small.exponent(), 24);
    }

    #[test]
    fn test_multiply() {
        let mut x = ScaledDecimal::new(5.0);
        x.multiply(&ScaledDecimal::new(1000.0));
        assert_eq!(x.mantissa(), 5.0);
        assert_eq!(x.exponent(), 3);
        assert_eq!(x.to_string(), "5.000K");

        let mut y = sd(20.0, 6);
        y.multiply(&sd(50.0, 9));
        assert!(approx(y.mantissa(), 1.0));
        assert_eq!(y.exponent(), 18);

        let mut z = sd(2.0, 3);
        z.multiply_f32(0.75);
        assert!(approx(z.mantissa(), 1.5));
        assert_eq!(z.exponent(), 3);
    }

    #[test]
    fn test_divide() {
        let mut x = sd(9.0, 6);
        x.divide(&sd(3.0, 3)).unwrap();
        assert!(approx(x.mantissa(), 3.0));
        assert_eq!(x.exponent(), 3);

        // Negative exponent climbs back to zero
        let mut y = ScaledDecimal::new(1.0);
        y.divide(&sd(4.0, 3)).unwrap();
        assert!(approx(y.mantissa(), 0.00025));
        assert_eq!(y.exponent(), 0);
    }

    #[test]
    fn test_divide_by_zero() {
        let mut x = sd(42.0, 9);
        let result = x.divide(&ScaledDecimal::zero()).map(|_| ());
        assert_eq!(result, Err(NumericError::DivisionByZero));
        assert_eq!(x, sd(42.0, 9));

        let mut y = ScaledDecimal::zero();
        assert_eq!(
            y.divide_f32(0.0).map(|_| ()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_multiply_divide_inverse() {
        let pairs = [
            (sd(123.4, 6), sd(7.5, 3)),
            (sd(500.0, 0), sd(5.0, 0)),
            (sd(-2.5, 27), sd(0.004, 0)),
        ];

        for (x, y) in pairs {
            let mut z = x.clone();
            z.multiply(&y).divide(&y).unwrap();
            assert_eq!(z.exponent(), x.exponent());
            assert!(approx(z.mantissa(), x.mantissa()), "{:?} vs {:?}", z, x);
        }
    }

    #[test]
    fn test_compare_signs() {
        let pos = sd(1.0, 0);
        let neg = sd(-500.0, 24);
        let zero = ScaledDecimal::zero();

        assert_eq!(pos.compare(&neg), Ordering::Greater);
        assert_eq!(neg.compare(&pos), Ordering::Less);
        assert_eq!(zero.compare(&neg), Ordering::Greater);
        assert_eq!(neg.compare(&zero), Ordering::Less);
        assert_eq!(zero.compare(&pos), Ordering::Less);
        assert_eq!(pos.compare(&zero), Ordering::Greater);
        assert_eq!(zero.compare(&zero), Ordering::Equal);
    }

    #[test]
    fn test_compare_same_sign() {
        assert_eq!(sd(1.0, 6).compare(&sd(999.0, 3)), Ordering::Greater);
        assert_eq!(sd(2.0, 3).compare(&sd(3.0, 3)), Ordering::Less);
        assert_eq!(sd(-1.0, 6).compare(&sd(-999.0, 3)), Ordering::Less);
        assert_eq!(sd(-1.0, 0).compare(&sd(-5.0, 0)), Ordering::Greater);
        assert_eq!(sd(-5.0, 3).compare(&sd(-5.0, 3)), Ordering::Equal);
    }

    #[test]
    fn test_compare_f32_and_operators() {
        let x = sd(1.5, 3);
        assert_eq!(x.compare_f32(1500.0), Ordering::Equal);
        assert_eq!(x.compare_f32(2000.0), Ordering::Less);
        assert!(x > ScaledDecimal::new(999.0));
        assert!(x <= sd(1.5, 3));
    }

    #[test]
    fn test_ratio_to() {
        let health = sd(500.0, 0);
        let max_health = sd(1.0, 3);
        assert!(approx(health.ratio_to(&max_health), 0.5));
        assert!(approx(max_health.ratio_to(&health), 2.0));
    }

    #[test]
    fn test_predicates() {
        assert!(sd(1.0, 3).is_positive());
        assert!(sd(-1.0, 3).is_negative());
        assert!(ScaledDecimal::zero().is_zero());
        assert!(!ScaledDecimal::zero().is_positive());
        assert!(!ScaledDecimal::zero().is_negative());
    }

    #[test]
    fn test_reset_and_set_value() {
        let mut x = sd(7.0, 12);
        x.reset_to_zero();
        assert!(x.is_zero());
        assert_eq!(x.exponent(), 0);
        assert_eq!(x.to_string(), "0.000");

        x.set_value(2500.0);
        assert!(approx(x.mantissa(), 2.5));
        assert_eq!(x.exponent(), 3);
        assert_eq!(x.to_string(), "2.500K");
    }

    #[test]
    fn test_round() {
        let mut x = ScaledDecimal::new(2.5);
        x.round();
        assert_eq!(x.mantissa(), 2.0);
        assert_eq!(x.to_string(), "2.000");

        let mut y = ScaledDecimal::new(3.7);
        y.round();
        assert_eq!(y.mantissa(), 4.0);

        let mut scaled = sd(1.5, 3);
        scaled.round();
        assert_eq!(scaled, sd(1.5, 3));
    }

    #[test]
    fn test_scale_by_exp() {
        let mut x = ScaledDecimal::new(2.0);
        x.scale_by_exp(0.0);
        assert_eq!(x.mantissa(), 2.0);

        x.scale_by_exp(1.0);
        assert!(approx(x.mantissa(), 2.0 * std::f32::consts::E));
    }

    #[test]
    fn test_assign_operators() {
        let mut x = ScaledDecimal::new(10.0);
        x += &ScaledDecimal::new(5.0);
        x += 5.0;
        assert_eq!(x.mantissa(), 20.0);

        x -= &ScaledDecimal::new(10.0);
        x -= 2.0;
        assert_eq!(x.mantissa(), 8.0);

        x *= &sd(1.0, 3);
        x *= 2.0;
        assert_eq!(x.mantissa(), 16.0);
        assert_eq!(x.exponent(), 3);

        let negated = -x;
        assert_eq!(negated.mantissa(), -16.0);
        assert_eq!(negated.to_string(), "-16.000K");
    }

    #[test]
    fn test_sum() {
        let values = vec![sd(500.0, 0), sd(500.0, 0), sd(1.0, 3)];
        let total: ScaledDecimal = values.iter().sum();
        assert!(approx(total.mantissa(), 2.0));
        assert_eq!(total.exponent(), 3);

        let owned: ScaledDecimal = values.into_iter().sum();
        assert_eq!(owned, total);
    }

    #[test]
    fn test_to_decimal() {
        use rust_decimal::Decimal;

        let x = sd(5.0, 3);
        assert_eq!(x.to_decimal(), Some(Decimal::from(5000)));

        let too_big = sd(1.0, 30);
        assert_eq!(too_big.to_decimal(), None);
    }

    #[test]
    fn test_to_f64() {
        let x = sd(2.5, 6);
        assert!((x.to_f64() - 2.5e6).abs() < 1.0);
    }

    #[test]
    fn test_debug_format() {
        let x = sd(5.0, 3);
        assert_eq!(
            format!("{:?}", x),
            "ScaledDecimal(5.000K, mantissa=5, exponent=3)"
        );
    }

    #[test]
    fn test_from_parts_out_of_range() {
        assert!(ScaledDecimal::from_parts(1.0, MAX_EXPONENT).is_ok());
        assert_eq!(
            ScaledDecimal::from_parts(1.0, MAX_EXPONENT + 3).unwrap_err(),
            NumericError::ExponentOutOfRange(MAX_EXPONENT + 3)
        );
        assert_eq!(
            ScaledDecimal::from_parts(2.0, 1_500_000_000).unwrap_err(),
            NumericError::ExponentOutOfRange(1_500_000_000)
        );
        assert_eq!(
            ScaledDecimal::from_parts(1.0, -(MAX_EXPONENT + 3)).unwrap_err(),
            NumericError::ExponentOutOfRange(-(MAX_EXPONENT + 3))
        );
    }

    #[test]
    fn test_parse_tagged_out_of_range() {
        let at_limit = format!("BN1P{}", "Y".repeat(416));
        assert_eq!(
            ScaledDecimal::parse_tagged(&at_limit).unwrap().exponent(),
            MAX_EXPONENT
        );

        let past_limit = format!("BN1{}", "Y".repeat(417));
        assert!(matches!(
            ScaledDecimal::parse_tagged(&past_limit),
            Err(NumericError::ExponentOutOfRange(_))
        ));
    }

    #[test]
    fn test_square_near_limit_saturates() {
        let near = sd(2.0, MAX_EXPONENT - 3);
        let mut squared = near.clone();
        squared.multiply(&near);
        assert_eq!(squared.mantissa(), MANTISSA_CEILING);
        assert_eq!(squared.exponent(), MAX_EXPONENT);

        let mut negative = sd(-5.0, MAX_EXPONENT);
        negative.multiply(&sd(5.0, MAX_EXPONENT));
        assert_eq!(negative.mantissa(), -MANTISSA_CEILING);
        assert_eq!(negative.exponent(), MAX_EXPONENT);

        // Saturated values still render and parse back
        let parsed = ScaledDecimal::parse_tagged(&squared.to_tagged()).unwrap();
        assert_eq!(parsed, squared);
    }

    #[test]
    fn test_divide_by_limit_underflows_to_zero() {
        let mut x = ScaledDecimal::new(1.0);
        x.divide(&sd(1.0, MAX_EXPONENT)).unwrap();
        assert!(x.is_zero());
        assert_eq!(x.exponent(), 0);
        assert_eq!(x.to_string(), "0.000");

        let mut zero = ScaledDecimal::zero();
        zero.multiply(&sd(1.0, MAX_EXPONENT));
        assert!(zero.is_zero());
        assert_eq!(zero.exponent(), 0);
    }

    #[test]
    fn test_add_across_full_range() {
        let mut small = sd(1.0, 0);
        small.add(&sd(1.0, MAX_EXPONENT));
        assert_eq!(small, sd(1.0, MAX_EXPONENT));

        let mut big = sd(1.0, MAX_EXPONENT);
        big.subtract(&sd(1.0, 0));
        assert_eq!(big, sd(1.0, MAX_EXPONENT));
    }

    #[test]
    fn test_display_string_is_not_tagged_input() {
        // Only the "BN"-tagged form carries suffixes back in
        let x = sd(1.5, 3);
        assert_eq!(
            ScaledDecimal::parse_tagged(x.as_str()),
            Err(NumericError::InvalidFormat)
        );
        assert_eq!(
            ScaledDecimal::parse_tagged(&sd(24.55, 30).to_string()),
            Err(NumericError::InvalidFormat)
        );

        // Unsuffixed displays are plain floats and still parse
        let plain = sd(250.0, 0);
        assert_eq!(ScaledDecimal::parse_tagged(plain.as_str()), Ok(plain));
    }
}
