// ============================================================================
// Numeric Errors
// Error types for scaled-decimal parsing and arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur while parsing or operating on a `ScaledDecimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input string could not be parsed as a number or tagged value
    InvalidFormat,
    /// Tagged string carries a letter outside the unit table
    UnknownSuffix(char),
    /// Exponent is not a multiple of 3
    MisalignedExponent(i32),
    /// Exponent lies outside `±MAX_EXPONENT`
    ExponentOutOfRange(i32),
    /// Attempted division by a zero-valued operand
    DivisionByZero,
}

impl NumericError {
    /// True for errors caused by malformed user or content input.
    ///
    /// These are recoverable: the caller is expected to report a
    /// "wrong format" message and ask again.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            NumericError::InvalidFormat
                | NumericError::UnknownSuffix(_)
                | NumericError::MisalignedExponent(_)
                | NumericError::ExponentOutOfRange(_)
        )
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidFormat => {
                write!(f, "invalid format: could not parse scaled decimal")
            },
            NumericError::UnknownSuffix(letter) => {
                write!(f, "invalid format: unknown unit suffix '{}'", letter)
            },
            NumericError::MisalignedExponent(exponent) => write!(
                f,
                "invalid exponent {}: must be a multiple of 3",
                exponent
            ),
            NumericError::ExponentOutOfRange(exponent) => {
                write!(f, "invalid exponent {}: out of range", exponent)
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::UnknownSuffix('Q').to_string(),
            "invalid format: unknown unit suffix 'Q'"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_format_error_classification() {
        assert!(NumericError::InvalidFormat.is_format_error());
        assert!(NumericError::UnknownSuffix('x').is_format_error());
        assert!(NumericError::MisalignedExponent(4).is_format_error());
        assert!(NumericError::ExponentOutOfRange(10_002).is_format_error());
        assert!(!NumericError::DivisionByZero.is_format_error());
    }
}
