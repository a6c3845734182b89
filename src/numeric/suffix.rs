// ============================================================================
// Unit Suffixes
// Letter <-> power-of-ten table for engineering notation
// ============================================================================

/// Unit letters and the power of ten each one adds.
pub const UNIT_LETTERS: [(char, i32); 8] = [
    ('K', 3),
    ('M', 6),
    ('G', 9),
    ('T', 12),
    ('P', 15),
    ('E', 18),
    ('Z', 21),
    ('Y', 24),
];

/// Largest single-letter power. Anything beyond repeats `Y`.
pub const YOTTA_EXPONENT: i32 = 24;

/// Power of ten contributed by a suffix letter, if it is in the table.
#[inline]
pub fn exponent_for(letter: char) -> Option<i32> {
    UNIT_LETTERS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, exponent)| *exponent)
}

/// Suffix letter for an exponent strictly between 0 and 24.
#[inline]
pub fn letter_for(exponent: i32) -> Option<char> {
    UNIT_LETTERS
        .iter()
        .find(|(_, e)| *e == exponent)
        .map(|(letter, _)| *letter)
}

/// Render the full suffix for a non-negative exponent.
///
/// Each whole 24 becomes a trailing `Y`; the remainder becomes a single
/// leading letter. `30` renders as `"MY"`, `48` as `"YY"`, `0` as `""`.
pub fn unit_suffix(exponent: i32) -> String {
    debug_assert!(exponent >= 0 && exponent % 3 == 0);

    let yottas = (exponent / YOTTA_EXPONENT).max(0) as usize;
    let remainder = exponent % YOTTA_EXPONENT;

    let mut suffix = String::with_capacity(yottas + 1);
    if let Some(letter) = letter_for(remainder) {
        suffix.push(letter);
    }
    suffix.extend(std::iter::repeat('Y').take(yottas));
    suffix
}
