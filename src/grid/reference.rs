//! A1-style cell references.

use crate::error::{Error, Result};

/// Convert a cell reference such as `"AB12"` into zero-based `(row, column)`.
///
/// Absolute markers (`$A$1`) are accepted. Anything else, including a row of
/// zero or a missing part, is rejected with [`Error::InvalidCellReference`].
pub fn parse_reference(reference: &str) -> Result<(usize, usize)> {
    let invalid = || Error::InvalidCellReference(reference.to_string());
    let cleaned: String = reference.chars().filter(|&c| c != '$').collect();

    let split = cleaned
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;
    let (letters, digits) = cleaned.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let column = column_index(letters).ok_or_else(invalid)?;
    let row: usize = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((row - 1, column))
}

/// Zero-based column index for column letters (`A` = 0, `AA` = 26).
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
    .map(|n| n - 1)
}

/// Format zero-based `(row, column)` as an A1-style reference.
pub fn to_reference(row: usize, column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("A1").unwrap(), (0, 0));
        assert_eq!(parse_reference("AB12").unwrap(), (11, 27));
        assert_eq!(parse_reference("$C$3").unwrap(), (2, 2));
        assert_eq!(parse_reference("xfd1").unwrap(), (0, 16383));
    }

    #[test]
    fn test_parse_reference_rejects_malformed() {
        for bad in ["1A", "A", "12", "A0", "A1B", "", "Á1"] {
            assert!(
                matches!(parse_reference(bad), Err(Error::InvalidCellReference(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_reference() {
        assert_eq!(to_reference(0, 0), "A1");
        assert_eq!(to_reference(11, 27), "AB12");
        assert_eq!(to_reference(4, 25), "Z5");
        assert_eq!(to_reference(0, 26), "AA1");
    }
}
