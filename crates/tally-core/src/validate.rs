//! Input validation for user-entered category names and amounts

use crate::error::{Error, Result};

/// Maximum accepted category name length in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 64;

/// Validate a category name, returning the trimmed form that gets stored.
///
/// Rejects empty/whitespace-only input, names over [`MAX_CATEGORY_NAME_LEN`]
/// characters, and control characters. The same rule applies at creation and
/// rename.
pub fn category_name(input: &str) -> Result<String> {
    let name = input.trim();

    if name.is_empty() {
        return Err(Error::InvalidData("category name is empty".into()));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(Error::InvalidData(format!(
            "category name longer than {} characters",
            MAX_CATEGORY_NAME_LEN
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::InvalidData(
            "category name contains control characters".into(),
        ));
    }

    Ok(name.to_string())
}

/// Parse a user-entered expense amount.
///
/// Accepts thousands separated by spaces and a comma as the decimal
/// separator ("2 500" -> 2500.0, "1500,50" -> 1500.5). The result must be a
/// positive finite number; anything else is `Error::InvalidData` and no
/// write happens.
pub fn parse_amount(input: &str) -> Result<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let amount: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidData(format!("not a number: {:?}", input)))?;

    ensure_positive_amount(amount)?;
    Ok(amount)
}

/// Check that an amount is positive and finite (shared with the store,
/// which must reject bad values arriving through the API as well).
pub fn ensure_positive_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidData(format!("amount is not finite: {}", amount)));
    }
    if amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "amount must be positive: {}",
            amount
        )));
    }
    Ok(())
}
