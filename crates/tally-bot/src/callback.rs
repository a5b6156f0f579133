//! Selection tokens carried by inline-keyboard buttons
//!
//! Tokens are decoded exactly once at the dispatch boundary into this
//! tagged union; handlers never see raw strings.

use tally_core::PeriodKind;

use crate::error::{Error, Result};

/// Decoded selection token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackData {
    /// Category picked as the target of a new expense
    ExpenseCategory(i64),
    /// Category picked for renaming
    RenameCategory(i64),
    /// Category picked for deletion (confirmation follows)
    DeleteCategory(i64),
    /// Deletion confirmed
    ConfirmDelete(i64),
    /// Deletion cancelled
    CancelDelete(i64),
    /// Period picked for the bar-chart statistics view
    StatsPeriod(PeriodKind),
    /// Period picked for the top-expenses pie view
    TopPeriod(PeriodKind),
    /// Placeholder button shown when the category picker would be empty
    NoCategories,
}

impl CallbackData {
    /// Encode into the wire token placed in a button
    pub fn encode(&self) -> String {
        match self {
            Self::ExpenseCategory(id) => format!("expense:{}", id),
            Self::RenameCategory(id) => format!("rename:{}", id),
            Self::DeleteCategory(id) => format!("delete:{}", id),
            Self::ConfirmDelete(id) => format!("confirm-delete:{}", id),
            Self::CancelDelete(id) => format!("cancel-delete:{}", id),
            Self::StatsPeriod(kind) => format!("stats:{}", kind),
            Self::TopPeriod(kind) => format!("top:{}", kind),
            Self::NoCategories => "no-categories".to_string(),
        }
    }

    /// Decode a wire token; malformed input is `Error::InvalidSelection`
    pub fn parse(token: &str) -> Result<Self> {
        if token == "no-categories" {
            return Ok(Self::NoCategories);
        }

        let (tag, rest) = token
            .split_once(':')
            .ok_or_else(|| Error::InvalidSelection(token.to_string()))?;

        let parsed = match tag {
            "expense" | "rename" | "delete" | "confirm-delete" | "cancel-delete" => {
                let id: i64 = rest
                    .parse()
                    .map_err(|_| Error::InvalidSelection(token.to_string()))?;
                match tag {
                    "expense" => Self::ExpenseCategory(id),
                    "rename" => Self::RenameCategory(id),
                    "delete" => Self::DeleteCategory(id),
                    "confirm-delete" => Self::ConfirmDelete(id),
                    _ => Self::CancelDelete(id),
                }
            }
            "stats" | "top" => {
                let kind: PeriodKind = rest
                    .parse()
                    .map_err(|_| Error::InvalidSelection(token.to_string()))?;
                if tag == "stats" {
                    Self::StatsPeriod(kind)
                } else {
                    Self::TopPeriod(kind)
                }
            }
            _ => return Err(Error::InvalidSelection(token.to_string())),
        };

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cases = [
            CallbackData::ExpenseCategory(12),
            CallbackData::RenameCategory(3),
            CallbackData::DeleteCategory(100),
            CallbackData::ConfirmDelete(100),
            CallbackData::CancelDelete(100),
            CallbackData::StatsPeriod(PeriodKind::Week),
            CallbackData::TopPeriod(PeriodKind::Month),
            CallbackData::NoCategories,
        ];
        for data in cases {
            assert_eq!(CallbackData::parse(&data.encode()).unwrap(), data);
        }
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for token in ["", "expense", "expense:", "expense:abc", "stats:year", "bogus:1"] {
            assert!(
                matches!(CallbackData::parse(token), Err(Error::InvalidSelection(_))),
                "token {:?} should be rejected",
                token
            );
        }
    }
}
