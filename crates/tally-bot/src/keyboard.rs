//! Keyboard builders

use tally_core::{CategoryRef, PeriodKind};

use crate::callback::CallbackData;
use crate::config::BotConfig;
use crate::messages;
use crate::transport::{InlineButton, InlineKeyboard, MenuKeyboard};

/// Build the persistent main-menu keyboard from configured labels
pub fn main_menu(config: &BotConfig) -> MenuKeyboard {
    MenuKeyboard {
        rows: vec![
            vec![
                config.menu.create_category.clone(),
                config.menu.rename_category.clone(),
            ],
            vec![
                config.menu.delete_category.clone(),
                config.menu.record_expense.clone(),
            ],
            vec![
                config.menu.top_expenses.clone(),
                config.menu.statistics.clone(),
            ],
        ],
    }
}

/// Build a category picker, one button per active category
///
/// Categories lay out in 2 columns when there are 4 or fewer, otherwise 3.
/// An empty list yields a single placeholder button nudging the user to
/// create a category first.
pub fn category_picker(
    categories: &[CategoryRef],
    to_token: impl Fn(i64) -> CallbackData,
) -> InlineKeyboard {
    if categories.is_empty() {
        return InlineKeyboard {
            rows: vec![vec![InlineButton {
                label: messages::NO_CATEGORIES_HINT.to_string(),
                token: CallbackData::NoCategories.encode(),
            }]],
        };
    }

    let columns = if categories.len() <= 4 { 2 } else { 3 };
    let rows = categories
        .chunks(columns)
        .map(|chunk| {
            chunk
                .iter()
                .map(|c| InlineButton {
                    label: c.name.clone(),
                    token: to_token(c.id).encode(),
                })
                .collect()
        })
        .collect();

    InlineKeyboard { rows }
}

/// Confirm/cancel pair shown before a category is soft-deleted
pub fn delete_confirmation(config: &BotConfig, category_id: i64) -> InlineKeyboard {
    InlineKeyboard {
        rows: vec![vec![
            InlineButton {
                label: config.confirm.confirm.clone(),
                token: CallbackData::ConfirmDelete(category_id).encode(),
            },
            InlineButton {
                label: config.confirm.cancel.clone(),
                token: CallbackData::CancelDelete(category_id).encode(),
            },
        ]],
    }
}

/// Period picker, one button per row
pub fn period_picker(
    config: &BotConfig,
    to_token: impl Fn(PeriodKind) -> CallbackData,
) -> InlineKeyboard {
    let rows = [
        (PeriodKind::Week, config.periods.week.clone()),
        (PeriodKind::Month, config.periods.month.clone()),
    ]
    .into_iter()
    .map(|(kind, label)| {
        vec![InlineButton {
            label,
            token: to_token(kind).encode(),
        }]
    })
    .collect();

    InlineKeyboard { rows }
}
