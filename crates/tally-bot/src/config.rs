//! Bot configuration
//!
//! Everything that used to be ambient (button labels, top-N size, the
//! "other" bucket label) lives in one immutable struct handed to the
//! dispatcher at construction time.

/// Labels of the persistent main-menu buttons
///
/// Inbound text is matched against these to recognize menu actions, so the
/// dispatcher never hardcodes user-facing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLabels {
    pub create_category: String,
    pub record_expense: String,
    pub delete_category: String,
    pub rename_category: String,
    pub top_expenses: String,
    pub statistics: String,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            create_category: "💲 Create category".to_string(),
            record_expense: "✍️ Record expense".to_string(),
            delete_category: "🗑️ Delete category".to_string(),
            rename_category: "✏️ Rename category".to_string(),
            top_expenses: "📉 Top expenses".to_string(),
            statistics: "📊 Statistics".to_string(),
        }
    }
}

/// Labels of the period-picker buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLabels {
    pub week: String,
    pub month: String,
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self {
            week: "Last week".to_string(),
            month: "Last month".to_string(),
        }
    }
}

/// Labels of the delete-confirmation buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmLabels {
    pub confirm: String,
    pub cancel: String,
}

impl Default for ConfirmLabels {
    fn default() -> Self {
        Self {
            confirm: "✅ Delete".to_string(),
            cancel: "❌ Cancel".to_string(),
        }
    }
}

/// Immutable bot-wide configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub menu: MenuLabels,
    pub periods: PeriodLabels,
    pub confirm: ConfirmLabels,
    /// Label of the folded remainder slice in the top-expenses pie
    pub other_label: String,
    /// How many categories the top-expenses view ranks before folding
    pub top_n: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            menu: MenuLabels::default(),
            periods: PeriodLabels::default(),
            confirm: ConfirmLabels::default(),
            other_label: "Other".to_string(),
            top_n: 3,
        }
    }
}
