//! User-facing reply texts

pub const START: &str = "Hi! 👋 I'm your personal finance assistant.\n\
Ready to help you manage your spending and budget. 💰\n\
What shall we do today?";

pub const CREATE_CATEGORY_PROMPT: &str = "Enter a name for the new category:";
pub const CREATE_CATEGORY_SUCCESS: &str = "Done! Category added ✅";
pub const CREATE_CATEGORY_ERROR: &str = "Couldn't create the category. Please try again.";
pub const INVALID_CATEGORY_NAME: &str =
    "That doesn't look like a valid name. Use 1-64 visible characters.";

pub const CHOOSE_CATEGORY: &str = "Pick a category:";
pub const CHOOSE_CATEGORY_ERROR: &str = "Couldn't fetch your categories.";
pub const NO_CATEGORIES_HINT: &str = "Add a category first";

pub const RENAME_PROMPT: &str = "Enter the new category name:";
pub const RENAME_SUCCESS: &str = "Renamed ✅";
pub const RENAME_ERROR: &str = "Something went wrong while renaming. Please try again.";

pub const DELETE_SUCCESS: &str = "Category deleted 🗑️";
pub const DELETE_CANCELLED: &str = "Deletion cancelled.";
pub const DELETE_ERROR: &str = "Something went wrong while deleting. Please try again.";

pub const EXPENSE_CHOOSE_CATEGORY: &str = "Which category should the expense go to?";
pub const EXPENSE_AMOUNT_PROMPT: &str = "And how much did you spend?";
pub const EXPENSE_SUCCESS: &str = "Recorded 💾";
pub const EXPENSE_AMOUNT_ERROR: &str = "Enter a valid amount (for example: 2500 or 1500.50)";
pub const EXPENSE_ERROR: &str = "Couldn't record the expense. Please try again.";

pub const USER_NOT_FOUND: &str = "Couldn't find your data. Please start over with /start.";
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
pub const NO_CATEGORIES_YET: &str = "You don't have any categories yet. Create one first.";
pub const CATEGORY_NOT_FOUND: &str = "Category not found.";

pub const CHOOSE_PERIOD: &str = "Pick a period:";
pub const STATS_ERROR: &str = "Couldn't get your statistics. Please try again later.";

pub const INVALID_SELECTION: &str = "That selection didn't work. Please try again.";

/// Confirmation prompt shown before a category is soft-deleted
pub fn delete_confirmation(category_name: &str) -> String {
    format!(
        "❗️Are you sure you want to delete *{}*?\n\
         New expenses will no longer be possible, but old ones stay in your statistics.\n\n\
         *This cannot be undone.*",
        category_name
    )
}
