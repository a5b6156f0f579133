//! Expense recording flow

use tracing::error;

use tally_core::{validate, Error as CoreError};

use crate::callback::CallbackData;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::messages;
use crate::session::{ChatState, Session};
use crate::transport::{MessageEvent, SelectionEvent};

impl Dispatcher {
    /// Menu action: show the picker of active categories to spend against
    pub(crate) async fn on_expense_menu(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        self.send_category_picker(session, event, CallbackData::ExpenseCategory)
            .await
    }

    /// A category was picked: remember it and ask for the amount
    pub(crate) async fn on_expense_category_selected(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        category_id: i64,
    ) -> Result<()> {
        session.state = ChatState::AwaitingExpenseAmount { category_id };
        self.transport
            .edit_message(
                event.chat_id,
                event.message_id,
                messages::EXPENSE_AMOUNT_PROMPT,
                None,
            )
            .await
            .map_err(Error::Transport)
    }

    /// Text input while awaiting the amount
    ///
    /// Invalid input replies an error and stays in the same state so the
    /// user can retry in place; this is the only transition that does not
    /// return to the default state on failure.
    pub(crate) async fn on_expense_amount(
        &self,
        session: &mut Session,
        event: &MessageEvent,
        category_id: i64,
    ) -> Result<()> {
        let Some(user_id) = self
            .require_user(event.chat_id, event.user_id, session)
            .await?
        else {
            return Ok(());
        };

        let amount = match validate::parse_amount(&event.text) {
            Ok(amount) => amount,
            Err(_) => {
                // Retry in place
                return self.reply(event.chat_id, messages::EXPENSE_AMOUNT_ERROR).await;
            }
        };

        session.reset();
        match self.db.record_expense(user_id, category_id, amount) {
            Ok(_) => self.reply(event.chat_id, messages::EXPENSE_SUCCESS).await,
            Err(CoreError::InvalidData(_)) => {
                self.reply(event.chat_id, messages::EXPENSE_AMOUNT_ERROR).await
            }
            Err(e) => {
                error!(user_id, category_id, error = %e, "expense insert failed");
                self.reply(event.chat_id, messages::EXPENSE_ERROR).await
            }
        }
    }
}
