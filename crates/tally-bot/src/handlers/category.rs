//! Category flows: create, rename, delete (with confirmation)

use tracing::error;

use tally_core::Error as CoreError;

use crate::callback::CallbackData;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::keyboard;
use crate::messages;
use crate::session::{ChatState, Session};
use crate::transport::{MessageEvent, SelectionEvent};

impl Dispatcher {
    // --- create ---

    /// Menu action: ask for a name and start waiting for it
    pub(crate) async fn on_create_category_menu(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        session.state = ChatState::AwaitingCategoryName;
        self.reply(event.chat_id, messages::CREATE_CATEGORY_PROMPT).await
    }

    /// Text input while awaiting a category name
    ///
    /// Single attempt: valid or not, the session returns to the default
    /// state afterwards.
    pub(crate) async fn on_category_name(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        session.reset();

        let Some(user_id) = self
            .require_user(event.chat_id, event.user_id, session)
            .await?
        else {
            return Ok(());
        };

        match self.db.create_category(user_id, &event.text) {
            Ok(_) => self.reply(event.chat_id, messages::CREATE_CATEGORY_SUCCESS).await,
            Err(CoreError::InvalidData(_)) => {
                self.reply(event.chat_id, messages::INVALID_CATEGORY_NAME).await
            }
            Err(e) => {
                error!(user_id, error = %e, "category creation failed");
                self.reply(event.chat_id, messages::CREATE_CATEGORY_ERROR).await
            }
        }
    }

    // --- rename ---

    /// Menu action: show the picker of active categories to rename
    pub(crate) async fn on_rename_menu(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        self.send_category_picker(session, event, CallbackData::RenameCategory)
            .await
    }

    /// A category was picked for renaming: remember it (and the prompting
    /// message, for later cleanup) and wait for the new name
    pub(crate) async fn on_rename_selected(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        category_id: i64,
    ) -> Result<()> {
        session.state = ChatState::AwaitingNewCategoryName {
            category_id,
            prompt_message_id: Some(event.message_id),
        };
        self.transport
            .edit_message(event.chat_id, event.message_id, messages::RENAME_PROMPT, None)
            .await
            .map_err(Error::Transport)
    }

    /// Text input while awaiting the new name
    pub(crate) async fn on_new_category_name(
        &self,
        session: &mut Session,
        event: &MessageEvent,
        category_id: i64,
        prompt_message_id: Option<i64>,
    ) -> Result<()> {
        session.reset();

        match self.db.rename_category(category_id, &event.text) {
            Ok(()) => {
                if let Some(message_id) = prompt_message_id {
                    self.discard_message(event.chat_id, message_id).await;
                }
                self.reply(event.chat_id, messages::RENAME_SUCCESS).await
            }
            Err(CoreError::InvalidData(_)) => {
                self.reply(event.chat_id, messages::INVALID_CATEGORY_NAME).await
            }
            Err(CoreError::NotFound(_)) => {
                self.reply(event.chat_id, messages::CATEGORY_NOT_FOUND).await
            }
            Err(e) => {
                error!(category_id, error = %e, "category rename failed");
                self.reply(event.chat_id, messages::RENAME_ERROR).await
            }
        }
    }

    // --- delete ---

    /// Menu action: show the picker of active categories to delete
    pub(crate) async fn on_delete_menu(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        self.send_category_picker(session, event, CallbackData::DeleteCategory)
            .await
    }

    /// A category was picked for deletion: swap the picker for a
    /// confirm/cancel prompt carrying the category's name
    pub(crate) async fn on_delete_selected(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        category_id: i64,
    ) -> Result<()> {
        let name = match self.db.category_name(category_id) {
            Ok(Some(name)) => name,
            Ok(None) => {
                session.reset();
                return self.reply(event.chat_id, messages::CATEGORY_NOT_FOUND).await;
            }
            Err(e) => {
                error!(category_id, error = %e, "category lookup failed");
                session.reset();
                return self.reply(event.chat_id, messages::GENERIC_ERROR).await;
            }
        };

        let keyboard = keyboard::delete_confirmation(&self.config, category_id);
        self.transport
            .edit_message(
                event.chat_id,
                event.message_id,
                &messages::delete_confirmation(&name),
                Some(&keyboard),
            )
            .await
            .map_err(Error::Transport)
    }

    /// Deletion confirmed: soft-delete the category
    pub(crate) async fn on_delete_confirmed(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        category_id: i64,
    ) -> Result<()> {
        session.reset();
        self.discard_message(event.chat_id, event.message_id).await;

        match self.db.soft_delete_category(category_id) {
            Ok(()) => self.reply(event.chat_id, messages::DELETE_SUCCESS).await,
            Err(CoreError::NotFound(_)) => {
                self.reply(event.chat_id, messages::CATEGORY_NOT_FOUND).await
            }
            Err(e) => {
                error!(category_id, error = %e, "category soft-delete failed");
                self.reply(event.chat_id, messages::DELETE_ERROR).await
            }
        }
    }

    /// Deletion cancelled: a normal transition, no store mutation
    pub(crate) async fn on_delete_cancelled(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
    ) -> Result<()> {
        session.reset();
        self.discard_message(event.chat_id, event.message_id).await;
        self.reply(event.chat_id, messages::DELETE_CANCELLED).await
    }

    /// Shared picker sender for the rename/delete/expense menus
    pub(crate) async fn send_category_picker(
        &self,
        session: &mut Session,
        event: &MessageEvent,
        to_token: impl Fn(i64) -> CallbackData + Send,
    ) -> Result<()> {
        let Some(user_id) = self
            .require_user(event.chat_id, event.user_id, session)
            .await?
        else {
            return Ok(());
        };

        let categories = match self.db.list_active_categories(user_id) {
            Ok(categories) => categories,
            Err(e) => {
                error!(user_id, error = %e, "category listing failed");
                session.reset();
                return self.reply(event.chat_id, messages::CHOOSE_CATEGORY_ERROR).await;
            }
        };

        let keyboard = keyboard::category_picker(&categories, to_token);
        self.transport
            .send_keyboard(event.chat_id, messages::CHOOSE_CATEGORY, &keyboard)
            .await
            .map(|_| ())
            .map_err(Error::Transport)
    }
}
