//! Event dispatcher: routes inbound events through the conversation state
//! machine
//!
//! Menu actions are recognized from any state; other text input dispatches
//! on the session's current state. Selection tokens are decoded once here
//! and handed to the flow handlers as typed variants.
//!
//! The session's mutex is held for the whole handling of an event, so
//! events from the same (chat, user) pair are processed in arrival order
//! while distinct sessions proceed concurrently.

use std::sync::Arc;

use tracing::{error, warn};

use tally_core::Database;

use crate::callback::CallbackData;
use crate::charts::ChartRenderer;
use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::messages;
use crate::session::{ChatState, Session, SessionStore};
use crate::transport::{ChatTransport, MessageEvent, SelectionEvent};

pub struct Dispatcher {
    pub(crate) db: Database,
    pub(crate) transport: Arc<dyn ChatTransport>,
    pub(crate) renderer: Arc<dyn ChartRenderer>,
    pub(crate) config: BotConfig,
    sessions: SessionStore,
}

impl Dispatcher {
    pub fn new(
        db: Database,
        transport: Arc<dyn ChatTransport>,
        renderer: Arc<dyn ChartRenderer>,
        config: BotConfig,
    ) -> Self {
        Self {
            db,
            transport,
            renderer,
            config,
            sessions: SessionStore::new(),
        }
    }

    /// Handle an inbound text message
    pub async fn handle_message(&self, event: MessageEvent) -> Result<()> {
        let session = self
            .sessions
            .session((event.chat_id, event.user_id))
            .await;
        let mut session = session.lock().await;

        if event.text.trim() == "/start" {
            return self.on_start(&mut session, &event).await;
        }

        // Menu buttons act from any state
        let menu = &self.config.menu;
        let text = event.text.as_str();
        if text == menu.create_category {
            return self.on_create_category_menu(&mut session, &event).await;
        }
        if text == menu.rename_category {
            return self.on_rename_menu(&mut session, &event).await;
        }
        if text == menu.delete_category {
            return self.on_delete_menu(&mut session, &event).await;
        }
        if text == menu.record_expense {
            return self.on_expense_menu(&mut session, &event).await;
        }
        if text == menu.statistics {
            return self.on_statistics_menu(&event).await;
        }
        if text == menu.top_expenses {
            return self.on_top_expenses_menu(&event).await;
        }

        match session.state.clone() {
            ChatState::AwaitingCategoryName => self.on_category_name(&mut session, &event).await,
            ChatState::AwaitingExpenseAmount { category_id } => {
                self.on_expense_amount(&mut session, &event, category_id).await
            }
            ChatState::AwaitingNewCategoryName {
                category_id,
                prompt_message_id,
            } => {
                self.on_new_category_name(&mut session, &event, category_id, prompt_message_id)
                    .await
            }
            ChatState::Default => self.on_echo(&event).await,
        }
    }

    /// Handle an inbound button selection
    pub async fn handle_selection(&self, event: SelectionEvent) -> Result<()> {
        let session = self
            .sessions
            .session((event.chat_id, event.user_id))
            .await;
        let mut session = session.lock().await;

        let data = match CallbackData::parse(&event.token) {
            Ok(data) => data,
            Err(e) => {
                warn!(token = %event.token, "malformed selection token");
                self.reply(event.chat_id, messages::INVALID_SELECTION).await?;
                session.reset();
                return Err(e);
            }
        };

        match data {
            CallbackData::ExpenseCategory(id) => {
                self.on_expense_category_selected(&mut session, &event, id).await
            }
            CallbackData::RenameCategory(id) => {
                self.on_rename_selected(&mut session, &event, id).await
            }
            CallbackData::DeleteCategory(id) => {
                self.on_delete_selected(&mut session, &event, id).await
            }
            CallbackData::ConfirmDelete(id) => {
                self.on_delete_confirmed(&mut session, &event, id).await
            }
            CallbackData::CancelDelete(_) => self.on_delete_cancelled(&mut session, &event).await,
            CallbackData::StatsPeriod(kind) => {
                self.on_stats_period(&mut session, &event, kind).await
            }
            CallbackData::TopPeriod(kind) => self.on_top_period(&mut session, &event, kind).await,
            CallbackData::NoCategories => {
                self.reply(event.chat_id, messages::NO_CATEGORIES_YET).await
            }
        }
    }

    /// Send a plain reply, mapping transport failures into the bot error
    pub(crate) async fn reply(&self, chat_id: i64, text: &str) -> Result<()> {
        self.transport
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(Error::Transport)
    }

    /// Resolve the internal user id for an external identity
    ///
    /// The one global recovery rule: when the user is unknown (or the store
    /// fails), reply and force the session back to the default state,
    /// whatever it was.
    pub(crate) async fn require_user(
        &self,
        chat_id: i64,
        user_id: i64,
        session: &mut Session,
    ) -> Result<Option<i64>> {
        match self.db.find_user_by_chat_id(user_id) {
            Ok(Some(id)) => Ok(Some(id)),
            Ok(None) => {
                session.reset();
                self.reply(chat_id, messages::USER_NOT_FOUND).await?;
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, "user lookup failed");
                session.reset();
                self.reply(chat_id, messages::GENERIC_ERROR).await?;
                Ok(None)
            }
        }
    }

    /// Best-effort deletion of a prior message (picker or prompt cleanup)
    pub(crate) async fn discard_message(&self, chat_id: i64, message_id: i64) {
        if let Err(e) = self.transport.delete_message(chat_id, message_id).await {
            warn!(chat_id, message_id, error = %e, "failed to delete message");
        }
    }
}
