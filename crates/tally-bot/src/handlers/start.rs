//! /start registration and the default-state echo

use tracing::error;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::keyboard;
use crate::messages;
use crate::session::Session;
use crate::transport::MessageEvent;

impl Dispatcher {
    /// Register (or refresh) the user and show the main menu
    ///
    /// Upserts the user keyed by external identity on every /start, resets
    /// the session, and greets with the persistent menu keyboard.
    pub(crate) async fn on_start(
        &self,
        session: &mut Session,
        event: &MessageEvent,
    ) -> Result<()> {
        if let Err(e) = self.db.upsert_user(event.user_id, &event.profile) {
            error!(user_id = event.user_id, error = %e, "user upsert failed");
            session.reset();
            return self.reply(event.chat_id, messages::GENERIC_ERROR).await;
        }

        session.reset();
        let menu = keyboard::main_menu(&self.config);
        self.transport
            .send_menu(event.chat_id, messages::START, &menu)
            .await
            .map(|_| ())
            .map_err(crate::error::Error::Transport)
    }

    /// Echo unrecognized text back while no flow is in progress
    pub(crate) async fn on_echo(&self, event: &MessageEvent) -> Result<()> {
        self.reply(event.chat_id, &event.text).await
    }
}
