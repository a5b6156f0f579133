//! Statistics flows: per-category bar charts and the top-expenses pie
//!
//! Both flows are stateless: the menu action shows a period picker and the
//! selection resolves everything in one step, never touching session state.

use chrono::Utc;
use tracing::error;

use tally_core::{bar_chart_pages, pie_chart, time_window, PeriodKind};

use crate::callback::CallbackData;
use crate::charts::discard_rendered_files;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::keyboard;
use crate::messages;
use crate::session::Session;
use crate::transport::{MessageEvent, SelectionEvent};

impl Dispatcher {
    /// Menu action: pick a period for the bar-chart statistics
    pub(crate) async fn on_statistics_menu(&self, event: &MessageEvent) -> Result<()> {
        let keyboard = keyboard::period_picker(&self.config, CallbackData::StatsPeriod);
        self.transport
            .send_keyboard(event.chat_id, messages::CHOOSE_PERIOD, &keyboard)
            .await
            .map(|_| ())
            .map_err(Error::Transport)
    }

    /// Menu action: pick a period for the top-expenses pie
    pub(crate) async fn on_top_expenses_menu(&self, event: &MessageEvent) -> Result<()> {
        let keyboard = keyboard::period_picker(&self.config, CallbackData::TopPeriod);
        self.transport
            .send_keyboard(event.chat_id, messages::CHOOSE_PERIOD, &keyboard)
            .await
            .map(|_| ())
            .map_err(Error::Transport)
    }

    /// Period picked for the bar-chart view: aggregate, render, send,
    /// discard the rendered files
    pub(crate) async fn on_stats_period(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        kind: PeriodKind,
    ) -> Result<()> {
        let Some(user_id) = self
            .require_user(event.chat_id, event.user_id, session)
            .await?
        else {
            return Ok(());
        };

        self.discard_message(event.chat_id, event.message_id).await;

        let (start, end) = time_window(kind, Utc::now());
        let summary = match self.db.spending_summary(user_id, start, end) {
            Ok(summary) => summary,
            Err(e) => {
                error!(user_id, error = %e, "spending summary failed");
                return self.reply(event.chat_id, messages::STATS_ERROR).await;
            }
        };

        let pages = bar_chart_pages(&summary.by_category, summary.total);
        if pages.is_empty() {
            return self.reply(event.chat_id, messages::STATS_ERROR).await;
        }

        let files = match self.renderer.render_bar_pages(&pages).await {
            Ok(files) if !files.is_empty() => files,
            Ok(_) => return self.reply(event.chat_id, messages::STATS_ERROR).await,
            Err(e) => {
                error!(user_id, error = %e, "bar chart rendering failed");
                return self.reply(event.chat_id, messages::STATS_ERROR).await;
            }
        };

        let sent = if files.len() == 1 {
            self.transport.send_photo(event.chat_id, &files[0]).await
        } else {
            self.transport.send_photo_group(event.chat_id, &files).await
        };
        discard_rendered_files(&files);
        sent.map_err(Error::Transport)
    }

    /// Period picked for the top-expenses view
    pub(crate) async fn on_top_period(
        &self,
        session: &mut Session,
        event: &SelectionEvent,
        kind: PeriodKind,
    ) -> Result<()> {
        let Some(user_id) = self
            .require_user(event.chat_id, event.user_id, session)
            .await?
        else {
            return Ok(());
        };

        self.discard_message(event.chat_id, event.message_id).await;

        let (start, end) = time_window(kind, Utc::now());
        let top = match self.db.top_spending(user_id, start, end, self.config.top_n) {
            Ok(top) => top,
            Err(e) => {
                error!(user_id, error = %e, "top spending query failed");
                return self.reply(event.chat_id, messages::STATS_ERROR).await;
            }
        };

        let Some(chart) = pie_chart(&top, &self.config.other_label) else {
            return self.reply(event.chat_id, messages::STATS_ERROR).await;
        };

        let file = match self.renderer.render_pie(&chart).await {
            Ok(file) => file,
            Err(e) => {
                error!(user_id, error = %e, "pie chart rendering failed");
                return self.reply(event.chat_id, messages::STATS_ERROR).await;
            }
        };

        let sent = self.transport.send_photo(event.chat_id, &file).await;
        discard_rendered_files(std::slice::from_ref(&file));
        sent.map_err(Error::Transport)
    }
}
