//! Tally Bot
//!
//! Conversation core of the Tally expense-tracking chat bot:
//! - Per-user finite-state sessions with flow-scoped scratch data
//! - Event dispatcher routing menu actions, state-guarded text input, and
//!   decoded selection tokens into flow handlers
//! - Collaborator traits for the chat transport and the chart renderer
//! - Background retention sweep on its own timer
//!
//! The crate is transport-agnostic: a platform adapter implements
//! [`ChatTransport`] and feeds [`MessageEvent`]/[`SelectionEvent`] values
//! into the [`Dispatcher`].

mod callback;
mod charts;
mod config;
mod dispatch;
mod error;
mod handlers;
mod keyboard;
pub mod messages;
mod session;
mod sweep;
mod transport;

pub use callback::CallbackData;
pub use charts::ChartRenderer;
pub use config::{BotConfig, ConfirmLabels, MenuLabels, PeriodLabels};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use messages as reply_texts;
pub use session::{ChatState, Session, SessionKey, SessionStore};
pub use sweep::{start_retention_sweeper, SweepConfig};
pub use transport::{
    ChatTransport, InlineButton, InlineKeyboard, MenuKeyboard, MessageEvent, SelectionEvent,
};
