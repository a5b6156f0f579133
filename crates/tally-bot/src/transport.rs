//! Chat transport collaborator boundary
//!
//! The bot core never talks to a chat platform directly: inbound events
//! arrive as the structs below and outbound actions go through the
//! [`ChatTransport`] trait. Production wires in a platform adapter; tests
//! wire in a recording mock.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tally_core::ChatProfile;

/// Inbound text message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub chat_id: i64,
    pub user_id: i64,
    /// Profile fields as the platform currently reports them
    pub profile: ChatProfile,
    pub text: String,
}

/// Inbound button selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub chat_id: i64,
    pub user_id: i64,
    /// Message carrying the keyboard the selection came from
    pub message_id: i64,
    /// Raw selection token; decoded once at the dispatch boundary
    pub token: String,
}

/// One button of an inline keyboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    /// Encoded [`crate::callback::CallbackData`] token
    pub token: String,
}

/// Inline keyboard attached to a single message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

/// Persistent reply-menu keyboard (rows of button labels)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuKeyboard {
    pub rows: Vec<Vec<String>>,
}

/// Outbound side of the chat platform
///
/// All methods return `anyhow::Result`: transport failures are logged by the
/// caller and never crash the dispatch loop.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a plain text message, returning the platform message id
    async fn send_message(&self, chat_id: i64, text: &str) -> anyhow::Result<i64>;

    /// Send a text message together with the persistent main menu
    async fn send_menu(
        &self,
        chat_id: i64,
        text: &str,
        menu: &MenuKeyboard,
    ) -> anyhow::Result<i64>;

    /// Send a text message with an inline keyboard
    async fn send_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> anyhow::Result<i64>;

    /// Replace the text (and optionally the keyboard) of a prior message
    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> anyhow::Result<()>;

    /// Delete a prior message
    async fn delete_message(&self, chat_id: i64, message_id: i64) -> anyhow::Result<()>;

    /// Send a single raster image
    async fn send_photo(&self, chat_id: i64, path: &Path) -> anyhow::Result<()>;

    /// Send several raster images as one album
    async fn send_photo_group(&self, chat_id: i64, paths: &[PathBuf]) -> anyhow::Result<()>;
}
