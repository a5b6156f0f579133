//! Error types for the bot layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Store error: {0}")]
    Core(#[from] tally_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] anyhow::Error),

    #[error("Invalid selection token: {0}")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
