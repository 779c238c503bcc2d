//! Error type shared by the game core and the record store.

use std::io;

/// Errors surfaced by session setup and persistence.
///
/// Gameplay itself never fails: direction input that cannot be applied is
/// ignored, and a record write failure is logged while the run continues.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No free cell left for food placement")]
    GridFull,

    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Record data could not be (de)serialized: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
