//! Error types for arena setup, resizing and file I/O
//!
//! Gameplay never fails: hits, deaths and despawns are state transitions.
//! Only bad startup data and degenerate arena sizes are errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    /// A tunable would produce degenerate geometry or motion
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Arena extents must be finite and positive
    #[error("invalid arena size {width}x{height}")]
    InvalidArenaSize { width: f32, height: f32 },

    /// Reading a config file or writing a frame dump
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
