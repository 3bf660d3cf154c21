use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single song load attempt.
///
/// None of these are raised mid-frame; the caller substitutes
/// [`Song::fallback`](crate::song::Song::fallback) and keeps rendering silence.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("MIDI file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No playable notes in any track")]
    NoUsableNotes,

    /// Malformed byte stream, or timing the player cannot map onto beats.
    #[error("Malformed MIDI stream: {0}")]
    ParseError(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<midly::Error> for LoadError {
    fn from(err: midly::Error) -> Self {
        LoadError::ParseError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
