/// Host error types
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown command: {0} (type `help`)")]
    UnknownCommand(String),

    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    #[error("No such audio file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Playback error: {0}")]
    Playback(#[from] cadence_playback::PlaybackError),
}

/// Reasons the rodio engine refuses to bind a track
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not a local file: {0}")]
    NotAFile(Url),

    #[error("Failed to open audio file: {0}")]
    Open(#[from] std::io::Error),

    #[error("Failed to decode audio file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("Failed to create audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("Failed to open audio output: {0}")]
    Stream(#[from] rodio::StreamError),
}
