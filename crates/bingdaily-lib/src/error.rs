use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BingDailyError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to store image at {path}: {reason}")]
    ImageStore { path: PathBuf, reason: String },

    #[error("Thumbnail directory creation failed at {path}: {reason}")]
    ThumbDirCreation { path: PathBuf, reason: String },

    #[error("Image processing failed for {path}: {reason}")]
    Processing { path: PathBuf, reason: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
