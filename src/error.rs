use thiserror::Error;

/// Error type for per-record tokenization.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error, such as a missing dictionary file or an invalid
    /// per-record parameter.
    #[error("configuration error: {0}")]
    Config(String),

    /// The segmentation capability itself failed for the given text/mode.
    #[error("segmentation error: {0}")]
    Segmentation(String),
}

/// Result type for per-record tokenization.
pub type Result<T> = std::result::Result<T, Error>;
