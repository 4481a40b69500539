use thiserror::Error;

/// contribcal error types
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Request to the day record store failed
    #[error("http error: {0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Store answered with a non-success envelope
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for contribcal
pub type Result<T> = std::result::Result<T, CalendarError>;
