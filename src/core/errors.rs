use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected HTTP status: {0}")]
    StatusError(u16),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Delivery error: {0}")]
    DeliveryError(String),
}

pub type BotResult<T> = Result<T, BotError>;
