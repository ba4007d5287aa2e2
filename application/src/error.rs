use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Product '{product}' not found")]
    ProductNotFound { product: String },

    #[error("Invalid zoom level {zoom} for {product}. Valid range: 0-{max_zoom}")]
    InvalidZoom {
        product: String,
        zoom: i64,
        max_zoom: u8,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Codec error: {message}")]
    CodecError { message: String },

    #[error("Task error: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("External service error: {message}")]
    ExternalServiceError { message: String },
}

pub type AppResult<T> = Result<T, AppError>;
