use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    #[error("Invalid endpoint template: {0}")]
    InvalidEndpointTemplate(String),

    #[error("Invalid tile format: {0}")]
    InvalidTileFormat(String),

    #[error("Invalid tile region: {0}")]
    InvalidRegion(String),

    #[error("Codec error: {0}")]
    CodecError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
