use std::fmt;

/// Classified result of asking the upstream server for one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<u8>),
    /// Upstream answered 404; the tile does not exist at this address.
    NotAvailable,
    UpstreamError(u16),
    InvalidContent(String),
    NetworkError(String),
}

impl FetchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(bytes) => write!(f, "success ({} bytes)", bytes.len()),
            Self::NotAvailable => f.write_str("not available upstream"),
            Self::UpstreamError(status) => write!(f, "upstream returned HTTP {status}"),
            Self::InvalidContent(reason) => write!(f, "invalid content: {reason}"),
            Self::NetworkError(reason) => write!(f, "network error: {reason}"),
        }
    }
}
