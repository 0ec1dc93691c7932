//! Catalog loading errors.

use mart_data::FetchError;
use thiserror::Error;

/// Why a catalog load failed.
///
/// The `Display` text is what the storefront shows inline above the
/// product grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never got a response.
    #[error("Could not reach the catalog service: {0}")]
    Unreachable(String),

    /// The service answered with a non-2xx status.
    #[error("Failed to load products ({status})")]
    Status { status: u16 },

    /// The body was not JSON.
    #[error("Unexpected catalog response: {0}")]
    Malformed(String),

    /// The load task panicked or was cancelled before producing a result.
    #[error("Catalog load was interrupted: {0}")]
    Interrupted(String),
}

impl CatalogError {
    /// HTTP status code, for status errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<FetchError> for CatalogError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, .. } => CatalogError::Status { status },
            FetchError::ParseError(msg) => CatalogError::Malformed(msg),
            FetchError::RequestError(msg) | FetchError::InvalidUrl(msg) => {
                CatalogError::Unreachable(msg)
            }
        }
    }
}
