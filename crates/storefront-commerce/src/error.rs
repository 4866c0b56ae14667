//! Commerce error types.

use storefront_data::FetchError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// Cart operations never fail; these come from the catalog and from the
/// edges (parsing user input, reading snapshots).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product id could not be parsed.
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    /// Catalog request failed (network error or non-success status).
    #[error("Failed to fetch data: {0}")]
    RequestFailed(String),

    /// Catalog response was not a list of products.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::ParseError(msg) => CommerceError::InvalidResponse(msg),
            other => CommerceError::RequestFailed(other.to_string()),
        }
    }
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
