//! Errors that can occur when talking to the catalog.

use thiserror::Error;

/// Errors that can occur when interacting with the catalog service
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No API key configured; raised before any request is made
    #[error("Catalog API key is missing")]
    MissingCredential,

    /// Connection, timeout, or other transport failure
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON we expected
    #[error("Invalid response from catalog: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Whether this failure happened before anything was sent
    pub fn is_precondition(&self) -> bool {
        matches!(self, CatalogError::MissingCredential)
    }
}
