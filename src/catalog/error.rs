//! Error types for the card catalog.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a local catalog snapshot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog payload is not the expected JSON card list.
    #[error("Invalid card data: {0}")]
    Json(#[from] serde_json::Error),

    /// The card API request failed or returned an error status.
    #[error("Failed to fetch card data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Card catalog unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
