//! Error types for reading block documents from JSON

use thiserror::Error;

/// Errors that can occur when reading a block document from JSON
///
/// Only syntax errors and a wrong top-level shape are reported; missing or
/// mistyped block fields fall back to defaults instead.
#[derive(Error, Debug)]
pub enum DocumentJsonError {
    /// The input is not valid JSON
    #[error("Invalid block document JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The top-level JSON value is not an object
    #[error("Block document must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },
}
