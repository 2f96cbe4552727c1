//! Error types for chatmark.
//!
//! Rendering never fails; these errors cover the edges around it
//! (option validation and the CLI's file handling).

use thiserror::Error;

/// Result type for chatmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the renderer itself.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A render option is out of its accepted range.
    #[error("Invalid render option: {0}")]
    InvalidOptions(String),
}
