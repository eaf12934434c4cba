//! Subcommand implementations.

pub mod rails;
pub mod swipe;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the seed file or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid JSON.
    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Seed file parsed but has the wrong shape.
    #[error("Invalid seed: {0}")]
    Seed(String),

    /// Rail cap out of range.
    #[error(transparent)]
    Catalog(#[from] duka_core::catalog::CatalogError),

    /// Swipe parameters that cannot describe a gesture.
    #[error("Invalid swipe: {0}")]
    Swipe(String),
}
