//! Store error types.
//!
//! Persistence failures are loud on purpose: silently losing an append
//! means every subsequent run re-notifies the same records.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read notified file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write notified file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
