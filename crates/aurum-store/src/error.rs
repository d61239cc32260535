//! # Store Error Types
//!
//! Error types for the stateful layer.
//!
//! ## Error Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                             │
//! │                                                                  │
//! │  std::io::Error / serde_json::Error                              │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  StorageError (storage module) ← adds the backend context        │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  StoreError (this module)      ← what callers of the stores see  │
//! │                                                                  │
//! │  Referential misses are NOT errors: a sale line naming an        │
//! │  unknown product degrades to a logged no-op by contract.         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the state containers.
///
/// Only infrastructure can fail here - persistence writes and spreadsheet
/// export. Domain lookups that miss are silent no-ops, and malformed
/// persisted state is absorbed at load time by resetting the collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing a collection back to its storage key failed.
    #[error("persistence failed: {0}")]
    Storage(#[from] StorageError),

    /// Writing a spreadsheet workbook failed.
    #[error("export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
