//! # Error Types
//!
//! Typed validation errors for aurum-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  aurum-core errors (this file)                                   │
//! │  └── ValidationError  - input rule failures (caller-side)        │
//! │                                                                  │
//! │  aurum-store errors (separate crate)                             │
//! │  └── StoreError       - persistence / export failures            │
//! │                                                                  │
//! │  Deliberately absent: "not found" errors for mutations. The      │
//! │  ledger's contract is that lookups which miss degrade to logged  │
//! │  no-ops, never to surfaced failures.                             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every message
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// Raised by the [`crate::validation`] helpers that calling layers run
/// before invoking a store mutation. The stores themselves trust callers
/// and never produce these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: &'static str },

    /// A sale needs at least one line item.
    #[error("a sale requires at least one line item")]
    EmptySale,
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
