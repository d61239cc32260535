//! # aurum-core: Pure Business Logic for Aurum POS
//!
//! This crate is the heart of the Aurum POS ledger. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Aurum POS Data Flow                         │
//! │                                                                  │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                 aurum-store (state + I/O)                  │  │
//! │  │   CatalogStore ── SessionStore ── Storage ── export        │  │
//! │  └─────────────────────────────┬──────────────────────────────┘  │
//! │                                │                                 │
//! │  ┌─────────────────────────────▼──────────────────────────────┐  │
//! │  │               ★ aurum-core (THIS CRATE) ★                  │  │
//! │  │                                                            │  │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐   │  │
//! │  │   │  types   │ │  money   │ │ reports  │ │ validation │   │  │
//! │  │   │ Product  │ │  Money   │ │  stats   │ │   rules    │   │  │
//! │  │   │  Sale    │ │ (cents)  │ │ rollups  │ │   checks   │   │  │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────┘   │  │
//! │  │                                                            │  │
//! │  │   NO I/O • NO CLOCK READS • PURE FUNCTIONS                 │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Withdrawal, drafts, patches)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reports`] - Derived read models (stats, series, rollups)
//! - [`validation`] - Caller-side input validation rules
//! - [`error`] - Typed validation errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every report takes its inputs (including "today")
//!    as arguments - same input = same output
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Trusting Stores**: the state containers in `aurum-store` perform no
//!    validation of their own; [`validation`] is what calling layers run
//!    before invoking a mutation

pub mod error;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a product is reported as "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Number of sales returned by the recent-sales read model.
pub const RECENT_SALES_LIMIT: usize = 5;

/// Leaderboard bucket for sales that carry no salesperson name.
///
/// The literal is part of the persisted/reported vocabulary of the shop
/// (reports and exports show it verbatim), so it is not translated.
pub const UNASSIGNED_SELLER: &str = "Sin asignar";
