//! # aurum-store: State Containers for Aurum POS
//!
//! The stateful layer of the Aurum POS ledger: two explicit state
//! containers, a storage seam, and the spreadsheet export.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Aurum POS Data Flow                          │
//! │                                                                  │
//! │  Calling layer (forms, integrations)                             │
//! │       │  reads state, invokes mutations                          │
//! │       ▼                                                          │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                aurum-store (THIS CRATE)                    │  │
//! │  │                                                            │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────┐   │  │
//! │  │  │ CatalogStore │  │ SessionStore │  │     export      │   │  │
//! │  │  │ products     │  │ identity     │  │ .xlsx snapshots │   │  │
//! │  │  │ sales        │  │ login/logout │  └─────────────────┘   │  │
//! │  │  │ withdrawals  │  └──────┬───────┘                        │  │
//! │  │  └──────┬───────┘         │                                │  │
//! │  │         ▼                 ▼                                │  │
//! │  │  ┌────────────────────────────────────────────┐            │  │
//! │  │  │  Storage trait (key → whole JSON document) │            │  │
//! │  │  │  FileStorage • MemoryStorage               │            │  │
//! │  │  └────────────────────────────────────────────┘            │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  aurum-core: pure types, report math, validation rules           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - the persistence seam and its two backends
//! - [`catalog`] - products / sales / withdrawals with stock side effects
//! - [`session`] - authentication state and the credential seam
//! - [`export`] - one-way spreadsheet snapshots
//! - [`error`] - store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aurum_store::{CatalogStore, FileStorage, SessionStore, StaticDirectory};
//!
//! let data_dir = FileStorage::new("/var/lib/aurum-pos");
//! let mut catalog = CatalogStore::load(data_dir.clone());
//! let mut sessions = SessionStore::load(data_dir, StaticDirectory::default());
//!
//! if sessions.login("empleado1", "emp123", None).unwrap() {
//!     let stats = catalog.stats();
//!     println!("caja disponible: {}", stats.available_cash_cents);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod export;
pub mod session;
pub mod storage;

pub use catalog::CatalogStore;
pub use error::{StoreError, StoreResult};
pub use session::{CredentialVerifier, Role, SessionStore, SessionUser, StaticAccount, StaticDirectory};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
