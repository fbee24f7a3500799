//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! presentation code (CLI)
//!     → store.rs (observable state + connect/patch/send entry points)
//!     → cache.rs (persisted count slot)
//!     → service layer (ledger reads, submission)
//! ```

pub mod cache;
pub mod store;

pub use cache::CountCache;
pub use store::{FormData, FormField, SessionState, SessionStore};
