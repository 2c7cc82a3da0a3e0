//! # cumulus-app
//!
//! Application layer — turns an Abstract Spec into a normalized
//! [`Assembly`](assembly::Assembly) that both output adapters consume.
//!
//! ## Responsibilities
//! - Resolve the **default cascade** (function override → provider default
//!   → literal) for handler, initializer, runtime, timeouts, memory, and
//!   concurrency
//! - Merge **environment variables** (provider < function < user-defined)
//! - Map **trigger events** to normalized trigger records, per kind
//! - Accumulate **HTTP routes** across all functions and decide the
//!   custom-domain binding (including the legacy fallback notice)
//! - Provide the **JSON value utilities** shared by the adapters
//!   (empty-attribute pruning, key re-casing)
//!
//! ## Dependency rule
//! Depends on `cumulus-domain` only. Never imports adapter crates;
//! adapters depend on *this* crate, not the reverse.

pub mod assembly;
pub mod builder;
pub mod value;

pub use builder::assemble;
