//! `sitestock-store` — keyed document persistence abstraction.
//!
//! One [`Collection`] per entity type, keyed by the entity's unique name.
//! Writes are conditional on the version read (optimistic concurrency), so
//! callers can safely run read-reconcile-write loops without locks.

pub mod collection;
pub mod memory;

pub use collection::{Collection, StoreError, Versioned};
pub use memory::InMemoryCollection;
