//! `sitestock-ledger` — pure stock reconciliation logic.
//!
//! Everything in this crate operates on passed-in state and returns either a
//! mutated record or a [`sitestock_core::DomainError`]; persistence is the
//! caller's concern.

pub mod inventory;
pub mod project;
pub mod resource;

pub use inventory::{apply_inventory_change, InventoryItem, ItemAction};
pub use project::{InventoryLog, Project};
pub use resource::{apply_quantity_change, Resource};
