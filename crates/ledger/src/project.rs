use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sitestock_core::{DomainError, DomainResult};

use crate::inventory::{apply_inventory_change, InventoryItem, ItemAction};

/// Audit entry appended on every successful inventory mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLog {
    pub item: String,
    pub action: ItemAction,
    pub quantity: i64,
    pub at: DateTime<Utc>,
}

/// A named unit of work owning an inventory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub inventory: Vec<InventoryItem>,
    pub required_materials: Vec<String>,
    pub logs: Vec<InventoryLog>,
}

impl Project {
    /// Create a project with an empty inventory.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("project name cannot be empty"));
        }
        Ok(Self {
            name,
            inventory: Vec::new(),
            required_materials: Vec::new(),
            logs: Vec::new(),
        })
    }

    /// Reconcile one inventory change and record it in the project log.
    pub fn update_inventory(
        &mut self,
        item_name: &str,
        action: ItemAction,
        quantity: i64,
    ) -> DomainResult<()> {
        apply_inventory_change(&mut self.inventory, item_name, action, quantity)?;
        self.logs.push(InventoryLog {
            item: item_name.to_string(),
            action,
            quantity,
            at: Utc::now(),
        });
        Ok(())
    }
}
