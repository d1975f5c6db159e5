use serde::{Deserialize, Serialize};

use sitestock_core::{DomainError, DomainResult};

/// One line item inside a project's inventory.
///
/// # Invariants
/// - `name` is unique within a single project's inventory.
/// - `quantity` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: i64,
}

/// The verb driving an inventory mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAction {
    Add,
    Remove,
}

impl core::fmt::Display for ItemAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ItemAction::Add => write!(f, "add"),
            ItemAction::Remove => write!(f, "remove"),
        }
    }
}

/// Apply a single `(item_name, action, quantity)` change to an inventory.
///
/// Scans the inventory once for a matching item:
/// - found + `Add`: increase its quantity.
/// - found + `Remove`: fail when stock is short, otherwise decrease.
/// - absent + `Add`: append a new item.
/// - absent + `Remove`: fail — removing something that was never stocked is
///   reported instead of silently succeeding.
///
/// On any error the inventory is left untouched.
pub fn apply_inventory_change(
    inventory: &mut Vec<InventoryItem>,
    item_name: &str,
    action: ItemAction,
    quantity: i64,
) -> DomainResult<()> {
    if item_name.trim().is_empty() {
        return Err(DomainError::validation("item name cannot be empty"));
    }
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }

    match inventory.iter_mut().find(|item| item.name == item_name) {
        Some(item) => match action {
            ItemAction::Add => {
                item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::validation("quantity overflows item stock")
                })?;
            }
            ItemAction::Remove => {
                if item.quantity < quantity {
                    return Err(DomainError::conflict(format!(
                        "not enough stock of '{item_name}': have {}, requested {quantity}",
                        item.quantity
                    )));
                }
                item.quantity -= quantity;
            }
        },
        None => match action {
            ItemAction::Add => inventory.push(InventoryItem {
                name: item_name.to_string(),
                quantity,
            }),
            ItemAction::Remove => {
                return Err(DomainError::not_found(format!(
                    "item '{item_name}' is not in the inventory"
                )));
            }
        },
    }

    Ok(())
}
