use serde::{Deserialize, Serialize};

use sitestock_core::{DomainError, DomainResult};

/// A shared, capacity-bounded consumable tracked independently of projects.
///
/// # Invariants
/// - `max_units` is strictly positive.
/// - `0 <= available_quantity <= max_units` at all times.
/// - `required_quantity` is advisory and unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub max_units: i64,
    pub available_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_quantity: Option<i64>,
}

impl Resource {
    /// Create a resource at full capacity.
    pub fn new(name: impl Into<String>, max_units: i64) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("resource name cannot be empty"));
        }
        if max_units <= 0 {
            return Err(DomainError::validation("max_units must be positive"));
        }
        Ok(Self {
            name,
            max_units,
            available_quantity: max_units,
            required_quantity: None,
        })
    }
}

/// Compute the resource's new available quantity after a signed adjustment.
///
/// Positive `delta` replenishes, negative consumes. Fails when the result
/// would fall below zero or exceed `max_units`; the resource itself is never
/// mutated here, so a failed adjustment changes nothing.
pub fn apply_quantity_change(resource: &Resource, delta: i64) -> DomainResult<i64> {
    let new_quantity = resource
        .available_quantity
        .checked_add(delta)
        .ok_or_else(|| DomainError::validation("quantity change overflows"))?;

    if new_quantity < 0 {
        return Err(DomainError::conflict(format!(
            "quantity underflow on '{}': {} available, change {delta}",
            resource.name, resource.available_quantity
        )));
    }
    if new_quantity > resource.max_units {
        return Err(DomainError::conflict(format!(
            "capacity exceeded on '{}': max {} units",
            resource.name, resource.max_units
        )));
    }

    Ok(new_quantity)
}
