use serde::{Deserialize, Serialize};

use larder_core::EntryId;

/// A durable pantry record.
///
/// `name` is the natural merge key: the reconciler guarantees that at most one
/// entry exists per name. `id` is generated once at creation and stable for
/// the life of the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryEntry {
    pub id: EntryId,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl PantryEntry {
    /// Create a brand-new entry with a freshly generated id.
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// A caller-supplied request unit. Not persisted; consumed immediately by
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// One restock batch: entry amounts are replaced with the requested values,
/// unknown names are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockRequest {
    pub items: Vec<LineItem>,
}

/// One consumption batch: entry amounts are reduced by the requested values,
/// unknown names are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumeRequest {
    pub items: Vec<LineItem>,
}
