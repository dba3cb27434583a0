//! Pantry reconciliation: pure decision logic that computes the entries to
//! upsert from the current stock (indexed by name) and a batch of requested
//! line items.
//!
//! Both planners are all-or-nothing: a unit mismatch (or insufficient stock
//! during consumption) fails the whole batch before the caller issues any
//! write. The one deliberate exception is consuming an unknown name, which is
//! logged and skipped without failing the batch.

use std::collections::HashMap;

use larder_core::{DomainError, DomainResult};

use crate::entry::{LineItem, PantryEntry};

/// Index a stock snapshot by entry name, the shape both planners consume.
pub fn entries_by_name(entries: Vec<PantryEntry>) -> HashMap<String, PantryEntry> {
    entries
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect()
}

/// Plan a restock batch.
///
/// Existing entries get their amount **replaced** with the requested value
/// (not accumulated); unknown names become new entries with a fresh id. A
/// name repeated within one batch resolves to a single planned entry holding
/// the textually-last occurrence's literal amount.
///
/// The returned plan preserves the first-occurrence order of the input items.
pub fn plan_restock(
    existing: &HashMap<String, PantryEntry>,
    items: &[LineItem],
) -> DomainResult<Vec<PantryEntry>> {
    let mut planned: Vec<PantryEntry> = Vec::with_capacity(items.len());
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(items.len());

    for item in items {
        validate_item(item)?;
        if let Some(&slot) = slots.get(&item.name) {
            let entry = &mut planned[slot];
            if entry.unit != item.unit {
                return Err(DomainError::unit_mismatch(item.name.clone()));
            }
            entry.amount = item.amount;
            continue;
        }

        let entry = match existing.get(&item.name) {
            Some(current) => {
                if current.unit != item.unit {
                    tracing::error!(
                        name = %item.name,
                        stored = %current.unit,
                        requested = %item.unit,
                        "unit mismatch on restock"
                    );
                    return Err(DomainError::unit_mismatch(item.name.clone()));
                }
                let mut updated = current.clone();
                updated.amount = item.amount;
                updated
            }
            None => PantryEntry::new(item.name.clone(), item.amount, item.unit.clone()),
        };

        slots.insert(item.name.clone(), planned.len());
        planned.push(entry);
    }

    Ok(planned)
}

/// Plan a consumption batch.
///
/// Known entries are reduced by the requested amount; draining an entry to
/// exactly zero is valid. Unknown names are skipped (partial success, by
/// contract not an error). A unit mismatch or a deduction that would go
/// negative aborts the whole batch.
///
/// A name repeated within one batch deducts cumulatively from the same
/// planned entry.
pub fn plan_consume(
    existing: &HashMap<String, PantryEntry>,
    items: &[LineItem],
) -> DomainResult<Vec<PantryEntry>> {
    let mut planned: Vec<PantryEntry> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for item in items {
        validate_item(item)?;
        let slot = match slots.get(&item.name) {
            Some(&slot) => slot,
            None => match existing.get(&item.name) {
                Some(current) => {
                    slots.insert(item.name.clone(), planned.len());
                    planned.push(current.clone());
                    planned.len() - 1
                }
                None => {
                    tracing::warn!(name = %item.name, "item not in storage, skipping");
                    continue;
                }
            },
        };

        let entry = &mut planned[slot];
        if entry.unit != item.unit {
            tracing::error!(
                name = %item.name,
                stored = %entry.unit,
                requested = %item.unit,
                "unit mismatch on consume"
            );
            return Err(DomainError::unit_mismatch(item.name.clone()));
        }
        if entry.amount < item.amount {
            tracing::error!(
                name = %item.name,
                available = entry.amount,
                requested = item.amount,
                "insufficient stock"
            );
            return Err(DomainError::insufficient_stock(item.name.clone()));
        }

        entry.amount -= item.amount;
        if entry.amount == 0.0 {
            tracing::info!(name = %entry.name, "entry is now depleted");
        }
    }

    Ok(planned)
}

fn validate_item(item: &LineItem) -> DomainResult<()> {
    if item.name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    // `>= 0.0` is false for NaN, so this also rejects non-numbers.
    if !(item.amount >= 0.0) || item.amount.is_infinite() {
        return Err(DomainError::validation(format!(
            "amount for {} must be a non-negative number",
            item.name
        )));
    }
    Ok(())
}
