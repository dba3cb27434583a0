//! Pantry orchestration: read → reconcile → write.
//!
//! Each batch performs exactly one read query (`find_by_names`) and at most
//! one write query (`save_all`); the write is the atomicity boundary.
//!
//! ## Concurrency
//!
//! The find→plan→save sequence is a read-modify-write race under concurrent
//! callers, and the store does not synchronize it. The strategy chosen here
//! is a **single-writer funnel**: every mutating batch serializes through one
//! async mutex held across the whole sequence. Reads (`get_food`) bypass the
//! funnel.
//!
//! ## Deadlines
//!
//! Every store call is bounded by a deadline; expiry surfaces as
//! [`PantryStoreError::Timeout`], which callers treat as retryable. Once
//! `save_all` is in flight no cancellation is attempted — it is atomic by
//! contract.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use larder_core::DomainError;
use larder_pantry::{entries_by_name, plan_consume, plan_restock};
use larder_pantry::{ConsumeRequest, LineItem, PantryEntry, RestockRequest};

use crate::pantry_store::{PantryStore, PantryStoreError};

const DEFAULT_STORE_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum PantryServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] PantryStoreError),
}

pub struct PantryService {
    store: Arc<dyn PantryStore>,
    write_gate: Mutex<()>,
    store_deadline: Duration,
}

impl PantryService {
    pub fn new(store: Arc<dyn PantryStore>) -> Self {
        Self::with_deadline(store, DEFAULT_STORE_DEADLINE)
    }

    pub fn with_deadline(store: Arc<dyn PantryStore>, store_deadline: Duration) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
            store_deadline,
        }
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, PantryStoreError>
    where
        F: Future<Output = Result<T, PantryStoreError>>,
    {
        match tokio::time::timeout(self.store_deadline, operation).await {
            Ok(result) => result,
            Err(_) => Err(PantryStoreError::Timeout),
        }
    }

    /// Full stock snapshot, straight from the store.
    pub async fn get_food(&self) -> Result<Vec<PantryEntry>, PantryServiceError> {
        Ok(self.bounded(self.store.find_all()).await?)
    }

    /// Restock a batch: replace amounts of known names, create unknown ones.
    pub async fn save_food(
        &self,
        request: RestockRequest,
    ) -> Result<Vec<PantryEntry>, PantryServiceError> {
        tracing::info!(items = request.items.len(), "incoming restock request");
        let _writer = self.write_gate.lock().await;

        let names = distinct_names(&request.items);
        let existing = self.bounded(self.store.find_by_names(&names)).await?;
        let plan = plan_restock(&entries_by_name(existing), &request.items)?;
        let saved = self.bounded(self.store.save_all(plan)).await?;

        tracing::info!(saved = saved.len(), "restock committed");
        Ok(saved)
    }

    /// Consume a batch: deduct known names, skip unknown ones.
    ///
    /// `save_all` is issued exactly once per batch, even when every item was
    /// skipped and the plan is empty.
    pub async fn use_food(
        &self,
        request: ConsumeRequest,
    ) -> Result<Vec<PantryEntry>, PantryServiceError> {
        tracing::info!(items = request.items.len(), "incoming consume request");
        let _writer = self.write_gate.lock().await;

        let names = distinct_names(&request.items);
        let existing = self.bounded(self.store.find_by_names(&names)).await?;
        let plan = plan_consume(&entries_by_name(existing), &request.items)?;
        let saved = self.bounded(self.store.save_all(plan)).await?;

        tracing::info!(saved = saved.len(), "consume committed");
        Ok(saved)
    }
}

fn distinct_names(items: &[LineItem]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !names.contains(&item.name) {
            names.push(item.name.clone());
        }
    }
    names
}
