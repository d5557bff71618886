//! Persistence Dispatcher
//!
//! Issues the writes of a finalization concurrently. Each write stands
//! alone: a failure is logged and reported, never retried, and never rolls
//! back the in-memory board or the sibling writes.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::PersistError;
use crate::finalize::{FinalizationPlan, PositionPatch, PositionWrite};
use crate::types::ItemId;

/// The store that receives position writes
#[async_trait(?Send)]
pub trait ItemPersistence {
    /// Persist one item's position (and column, for a relocation)
    async fn persist_item(&self, item_id: ItemId, patch: PositionPatch) -> Result<(), PersistError>;
}

/// Result of dispatching one plan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub confirmed: Vec<ItemId>,
    pub failed: Vec<(ItemId, PersistError)>,
}

impl DispatchReport {
    /// Every write succeeded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Dispatch every write of `plan` and wait for all of them to settle
pub async fn dispatch<P>(plan: &FinalizationPlan, store: &P) -> DispatchReport
where
    P: ItemPersistence + ?Sized,
{
    dispatch_with(plan, store, |_, _| {}).await
}

/// Like [`dispatch`], calling `on_settled` as each write completes
pub async fn dispatch_with<P, F>(plan: &FinalizationPlan, store: &P, on_settled: F) -> DispatchReport
where
    P: ItemPersistence + ?Sized,
    F: Fn(&PositionWrite, &Result<(), PersistError>),
{
    let on_settled = &on_settled;
    let pending = plan.writes.iter().map(|write| async move {
        let result = store.persist_item(write.item_id, write.patch).await;
        on_settled(write, &result);
        (write.item_id, result)
    });

    let mut report = DispatchReport::default();
    for (item_id, result) in join_all(pending).await {
        match result {
            Ok(()) => report.confirmed.push(item_id),
            Err(err) => {
                warn!(item_id, %err, "position write failed");
                report.failed.push((item_id, err));
            }
        }
    }

    debug!(
        item_id = plan.item_id,
        confirmed = report.confirmed.len(),
        failed = report.failed.len(),
        "dispatch settled"
    );
    report
}
