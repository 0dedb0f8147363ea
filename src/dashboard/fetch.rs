//! Fetch tickets and task spawning

use crate::models::{Scope, Snapshot};
use crate::source::{FetchError, StatusSource};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Result delivered back to the controller
pub type FetchOutcome = Result<Snapshot, FetchError>;

/// Permission to run one fetch, tagged with the generation that issued it
///
/// Sending on a ticket whose generation was superseded fails silently; the
/// controller has already dropped the receiving end.
pub struct FetchTicket {
    pub generation: u64,
    pub scope: Scope,
    pub tx: oneshot::Sender<FetchOutcome>,
}

impl FetchTicket {
    /// Deliver the outcome. Returns `false` if nobody is listening any more.
    pub fn send(self, outcome: FetchOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

/// Run `ticket` against `source` on the tokio runtime
pub fn spawn_fetch(
    source: Arc<dyn StatusSource>,
    ticket: FetchTicket,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let FetchTicket {
            generation,
            scope,
            tx,
        } = ticket;

        tracing::debug!(
            "Fetch #{} for {} via {} source",
            generation,
            scope,
            source.source_type()
        );

        let result = source.fetch(&scope).await;
        match &result {
            Ok(snapshot) => tracing::debug!(
                "Fetch #{} for {} returned {} Waybill(s)",
                generation,
                scope,
                snapshot.len()
            ),
            Err(e) => tracing::warn!("Fetch #{} for {} failed: {}", generation, scope, e),
        }

        if tx.send(result).is_err() {
            tracing::debug!("Fetch #{} superseded, result dropped", generation);
        }
    })
}
