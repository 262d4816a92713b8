//! Fire-and-forget save dispatch
//!
//! Persistence is an external collaborator: the core hands a snapshot to a
//! background worker and moves on. A failing store is logged and dropped;
//! it never rolls back or corrupts in-memory state. The worker drains an
//! unbounded channel so `request_save` never blocks a combat tick.

use tokio::sync::mpsc;

use crate::save::snapshot::PlayerSnapshot;

/// The external key-value save slot. One slot per profile, overwritten.
pub trait SaveStore: Send + 'static {
    fn write(&mut self, slot: &str, payload: &str) -> std::io::Result<()>;
}

struct SaveRequest {
    slot: String,
    snapshot: PlayerSnapshot,
}

/// Handle for queueing snapshots to the background save worker
pub struct SaveDispatcher {
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl SaveDispatcher {
    /// Spawn the save worker on the current tokio runtime
    pub fn spawn<S: SaveStore>(mut store: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveRequest>();
        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request.snapshot.to_json() {
                    Ok(payload) => {
                        if let Err(error) = store.write(&request.slot, &payload) {
                            tracing::warn!(slot = %request.slot, %error, "save failed");
                        }
                    }
                    Err(error) => {
                        tracing::warn!(slot = %request.slot, %error, "snapshot encode failed")
                    }
                }
            }
        });
        Self { tx }
    }

    /// Queue a save. Never blocks; a stopped worker only logs.
    pub fn request_save(&self, slot: &str, snapshot: PlayerSnapshot) {
        let request = SaveRequest {
            slot: slot.to_string(),
            snapshot,
        };
        if self.tx.send(request).is_err() {
            tracing::warn!(slot, "save worker stopped; dropping save request");
        }
    }
}
