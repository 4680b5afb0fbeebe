//! One user session: prompt in, reconciled collection out.
//!
//! Single-threaded and event-driven. A submission sends the prompt plus the
//! selected spec's prior intent, applies the declared action to the store,
//! and returns a snapshot. At most one request is in flight, enforced by a
//! busy flag rather than request identity; with the blocking client and
//! `&mut self` no overlap can occur in-process, the flag mirrors the
//! UI-disablement contract.

use anyhow::{bail, Result};
use tracing::info;

use crate::client::VizClient;
use crate::store::{StoreSnapshot, VizStore};

pub struct Session {
    client: VizClient,
    store: VizStore,
    busy: bool,
}

impl Session {
    pub fn new(client: VizClient) -> Self {
        Session {
            client,
            store: VizStore::new(),
            busy: false,
        }
    }

    /// Submit one prompt. On transport failure the collection is untouched
    /// and the busy flag is cleared, so the caller can retry the same text.
    pub fn submit(&mut self, prompt: &str) -> Result<StoreSnapshot> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            bail!("Prompt must not be empty");
        }
        if self.busy {
            bail!("A request is already in flight");
        }

        self.busy = true;
        let result = self.client.visualize(prompt, self.store.active());
        self.busy = false;

        let action = result?;
        let snapshot = self.store.apply(action);
        info!(
            total = snapshot.specs.len(),
            active = ?snapshot.active_id,
            "applied visualization"
        );
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    /// Move the selection; returns false for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        self.store.select(id)
    }

    /// Probe the service without touching the collection.
    pub fn health(&self) -> Result<()> {
        self.client.health()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
