//! Reconciliation of incoming specs into the session's collection.
//!
//! The store is the only stateful component. It owns the ordered collection
//! of specs (keyed by id, insertion order preserved) and the active
//! selection. Mutation happens exclusively through [`VizStore::apply`],
//! which is synchronous and total; derivation code only ever sees
//! immutable snapshots.

use tracing::debug;

use crate::spec::VisualizationSpec;

/// What the service declared should happen with the spec it returned.
#[derive(Debug, Clone)]
pub enum VizAction {
    /// Append a new spec and select it.
    Create(VisualizationSpec),
    /// Replace the spec at `id` in place, keeping the selection.
    Update(String, VisualizationSpec),
}

/// An owned, immutable view of the collection after an apply.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub specs: Vec<VisualizationSpec>,
    pub active_id: Option<String>,
}

impl StoreSnapshot {
    pub fn active(&self) -> Option<&VisualizationSpec> {
        let id = self.active_id.as_deref()?;
        self.specs.iter().find(|s| s.id == id)
    }
}

/// The session-scoped collection of visualizations. Created empty; grows by
/// Create; specs are replaced in place by Update; never shrinks.
#[derive(Debug, Default)]
pub struct VizStore {
    specs: Vec<VisualizationSpec>,
    active_id: Option<String>,
}

impl VizStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one reconciliation action and return the resulting snapshot.
    pub fn apply(&mut self, action: VizAction) -> StoreSnapshot {
        match action {
            VizAction::Create(spec) => self.create(spec),
            VizAction::Update(id, spec) => self.update(id, spec),
        }
        self.snapshot()
    }

    fn create(&mut self, spec: VisualizationSpec) {
        // Guard against the upstream handing out a colliding id: replacing
        // in place avoids a duplicate visible entry.
        if let Some(existing) = self.position(&spec.id) {
            debug!(id = %spec.id, "create with existing id, replacing in place");
            self.active_id = Some(spec.id.clone());
            self.specs[existing] = spec;
            return;
        }
        debug!(id = %spec.id, kind = %spec.kind, "created visualization");
        self.active_id = Some(spec.id.clone());
        self.specs.push(spec);
    }

    fn update(&mut self, id: String, spec: VisualizationSpec) {
        match self.position(&id) {
            Some(idx) => {
                debug!(id = %id, "updated visualization in place");
                self.specs[idx] = spec;
            }
            None => {
                // The service declared an update for a spec we never
                // created (e.g. after a session reset). Fall back to
                // create so the result is not lost.
                debug!(id = %id, "update for unknown id, falling back to create");
                self.create(spec);
            }
        }
    }

    /// Current snapshot without applying anything.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            specs: self.specs.clone(),
            active_id: self.validated_active(),
        }
    }

    /// The currently selected spec, if any. Never yields a dangling id.
    pub fn active(&self) -> Option<&VisualizationSpec> {
        let id = self.validated_active()?;
        self.specs.iter().find(|s| s.id == id)
    }

    /// Move the selection to an existing id. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if self.position(id).is_some() {
            self.active_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.id == id)
    }

    // The collection never shrinks, so a set active id cannot dangle today.
    // Still, clear it on exposure rather than presenting a selection that
    // does not resolve.
    fn validated_active(&self) -> Option<String> {
        let id = self.active_id.as_deref()?;
        self.position(id).map(|_| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::VizKind;

    fn spec(id: &str) -> VisualizationSpec {
        VisualizationSpec::new(id, VizKind::Table)
    }

    fn titled(id: &str, title: &str) -> VisualizationSpec {
        let mut s = spec(id);
        s.style.title = Some(title.to_string());
        s
    }

    #[test]
    fn test_create_appends_and_selects() {
        let mut store = VizStore::new();
        let snap = store.apply(VizAction::Create(spec("v1")));
        assert_eq!(snap.specs.len(), 1);
        assert_eq!(snap.active_id.as_deref(), Some("v1"));

        let snap = store.apply(VizAction::Create(spec("v2")));
        assert_eq!(snap.specs.len(), 2);
        assert_eq!(snap.active_id.as_deref(), Some("v2"));
        assert_eq!(snap.specs[0].id, "v1");
    }

    #[test]
    fn test_update_replaces_in_place_and_keeps_selection() {
        let mut store = VizStore::new();
        store.apply(VizAction::Create(spec("v1")));
        store.apply(VizAction::Create(spec("v2")));
        store.select("v1");

        let snap = store.apply(VizAction::Update(
            "v2".to_string(),
            titled("v2", "updated"),
        ));
        assert_eq!(snap.specs.len(), 2);
        assert_eq!(snap.specs[1].style.title.as_deref(), Some("updated"));
        // Position preserved, selection untouched.
        assert_eq!(snap.specs[1].id, "v2");
        assert_eq!(snap.active_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut store = VizStore::new();
        store.apply(VizAction::Create(spec("v1")));
        let updated = titled("v1", "same");
        let once = store.apply(VizAction::Update("v1".to_string(), updated.clone()));
        let twice = store.apply(VizAction::Update("v1".to_string(), updated));
        assert_eq!(once.specs, twice.specs);
        assert_eq!(once.active_id, twice.active_id);
    }

    #[test]
    fn test_update_unknown_id_behaves_as_create() {
        let mut store = VizStore::new();
        store.apply(VizAction::Create(spec("v1")));
        let snap = store.apply(VizAction::Update("ghost".to_string(), spec("ghost")));
        assert_eq!(snap.specs.len(), 2);
        assert_eq!(snap.specs[1].id, "ghost");
        assert_eq!(snap.active_id.as_deref(), Some("ghost"));
    }

    #[test]
    fn test_create_with_colliding_id_does_not_duplicate() {
        let mut store = VizStore::new();
        store.apply(VizAction::Create(spec("v1")));
        store.apply(VizAction::Create(spec("v2")));
        let snap = store.apply(VizAction::Create(titled("v1", "again")));
        assert_eq!(snap.specs.len(), 2);
        assert_eq!(snap.specs[0].style.title.as_deref(), Some("again"));
        assert_eq!(snap.active_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_ids_stay_unique_and_ordered() {
        let mut store = VizStore::new();
        for action in [
            VizAction::Create(spec("a")),
            VizAction::Update("b".to_string(), spec("b")),
            VizAction::Create(spec("a")),
            VizAction::Update("a".to_string(), spec("a")),
            VizAction::Create(spec("c")),
        ] {
            store.apply(action);
        }
        let snap = store.snapshot();
        let ids: Vec<&str> = snap.specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut store = VizStore::new();
        store.apply(VizAction::Create(spec("v1")));
        assert!(!store.select("nope"));
        assert_eq!(store.active().unwrap().id, "v1");
    }
}
