//! The work tab store: an ordered list of [`WorkTabEntry`] with unique ids.
//!
//! Every operation is total. Asking for an id that is not there, adding one
//! that already is, or reordering with unknown ids simply does nothing for
//! those ids. Mutations that change the list are written through to the
//! attached [`TabPersistence`] (if any) and then reported to observers, in
//! that order.

pub mod entry;
pub mod observer;
pub mod persist;

pub use entry::{WorkTabEntry, WorkTabPatch, DEFAULT_STATE};
pub use observer::{Observer, StoreChange, SubscriptionId};
pub use persist::{JsonFilePersistence, MemoryPersistence, PersistedState, TabPersistence};

use observer::Observers;
use std::collections::HashSet;

pub struct WorkTabStore {
    tabs: Vec<WorkTabEntry>,
    default_state: String,
    persistence: Option<Box<dyn TabPersistence>>,
    observers: Observers,
}

impl Default for WorkTabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkTabStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkTabStore")
            .field("tabs", &self.tabs)
            .field("default_state", &self.default_state)
            .field("persistent", &self.persistence.is_some())
            .field("observers", &self.observers)
            .finish()
    }
}

impl WorkTabStore {
    /// An empty, in-memory store.
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            default_state: DEFAULT_STATE.to_string(),
            persistence: None,
            observers: Observers::default(),
        }
    }

    /// State label for tabs created by [`add_work_tab`](Self::add_work_tab).
    pub fn with_default_state(mut self, state: impl Into<String>) -> Self {
        self.default_state = state.into();
        self
    }

    /// Attach a persistence collaborator and restore whatever it holds.
    ///
    /// A load failure is logged and the store starts empty. Duplicate ids in
    /// the restored list keep their first occurrence only.
    pub fn with_persistence(mut self, persistence: impl TabPersistence + 'static) -> Self {
        match persistence.load() {
            Ok(Some(tabs)) => {
                self.tabs = dedup_by_id(tabs);
                tracing::info!(count = self.tabs.len(), "restored work tabs");
            }
            Ok(None) => {
                self.tabs.clear();
                tracing::debug!("no saved work tabs");
            }
            Err(e) => {
                self.tabs.clear();
                tracing::warn!(error = %e, "could not restore work tabs, starting empty");
            }
        }
        self.persistence = Some(Box::new(persistence));
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn work_tabs(&self) -> &[WorkTabEntry] {
        &self.tabs
    }

    /// Ids in current order. Computed from the live list on every call.
    pub fn work_tab_ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn get_work_tab(&self, id: &str) -> Option<&WorkTabEntry> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Append a tab with the default state. No-op if `id` is already present.
    pub fn add_work_tab(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.tabs
            .push(WorkTabEntry::new(id.clone(), self.default_state.clone()));
        tracing::debug!(id = %id, "work tab added");
        self.commit(StoreChange::Added { id });
        true
    }

    pub fn remove_work_tab(&mut self, id: &str) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let removed = self.tabs.remove(idx);
        tracing::debug!(id = %removed.id, "work tab removed");
        self.commit(StoreChange::Removed { id: removed.id });
        true
    }

    /// Shallow-merge `patch` into the tab with `id`.
    pub fn update_work_tab(&mut self, id: &str, patch: WorkTabPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(entry) = self.tabs.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if !entry.merge(patch) {
            return false;
        }
        tracing::debug!(id, state = %entry.state, "work tab updated");
        self.commit(StoreChange::Updated { id: id.to_string() });
        true
    }

    /// Put the tabs named in `ordered_ids` first, in that order; everything
    /// else follows in its existing relative order. Unknown ids are skipped
    /// and a repeated id only counts where it first appears.
    pub fn reorder_work_tabs<S: AsRef<str>>(&mut self, ordered_ids: &[S]) -> bool {
        let reordered = reorder(&self.tabs, ordered_ids);
        let changed = reordered
            .iter()
            .zip(self.tabs.iter())
            .any(|(a, b)| a.id != b.id);
        if !changed {
            return false;
        }
        self.tabs = reordered;
        tracing::debug!(order = ?self.work_tab_ids(), "work tabs reordered");
        self.commit(StoreChange::Reordered);
        true
    }

    /// Register an observer called after every change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&StoreChange, &[WorkTabEntry]) + 'static,
    ) -> SubscriptionId {
        self.observers.add(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn commit(&mut self, change: StoreChange) {
        if let Some(ref persistence) = self.persistence {
            if let Err(e) = persistence.save(&self.tabs) {
                tracing::warn!(error = %e, "could not save work tabs");
            }
        }
        self.observers.notify(&change, &self.tabs);
    }
}

fn reorder<S: AsRef<str>>(tabs: &[WorkTabEntry], ordered_ids: &[S]) -> Vec<WorkTabEntry> {
    let mut placed: HashSet<&str> = HashSet::with_capacity(ordered_ids.len());
    let mut out = Vec::with_capacity(tabs.len());

    for id in ordered_ids {
        let id = id.as_ref();
        if placed.contains(id) {
            continue;
        }
        if let Some(tab) = tabs.iter().find(|t| t.id == id) {
            placed.insert(tab.id.as_str());
            out.push(tab.clone());
        }
    }

    out.extend(
        tabs.iter()
            .filter(|t| !placed.contains(t.id.as_str()))
            .cloned(),
    );
    out
}

fn dedup_by_id(tabs: Vec<WorkTabEntry>) -> Vec<WorkTabEntry> {
    let mut seen = HashSet::with_capacity(tabs.len());
    tabs.into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                tracing::warn!(id = %t.id, "dropping duplicate work tab from saved state");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_with(ids: &[&str]) -> WorkTabStore {
        let mut store = WorkTabStore::new();
        for id in ids {
            store.add_work_tab(*id);
        }
        store
    }

    fn recorder(store: &mut WorkTabStore) -> Rc<RefCell<Vec<StoreChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));
        seen
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.work_tab_ids(), vec!["a", "b"]);
        assert_eq!(store.get_work_tab("a").unwrap().state, DEFAULT_STATE);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut store = WorkTabStore::new();
        assert!(store.add_work_tab("a"));
        store.update_work_tab("a", WorkTabPatch::new().state("running"));
        assert!(!store.add_work_tab("a"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_work_tab("a").unwrap().state, "running");
    }

    #[test]
    fn test_remove_then_get_is_none() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.remove_work_tab("a"));
        assert!(store.get_work_tab("a").is_none());
        assert!(!store.remove_work_tab("a"));
        assert!(!store.remove_work_tab("never"));
        assert_eq!(store.work_tab_ids(), vec!["b"]);
    }

    #[test]
    fn test_update_state_keeps_id() {
        let mut store = store_with(&["a"]);
        assert_eq!(store.get_work_tab("a").unwrap().state, "準備中");

        assert!(store.update_work_tab("a", WorkTabPatch::new().state("完成")));

        let entry = store.get_work_tab("a").unwrap();
        assert_eq!(entry.state, "完成");
        assert_eq!(entry.id, "a");
    }

    #[test]
    fn test_update_preserves_unpatched_fields() {
        let mut store = store_with(&["a"]);
        store.update_work_tab("a", WorkTabPatch::new().field("owner", "kai").field("n", 1));
        store.update_work_tab("a", WorkTabPatch::new().field("n", 2));

        let entry = store.get_work_tab("a").unwrap();
        assert_eq!(entry.field("owner"), Some(&json!("kai")));
        assert_eq!(entry.field("n"), Some(&json!(2)));
        assert_eq!(entry.state, DEFAULT_STATE);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store = store_with(&["a"]);
        assert!(!store.update_work_tab("b", WorkTabPatch::new().state("x")));
        assert_eq!(store.work_tab_ids(), vec!["a"]);
        assert!(store.get_work_tab("b").is_none());
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut store = store_with(&["a"]);
        let seen = recorder(&mut store);
        assert!(!store.update_work_tab("a", WorkTabPatch::new()));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_reorder_named_first_rest_after() {
        let mut store = store_with(&["a", "b", "c"]);
        assert!(store.reorder_work_tabs(&["c", "a"]));
        assert_eq!(store.work_tab_ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_is_stable_for_unnamed() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);
        store.reorder_work_tabs(&["d"]);
        assert_eq!(store.work_tab_ids(), vec!["d", "a", "b", "c", "e"]);
    }

    #[test]
    fn test_reorder_skips_unknown_and_repeated_ids() {
        let mut store = store_with(&["a", "b", "c"]);
        store.reorder_work_tabs(&["zz", "b", "b", "a", "zz"]);
        assert_eq!(store.work_tab_ids(), vec!["b", "a", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reorder_same_order_is_noop() {
        let mut store = store_with(&["a", "b"]);
        let seen = recorder(&mut store);
        assert!(!store.reorder_work_tabs(&["a", "b"]));
        assert!(!store.reorder_work_tabs::<&str>(&[]));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_reorder_keeps_entry_contents() {
        let mut store = store_with(&["a", "b"]);
        store.update_work_tab("b", WorkTabPatch::new().state("完成").field("n", 3));
        store.reorder_work_tabs(&["b"]);

        let first = &store.work_tabs()[0];
        assert_eq!(first.id, "b");
        assert_eq!(first.state, "完成");
        assert_eq!(first.field("n"), Some(&json!(3)));
    }

    #[test]
    fn test_ids_track_every_mutation() {
        let mut store = WorkTabStore::new();
        let check = |s: &WorkTabStore| {
            let projected: Vec<&str> = s.work_tabs().iter().map(|t| t.id.as_str()).collect();
            assert_eq!(s.work_tab_ids(), projected);
        };
        store.add_work_tab("a");
        check(&store);
        store.add_work_tab("b");
        check(&store);
        store.reorder_work_tabs(&["b"]);
        check(&store);
        store.remove_work_tab("a");
        check(&store);
        store.update_work_tab("b", WorkTabPatch::new().state("x"));
        check(&store);
    }

    #[test]
    fn test_custom_default_state() {
        let mut store = WorkTabStore::new().with_default_state("queued");
        store.add_work_tab("a");
        assert_eq!(store.get_work_tab("a").unwrap().state, "queued");
    }

    #[test]
    fn test_observers_see_effective_changes_only() {
        let mut store = WorkTabStore::new();
        let seen = recorder(&mut store);

        store.add_work_tab("a");
        store.add_work_tab("a");
        store.add_work_tab("b");
        store.update_work_tab("a", WorkTabPatch::new().state("done"));
        store.update_work_tab("a", WorkTabPatch::new().state("done"));
        store.reorder_work_tabs(&["b"]);
        store.remove_work_tab("a");
        store.remove_work_tab("a");

        assert_eq!(
            *seen.borrow(),
            vec![
                StoreChange::Added { id: "a".into() },
                StoreChange::Added { id: "b".into() },
                StoreChange::Updated { id: "a".into() },
                StoreChange::Reordered,
                StoreChange::Removed { id: "a".into() },
            ]
        );
    }

    #[test]
    fn test_observer_gets_live_list() {
        let mut store = store_with(&["a"]);
        let ids = Rc::new(RefCell::new(Vec::new()));
        let sink = ids.clone();
        store.subscribe(move |_, tabs| {
            *sink.borrow_mut() = tabs.iter().map(|t| t.id.clone()).collect();
        });

        store.add_work_tab("b");
        assert_eq!(*ids.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = WorkTabStore::new();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let sub = store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        store.add_work_tab("a");
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add_work_tab("b");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn test_restore_from_persistence() {
        let saved = MemoryPersistence::with_tabs(&[
            WorkTabEntry::new("a", "完成"),
            WorkTabEntry::new("b", "準備中"),
        ])
        .unwrap();

        let store = WorkTabStore::new().with_persistence(saved);

        assert!(store.is_persistent());
        assert_eq!(store.work_tab_ids(), vec!["a", "b"]);
        assert_eq!(store.get_work_tab("a").unwrap().state, "完成");
    }

    #[test]
    fn test_restore_malformed_starts_empty() {
        let store = WorkTabStore::new().with_persistence(MemoryPersistence::with_raw("][bad"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_collapses_duplicate_ids() {
        let saved = MemoryPersistence::with_tabs(&[
            WorkTabEntry::new("a", "first"),
            WorkTabEntry::new("b", "x"),
            WorkTabEntry::new("a", "second"),
        ])
        .unwrap();

        let store = WorkTabStore::new().with_persistence(saved);
        assert_eq!(store.work_tab_ids(), vec!["a", "b"]);
        assert_eq!(store.get_work_tab("a").unwrap().state, "first");
    }

    #[test]
    fn test_write_through_after_each_change() {
        let sink = MemoryPersistence::new();
        let mut store = WorkTabStore::new().with_persistence(sink.clone());
        assert!(sink.raw().is_none());

        store.add_work_tab("a");
        store.add_work_tab("b");
        assert_eq!(sink.snapshot().unwrap(), store.work_tabs());

        store.update_work_tab("b", WorkTabPatch::new().state("完成"));
        store.reorder_work_tabs(&["b"]);
        assert_eq!(sink.snapshot().unwrap(), store.work_tabs());

        store.remove_work_tab("a");
        assert_eq!(sink.snapshot().unwrap(), store.work_tabs());
    }

    #[test]
    fn test_noop_does_not_write() {
        let sink = MemoryPersistence::new();
        let mut store = WorkTabStore::new().with_persistence(sink.clone());

        store.remove_work_tab("ghost");
        store.update_work_tab("ghost", WorkTabPatch::new().state("x"));
        store.reorder_work_tabs(&["ghost"]);

        assert!(sink.raw().is_none());
    }

    struct FailingSink {
        attempts: Rc<RefCell<usize>>,
    }

    impl TabPersistence for FailingSink {
        fn load(&self) -> crate::error::Result<Option<Vec<WorkTabEntry>>> {
            Err(PersistError::Read {
                path: "unreachable.json".into(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn save(&self, _tabs: &[WorkTabEntry]) -> crate::error::Result<()> {
            *self.attempts.borrow_mut() += 1;
            Err(PersistError::Write {
                path: "unreachable.json".into(),
                source: std::io::Error::other("disk gone"),
            })
        }
    }

    #[test]
    fn test_persistence_failures_are_swallowed() {
        let attempts = Rc::new(RefCell::new(0));
        let mut store = WorkTabStore::new().with_persistence(FailingSink {
            attempts: attempts.clone(),
        });
        let seen = recorder(&mut store);

        assert!(store.is_empty());
        assert!(store.add_work_tab("a"));
        assert_eq!(store.work_tab_ids(), vec!["a"]);
        assert_eq!(*attempts.borrow(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_json_file_round_trip_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work_tabs.json");

        {
            let mut store = WorkTabStore::new().with_persistence(JsonFilePersistence::new(&path));
            store.add_work_tab("a");
            store.add_work_tab("b");
            store.update_work_tab("a", WorkTabPatch::new().state("完成"));
            store.reorder_work_tabs(&["b"]);
        }

        let store = WorkTabStore::new().with_persistence(JsonFilePersistence::new(&path));
        assert_eq!(store.work_tab_ids(), vec!["b", "a"]);
        assert_eq!(store.get_work_tab("a").unwrap().state, "完成");
    }
}
