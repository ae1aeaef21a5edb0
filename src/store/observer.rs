//! Synchronous change notification for [`WorkTabStore`](super::WorkTabStore).

use super::entry::WorkTabEntry;

/// What a mutating store operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added { id: String },
    Removed { id: String },
    Updated { id: String },
    Reordered,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Observer = Box<dyn FnMut(&StoreChange, &[WorkTabEntry])>;

/// Observers in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn add(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sub, _)| *sub != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn notify(&mut self, change: &StoreChange, tabs: &[WorkTabEntry]) {
        for (_, observer) in self.entries.iter_mut() {
            observer(change, tabs);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
