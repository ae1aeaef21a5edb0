//! AutoQ: an ordered, observable work-tab store and the pieces needed to host
//! it (configuration, diagnostics logging, persistence).

pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use store::{StoreChange, SubscriptionId, WorkTabEntry, WorkTabPatch, WorkTabStore};
