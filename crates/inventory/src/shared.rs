//! Shared handle for callers that touch the store from more than one place.
//!
//! Reconciliation reads all three collections before writing, so each call
//! holds the lock over the whole store.

use std::sync::{Arc, Mutex, MutexGuard};

use hearth_core::KeyValueStore;

use crate::store::InventoryStore;

#[derive(Debug)]
pub struct SharedInventoryStore<S> {
    inner: Arc<Mutex<InventoryStore<S>>>,
}

impl<S> Clone for SharedInventoryStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedInventoryStore<S>
where
    S: KeyValueStore,
{
    pub fn new(store: InventoryStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a read-only closure with exclusive access.
    pub fn read<R>(&self, f: impl FnOnce(&InventoryStore<S>) -> R) -> R {
        f(&self.lock())
    }

    /// Run one or more operations with exclusive access.
    pub fn update<R>(&self, f: impl FnOnce(&mut InventoryStore<S>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, InventoryStore<S>> {
        // Poisoning means a caller panicked between operations; each operation is complete.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
