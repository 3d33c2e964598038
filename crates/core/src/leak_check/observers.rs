//! Observer registry tolerant of mutation during notification
//!
//! Every notification pass iterates a snapshot of the registry. Before each
//! delivery the observer is looked up again in the live registry, so an
//! observer removed by an earlier callback in the same pass is skipped, while
//! one added during the pass only sees later notifications.

use std::sync::Arc;

use parking_lot::Mutex;

/// Registry of shared observers, compared by pointer identity
pub struct ObserverList<T: ?Sized> {
    observers: Mutex<Vec<Arc<T>>>,
}

impl<T: ?Sized> ObserverList<T> {
    /// Empty registry
    pub fn new() -> Self {
        Self { observers: Mutex::new(Vec::new()) }
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn add(&self, observer: Arc<T>) -> bool {
        let mut observers = self.observers.lock();
        if observers.iter().any(|existing| same_observer(existing, &observer)) {
            return false;
        }
        observers.push(observer);
        true
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    pub fn remove(&self, observer: &Arc<T>) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|existing| !same_observer(existing, observer));
        observers.len() != before
    }

    /// Whether `observer` is currently registered
    pub fn contains(&self, observer: &Arc<T>) -> bool {
        self.observers.lock().iter().any(|existing| same_observer(existing, observer))
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    /// Whether no observer is registered
    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.observers.lock().clear();
    }

    /// Invoke `f` on each observer registered when the call started and
    /// still registered at its turn.
    ///
    /// The registry lock is not held while `f` runs, so callbacks may add or
    /// remove observers (including themselves).
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        let snapshot = self.observers.lock().clone();
        for observer in &snapshot {
            if self.contains(observer) {
                f(observer);
            }
        }
    }
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn same_observer<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
